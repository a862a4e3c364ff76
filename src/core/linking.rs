//! Column linking: drag one column onto another to relate them.
//!
//! Every column is both a drag source and a drop target. Starting a drag only
//! remembers the source column; the relationship is recorded on drop.

use crate::core::diagram::{Diagram, Relationship};
use crate::core::error::DiagramError;
use serde::{Deserialize, Serialize};

/// A column of a placed table, used as drag payload and drop target
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub table_id: String,
    pub column: String,
}

impl ColumnRef {
    pub fn new(table_id: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table_id: table_id.into(),
            column: column.into(),
        }
    }
}

/// Holds the payload of the column drag in progress
#[derive(Clone, Debug, Default)]
pub struct ColumnLinker {
    payload: Option<ColumnRef>,
}

impl ColumnLinker {
    pub fn new() -> Self {
        Self::default()
    }

    /// A column started being dragged
    pub fn drag_start(&mut self, source: ColumnRef) {
        self.payload = Some(source);
    }

    /// The drag ended without a drop, or after one
    pub fn cancel(&mut self) {
        self.payload = None;
    }

    pub fn payload(&self) -> Option<&ColumnRef> {
        self.payload.as_ref()
    }

    /// A dragged column was dropped on `target`.
    ///
    /// Records `payload -> target` when the two differ in table or column.
    /// Dropping a column on itself, or dropping with no drag in progress,
    /// changes nothing and returns `Ok(None)`.
    pub fn drop_on(
        &mut self,
        diagram: &mut Diagram,
        target: ColumnRef,
    ) -> Result<Option<Relationship>, DiagramError> {
        let Some(source) = self.payload.take() else {
            tracing::debug!(
                "Drop on {}.{} without a dragged column",
                target.table_id,
                target.column
            );
            return Ok(None);
        };

        if source == target {
            tracing::debug!("Column {}.{} dropped on itself", source.table_id, source.column);
            return Ok(None);
        }

        diagram
            .add_relationship(
                source.table_id,
                source.column,
                target.table_id,
                target.column,
            )
            .map(Some)
    }
}
