//! Schema editor: routes user events to the diagram and the interaction state machines.
//!
//! Hosts translate their UI events into [`EditorEvent`]s and call
//! [`SchemaEditor::dispatch`]. The returned [`EditorOutcome`] tells the host
//! whether to redraw and whether to show a notification.

use crate::core::catalog::Catalog;
use crate::core::config::{DiagramConfig, RelationshipPolicy, Viewport};
use crate::core::diagram::{Diagram, DiagramSnapshot};
use crate::core::drag::{BlockDragController, PointerCapture};
use crate::core::error::DiagramError;
use crate::core::geometry::Position;
use crate::core::linking::{ColumnLinker, ColumnRef};
use crate::core::notification::CanvasNotification;
use crate::core::render::{self, BlockView, RelationshipLine};

/// User-facing events the editor consumes
#[derive(Clone, Debug, PartialEq)]
pub enum EditorEvent {
    /// A catalog table was picked for the diagram
    SelectTable { id: String },
    /// The remove button of a placed table was pressed
    RemoveTable { id: String },
    /// Pointer pressed on a block header
    BlockPointerDown { id: String, pointer: Position },
    /// Pointer moved anywhere on the surface
    PointerMove { pointer: Position },
    /// Pointer released anywhere on the surface
    PointerUp,
    ColumnDragStart { table_id: String, column: String },
    ColumnDrop { table_id: String, column: String },
    /// Column drag finished, dropped or not
    ColumnDragEnd,
    /// Canvas size changed; affects where new tables are placed
    ResizeViewport { width: f64, height: f64 },
    SetRelationshipPolicy(RelationshipPolicy),
}

/// Result of dispatching an event
#[derive(Clone, Debug, PartialEq)]
pub enum EditorOutcome {
    /// Nothing a renderer shows has changed
    Unchanged,
    /// The diagram changed and should be redrawn
    Changed,
    /// The event was rejected; show this to the user
    Notify(CanvasNotification),
}

impl EditorOutcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, EditorOutcome::Changed)
    }

    fn from_result<T>(result: Result<Option<T>, DiagramError>) -> Self {
        match result {
            Ok(Some(_)) => EditorOutcome::Changed,
            Ok(None) => EditorOutcome::Unchanged,
            Err(err) => match CanvasNotification::from_error(&err) {
                Some(notification) => EditorOutcome::Notify(notification),
                None => EditorOutcome::Unchanged,
            },
        }
    }
}

/// Catalog, diagram and interaction state of one editing session
pub struct SchemaEditor<C: PointerCapture> {
    catalog: Catalog,
    diagram: Diagram,
    drag: BlockDragController<C>,
    linker: ColumnLinker,
}

impl<C: PointerCapture> SchemaEditor<C> {
    pub fn new(catalog: Catalog, config: DiagramConfig, capture: C) -> Self {
        Self {
            catalog,
            diagram: Diagram::new(config),
            drag: BlockDragController::new(capture),
            linker: ColumnLinker::new(),
        }
    }

    pub fn dispatch(&mut self, event: EditorEvent) -> EditorOutcome {
        match event {
            EditorEvent::SelectTable { id } => self.select_table(&id),
            EditorEvent::RemoveTable { id } => self.remove_table(&id),
            EditorEvent::BlockPointerDown { id, pointer } => {
                if self.drag.pointer_down(&self.diagram, &id, pointer) {
                    EditorOutcome::Changed
                } else {
                    EditorOutcome::Unchanged
                }
            }
            EditorEvent::PointerMove { pointer } => {
                match self.drag.pointer_move(&mut self.diagram, pointer) {
                    Some(_) => EditorOutcome::Changed,
                    None => EditorOutcome::Unchanged,
                }
            }
            EditorEvent::PointerUp => match self.drag.pointer_up() {
                Some(_) => EditorOutcome::Changed,
                None => EditorOutcome::Unchanged,
            },
            EditorEvent::ColumnDragStart { table_id, column } => {
                self.linker.drag_start(ColumnRef::new(table_id, column));
                EditorOutcome::Unchanged
            }
            EditorEvent::ColumnDrop { table_id, column } => {
                let result = self
                    .linker
                    .drop_on(&mut self.diagram, ColumnRef::new(table_id, column));
                EditorOutcome::from_result(result)
            }
            EditorEvent::ColumnDragEnd => {
                self.linker.cancel();
                EditorOutcome::Unchanged
            }
            EditorEvent::ResizeViewport { width, height } => {
                let viewport = Viewport::new(width, height);
                if viewport.is_usable() {
                    self.diagram.set_viewport(viewport);
                } else {
                    tracing::debug!("Ignoring unusable viewport {}x{}", width, height);
                }
                EditorOutcome::Unchanged
            }
            EditorEvent::SetRelationshipPolicy(policy) => {
                self.diagram.set_relationship_policy(policy);
                EditorOutcome::Changed
            }
        }
    }

    fn select_table(&mut self, id: &str) -> EditorOutcome {
        let Some(table) = self.catalog.get(id).cloned() else {
            tracing::debug!("Catalog has no table '{}'", id);
            return EditorOutcome::Unchanged;
        };

        EditorOutcome::from_result(self.diagram.add_table(table).map(Some))
    }

    fn remove_table(&mut self, id: &str) -> EditorOutcome {
        // Release the capture before the block disappears
        self.drag.forget(id);
        match self.diagram.remove_table(id) {
            Some(_) => EditorOutcome::Changed,
            None => EditorOutcome::Unchanged,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn drag(&self) -> &BlockDragController<C> {
        &self.drag
    }

    pub fn drag_mut(&mut self) -> &mut BlockDragController<C> {
        &mut self.drag
    }

    pub fn linker(&self) -> &ColumnLinker {
        &self.linker
    }

    pub fn config(&self) -> &DiagramConfig {
        self.diagram.config()
    }

    pub fn snapshot(&self) -> DiagramSnapshot {
        self.diagram.snapshot()
    }

    pub fn block_views(&self) -> Vec<BlockView> {
        render::block_views(&self.diagram.snapshot(), self.drag.active_block())
    }

    pub fn relationship_lines(&self) -> Vec<RelationshipLine> {
        render::relationship_lines(&self.diagram.snapshot(), &self.config().dimensions)
    }
}
