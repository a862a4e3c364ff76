//! Error types for the diagram model and the table catalog.

/// Errors produced by diagram mutations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DiagramError {
    /// The table is already placed on the diagram
    #[error("Table '{id}' is already on the diagram")]
    DuplicateTable { id: String },

    /// The operation references a table that is not (or no longer) placed
    #[error("Table '{id}' is not on the diagram")]
    DanglingReference { id: String },

    /// Strict policy: the column does not exist on the referenced table
    #[error("Table '{table_id}' has no column '{column}'")]
    UnknownColumn { table_id: String, column: String },

    /// Strict policy: an identical or mirrored relationship already exists
    #[error(
        "Relationship {}.{} -> {}.{} already exists",
        .source_table_id,
        .source_column,
        .target_table_id,
        .target_column
    )]
    DuplicateRelationship {
        source_table_id: String,
        source_column: String,
        target_table_id: String,
        target_column: String,
    },

    /// Strict policy: a column cannot reference itself
    #[error("Column '{table_id}.{column}' cannot reference itself")]
    SelfRelationship { table_id: String, column: String },
}

impl DiagramError {
    /// Whether the user should be told about this error.
    ///
    /// Dangling references come from benign event ordering (a move delivered
    /// after a removal) and are swallowed.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, DiagramError::DanglingReference { .. })
    }
}

/// Errors produced while loading the table catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog table has an empty id")]
    EmptyId,

    #[error("Catalog contains table id '{id}' more than once")]
    DuplicateId { id: String },

    #[error("Catalog table '{table_id}' lists column '{column}' more than once")]
    DuplicateColumn { table_id: String, column: String },
}
