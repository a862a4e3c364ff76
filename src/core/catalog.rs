//! Static catalog of tables available for placement.
//!
//! The catalog is supplied once at startup and never mutated by the diagram.

use crate::core::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A table definition that can be added to the diagram
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct CatalogTable {
    pub id: String,
    pub name: String,
    /// Column names in display order
    pub columns: Vec<String>,
}

impl CatalogTable {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            columns: Vec::new(),
        }
    }

    pub fn add_column(mut self, column: impl Into<String>) -> Self {
        self.columns.push(column.into());
        self
    }

    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Index of a column in display order
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }
}

/// Ordered, validated set of catalog tables
#[derive(Clone, Serialize, Debug, Default, PartialEq)]
pub struct Catalog {
    tables: Vec<CatalogTable>,
}

impl Catalog {
    /// Build a catalog, rejecting empty or repeated ids and repeated columns
    pub fn from_tables(tables: Vec<CatalogTable>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for table in &tables {
            if table.id.trim().is_empty() {
                return Err(CatalogError::EmptyId);
            }
            if !seen.insert(table.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    id: table.id.clone(),
                });
            }

            let mut columns = HashSet::new();
            for column in &table.columns {
                if !columns.insert(column.as_str()) {
                    return Err(CatalogError::DuplicateColumn {
                        table_id: table.id.clone(),
                        column: column.clone(),
                    });
                }
            }
        }

        Ok(Self { tables })
    }

    /// Parse a JSON array of `{id, name, columns}` records
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let tables: Vec<CatalogTable> = serde_json::from_str(json)?;
        Self::from_tables(tables)
    }

    /// Built-in catalog used by the editor
    pub fn demo() -> Self {
        Self {
            tables: vec![
                CatalogTable::new("1", "Users").with_columns(["id", "name", "email"]),
                CatalogTable::new("2", "Products").with_columns(["id", "title", "price"]),
            ],
        }
    }

    pub fn get(&self, id: &str) -> Option<&CatalogTable> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn tables(&self) -> &[CatalogTable] {
        &self.tables
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_catalog() {
        let catalog = Catalog::demo();

        assert_eq!(catalog.len(), 2);
        let users = catalog.get("1").unwrap();
        assert_eq!(users.name, "Users");
        assert_eq!(users.columns, vec!["id", "name", "email"]);
        assert_eq!(catalog.get("2").unwrap().name, "Products");
        assert!(catalog.get("3").is_none());
    }

    #[test]
    fn test_demo_catalog_is_valid() {
        let tables = Catalog::demo().tables().to_vec();
        assert!(Catalog::from_tables(tables).is_ok());
    }

    #[test]
    fn test_column_index_follows_order() {
        let table = CatalogTable::new("1", "Users")
            .add_column("id")
            .add_column("name")
            .add_column("email");

        assert_eq!(table.column_index("id"), Some(0));
        assert_eq!(table.column_index("email"), Some(2));
        assert_eq!(table.column_index("age"), None);
        assert!(table.has_column("name"));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"id": "a", "name": "Orders", "columns": ["id", "user_id", "total"]},
            {"id": "b", "name": "Payments", "columns": ["id", "order_id"]}
        ]"#;

        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.tables()[0].name, "Orders");
        assert_eq!(catalog.get("b").unwrap().columns, vec!["id", "order_id"]);
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        let result = Catalog::from_json("{ not json");
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Catalog::from_tables(vec![
            CatalogTable::new("1", "Users"),
            CatalogTable::new("1", "Customers"),
        ]);

        match result {
            Err(CatalogError::DuplicateId { id }) => assert_eq!(id, "1"),
            other => panic!("expected DuplicateId, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_id_rejected() {
        let result = Catalog::from_tables(vec![CatalogTable::new("  ", "Nameless")]);
        assert!(matches!(result, Err(CatalogError::EmptyId)));
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let result = Catalog::from_tables(vec![
            CatalogTable::new("1", "Users").with_columns(["id", "email", "id"]),
        ]);

        assert!(matches!(
            result,
            Err(CatalogError::DuplicateColumn { ref column, .. }) if column == "id"
        ));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::default();
        assert!(catalog.is_empty());
        assert!(Catalog::from_json("[]").unwrap().is_empty());
    }
}
