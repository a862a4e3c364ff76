//! Diagram model: placed tables, their positions and column relationships.
//!
//! Tables are graph nodes and relationships are directed edges between them.
//! A node carries its own position, so a table cannot exist without one and
//! the position disappears with the node. Removing a node removes every edge
//! touching it, which gives cascade deletion of relationships for free.

use crate::core::catalog::CatalogTable;
use crate::core::config::{DiagramConfig, RelationshipPolicy, Viewport};
use crate::core::error::DiagramError;
use crate::core::geometry::Position;
use crate::core::placement::find_free_position;
use petgraph::Directed;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Graph node: a catalog table placed on the canvas
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct PlacedTable {
    pub table: CatalogTable,
    pub position: Position,
}

impl PlacedTable {
    pub fn id(&self) -> &str {
        &self.table.id
    }

    pub fn name(&self) -> &str {
        &self.table.name
    }

    pub fn columns(&self) -> &[String] {
        &self.table.columns
    }
}

/// Graph edge: the column pair of a relationship.
///
/// Table ids live on the edge endpoints; `seq` keeps creation order because
/// the graph reuses vacant edge slots.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct RelationshipEdge {
    seq: u64,
    source_column: String,
    target_column: String,
}

/// Directed link from a column of one placed table to a column of another
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub struct Relationship {
    pub source_table_id: String,
    pub source_column: String,
    pub target_table_id: String,
    pub target_column: String,
}

impl Relationship {
    pub fn new(
        source_table_id: impl Into<String>,
        source_column: impl Into<String>,
        target_table_id: impl Into<String>,
        target_column: impl Into<String>,
    ) -> Self {
        Self {
            source_table_id: source_table_id.into(),
            source_column: source_column.into(),
            target_table_id: target_table_id.into(),
            target_column: target_column.into(),
        }
    }

    /// Whether either end of the relationship is the given table
    pub fn touches(&self, table_id: &str) -> bool {
        self.source_table_id == table_id || self.target_table_id == table_id
    }

    /// Same link with source and target swapped
    pub fn mirrored(&self) -> Self {
        Self {
            source_table_id: self.target_table_id.clone(),
            source_column: self.target_column.clone(),
            target_table_id: self.source_table_id.clone(),
            target_column: self.source_column.clone(),
        }
    }

    /// Equal as an unordered pair of columns
    pub fn links_same_columns(&self, other: &Relationship) -> bool {
        self == other || *self == other.mirrored()
    }
}

/// Graph type: nodes are placed tables, edges are relationships
pub type DiagramGraph = StableGraph<PlacedTable, RelationshipEdge, Directed>;

/// Read-only view of the diagram handed to renderers
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct DiagramSnapshot {
    /// Placed tables in insertion order
    pub tables: Vec<CatalogTable>,
    pub positions: BTreeMap<String, Position>,
    /// Relationships in creation order
    pub relationships: Vec<Relationship>,
}

/// The diagram being edited
#[derive(Clone, Debug, Default)]
pub struct Diagram {
    graph: DiagramGraph,
    index: HashMap<String, NodeIndex>,
    /// Insertion order; the graph reuses freed node slots
    order: Vec<NodeIndex>,
    next_seq: u64,
    config: DiagramConfig,
}

impl Diagram {
    pub fn new(config: DiagramConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.config.viewport = viewport;
    }

    pub fn set_relationship_policy(&mut self, policy: RelationshipPolicy) {
        self.config.relationship_policy = policy;
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Place a catalog table at the first free grid slot.
    ///
    /// Rejects a table whose id is already placed and leaves the diagram
    /// untouched in that case.
    pub fn add_table(&mut self, table: CatalogTable) -> Result<Position, DiagramError> {
        self.ensure_absent(&table.id)?;

        let position = find_free_position(
            self.graph.node_weights().map(|node| &node.position),
            &self.config.dimensions,
            &self.config.viewport,
        );
        self.insert(table, position);
        Ok(position)
    }

    /// Place a catalog table at an explicit position
    pub fn add_table_at(
        &mut self,
        table: CatalogTable,
        position: Position,
    ) -> Result<(), DiagramError> {
        self.ensure_absent(&table.id)?;
        self.insert(table, position);
        Ok(())
    }

    /// Remove a table together with its position and every relationship touching it.
    ///
    /// Returns `None` when the table is not placed.
    pub fn remove_table(&mut self, id: &str) -> Option<PlacedTable> {
        let node_idx = self.index.remove(id)?;
        self.order.retain(|idx| *idx != node_idx);

        let cascaded = self
            .graph
            .edge_references()
            .filter(|edge| edge.source() == node_idx || edge.target() == node_idx)
            .count();
        let removed = self.graph.remove_node(node_idx)?;

        tracing::info!(
            "Removed table '{}' and {} relationship(s)",
            removed.name(),
            cascaded
        );
        Some(removed)
    }

    /// Overwrite the position of a placed table.
    ///
    /// Returns `false` without touching anything when the table is not placed,
    /// so a late move event cannot bring a removed table back.
    pub fn update_position(&mut self, id: &str, x: f64, y: f64) -> bool {
        let Some(node) = self
            .index
            .get(id)
            .and_then(|idx| self.graph.node_weight_mut(*idx))
        else {
            tracing::debug!("Ignoring position update for missing table '{}'", id);
            return false;
        };

        node.position = Position::new(x, y);
        true
    }

    /// Record a relationship between two placed tables.
    ///
    /// Both tables must be placed. Under the permissive policy nothing else
    /// is checked: unknown columns and repeated or mirrored links are stored
    /// as given. The strict policy rejects those.
    pub fn add_relationship(
        &mut self,
        source_table_id: impl Into<String>,
        source_column: impl Into<String>,
        target_table_id: impl Into<String>,
        target_column: impl Into<String>,
    ) -> Result<Relationship, DiagramError> {
        let relationship = Relationship::new(
            source_table_id,
            source_column,
            target_table_id,
            target_column,
        );

        let source_idx = self.node_index(&relationship.source_table_id)?;
        let target_idx = self.node_index(&relationship.target_table_id)?;

        if self.config.relationship_policy.is_strict() {
            self.validate_strict(&relationship, source_idx, target_idx)?;
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.graph.add_edge(
            source_idx,
            target_idx,
            RelationshipEdge {
                seq,
                source_column: relationship.source_column.clone(),
                target_column: relationship.target_column.clone(),
            },
        );

        tracing::info!(
            "Linked {}.{} -> {}.{}",
            relationship.source_table_id,
            relationship.source_column,
            relationship.target_table_id,
            relationship.target_column
        );
        Ok(relationship)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn table(&self, id: &str) -> Option<&PlacedTable> {
        self.index
            .get(id)
            .and_then(|idx| self.graph.node_weight(*idx))
    }

    pub fn position(&self, id: &str) -> Option<Position> {
        self.table(id).map(|node| node.position)
    }

    /// Placed tables in insertion order
    pub fn tables(&self) -> impl Iterator<Item = &PlacedTable> {
        self.order
            .iter()
            .filter_map(|idx| self.graph.node_weight(*idx))
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn relationship_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All relationships in creation order
    pub fn relationships(&self) -> Vec<Relationship> {
        let mut edges: Vec<(u64, Relationship)> = self
            .graph
            .edge_references()
            .filter_map(|edge| {
                let source = self.graph.node_weight(edge.source())?;
                let target = self.graph.node_weight(edge.target())?;
                let weight = edge.weight();
                Some((
                    weight.seq,
                    Relationship::new(
                        source.id(),
                        weight.source_column.clone(),
                        target.id(),
                        weight.target_column.clone(),
                    ),
                ))
            })
            .collect();
        edges.sort_by_key(|(seq, _)| *seq);
        edges.into_iter().map(|(_, rel)| rel).collect()
    }

    /// Relationships with the given table on either end
    pub fn relationships_of(&self, id: &str) -> Vec<Relationship> {
        self.relationships()
            .into_iter()
            .filter(|rel| rel.touches(id))
            .collect()
    }

    /// Consistent copy of tables, positions and relationships
    pub fn snapshot(&self) -> DiagramSnapshot {
        let tables: Vec<&PlacedTable> = self.tables().collect();
        DiagramSnapshot {
            positions: tables
                .iter()
                .map(|node| (node.id().to_string(), node.position))
                .collect(),
            tables: tables.into_iter().map(|node| node.table.clone()).collect(),
            relationships: self.relationships(),
        }
    }

    /// Underlying graph, for algorithms that walk it directly
    pub fn graph(&self) -> &DiagramGraph {
        &self.graph
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn ensure_absent(&self, id: &str) -> Result<(), DiagramError> {
        if self.contains(id) {
            tracing::warn!("Table '{}' already added", id);
            return Err(DiagramError::DuplicateTable { id: id.to_string() });
        }
        Ok(())
    }

    fn insert(&mut self, table: CatalogTable, position: Position) {
        let id = table.id.clone();
        tracing::info!("Placed table '{}' at {}", table.name, position);

        let node_idx = self.graph.add_node(PlacedTable { table, position });
        self.index.insert(id, node_idx);
        self.order.push(node_idx);
    }

    fn node_index(&self, id: &str) -> Result<NodeIndex, DiagramError> {
        self.index.get(id).copied().ok_or_else(|| {
            tracing::debug!("Relationship references missing table '{}'", id);
            DiagramError::DanglingReference { id: id.to_string() }
        })
    }

    fn validate_strict(
        &self,
        relationship: &Relationship,
        source_idx: NodeIndex,
        target_idx: NodeIndex,
    ) -> Result<(), DiagramError> {
        let checks = [
            (source_idx, &relationship.source_column),
            (target_idx, &relationship.target_column),
        ];
        for (idx, column) in checks {
            let node = &self.graph[idx];
            if !node.table.has_column(column) {
                return Err(DiagramError::UnknownColumn {
                    table_id: node.id().to_string(),
                    column: column.clone(),
                });
            }
        }

        if relationship.source_table_id == relationship.target_table_id
            && relationship.source_column == relationship.target_column
        {
            return Err(DiagramError::SelfRelationship {
                table_id: relationship.source_table_id.clone(),
                column: relationship.source_column.clone(),
            });
        }

        if self
            .relationships_of(&relationship.source_table_id)
            .iter()
            .any(|existing| existing.links_same_columns(relationship))
        {
            return Err(DiagramError::DuplicateRelationship {
                source_table_id: relationship.source_table_id.clone(),
                source_column: relationship.source_column.clone(),
                target_table_id: relationship.target_table_id.clone(),
                target_column: relationship.target_column.clone(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;

    fn users() -> CatalogTable {
        CatalogTable::new("1", "Users").with_columns(["id", "name", "email"])
    }

    fn products() -> CatalogTable {
        CatalogTable::new("2", "Products").with_columns(["id", "title", "price"])
    }

    fn orders() -> CatalogTable {
        CatalogTable::new("3", "Orders").with_columns(["id", "user_id", "product_id"])
    }

    fn diagram_with(tables: &[CatalogTable]) -> Diagram {
        let mut diagram = Diagram::default();
        for table in tables {
            diagram.add_table(table.clone()).unwrap();
        }
        diagram
    }

    #[test]
    fn test_add_table_places_at_first_slot() {
        let mut diagram = Diagram::default();
        let position = diagram.add_table(users()).unwrap();

        assert_eq!(position, Position::new(10.0, 10.0));
        assert_eq!(diagram.position("1"), Some(position));
        assert_eq!(diagram.len(), 1);
    }

    #[test]
    fn test_add_table_uses_next_free_slot() {
        let mut diagram = Diagram::default();
        diagram.add_table(users()).unwrap();
        let position = diagram.add_table(products()).unwrap();

        assert_eq!(position, Position::new(230.0, 10.0));
    }

    #[test]
    fn test_add_duplicate_table_rejected() {
        let mut diagram = Diagram::default();
        diagram.add_table(users()).unwrap();
        diagram.update_position("1", 300.0, 300.0);

        let result = diagram.add_table(users());

        assert_eq!(
            result,
            Err(DiagramError::DuplicateTable { id: "1".to_string() })
        );
        assert_eq!(diagram.len(), 1);
        assert_eq!(diagram.position("1"), Some(Position::new(300.0, 300.0)));
    }

    #[test]
    fn test_add_table_at_explicit_position() {
        let mut diagram = Diagram::default();
        diagram
            .add_table_at(users(), Position::new(400.0, 250.0))
            .unwrap();

        assert_eq!(diagram.position("1"), Some(Position::new(400.0, 250.0)));
        assert!(matches!(
            diagram.add_table_at(users(), Position::default()),
            Err(DiagramError::DuplicateTable { .. })
        ));
    }

    #[test]
    fn test_placement_sees_moved_tables() {
        let mut diagram = Diagram::default();
        diagram.add_table(users()).unwrap();
        diagram.update_position("1", 500.0, 400.0);

        let position = diagram.add_table(products()).unwrap();
        assert_eq!(position, Position::new(10.0, 10.0));
    }

    #[test]
    fn test_remove_table() {
        let mut diagram = diagram_with(&[users(), products()]);

        let removed = diagram.remove_table("1").unwrap();

        assert_eq!(removed.name(), "Users");
        assert!(!diagram.contains("1"));
        assert!(diagram.position("1").is_none());
        assert_eq!(diagram.len(), 1);
    }

    #[test]
    fn test_remove_missing_table_is_noop() {
        let mut diagram = diagram_with(&[users()]);

        assert!(diagram.remove_table("42").is_none());
        assert_eq!(diagram.len(), 1);
    }

    #[test]
    fn test_remove_cascades_relationships() {
        let mut diagram = diagram_with(&[users(), products(), orders()]);
        diagram.add_relationship("3", "user_id", "1", "id").unwrap();
        diagram.add_relationship("3", "product_id", "2", "id").unwrap();
        diagram.add_relationship("1", "id", "2", "id").unwrap();

        diagram.remove_table("1");

        let remaining = diagram.relationships();
        assert_eq!(remaining, vec![Relationship::new("3", "product_id", "2", "id")]);
        assert!(remaining.iter().all(|rel| !rel.touches("1")));
    }

    #[test]
    fn test_remove_cascades_self_links() {
        let mut diagram = diagram_with(&[users()]);
        diagram.add_relationship("1", "id", "1", "email").unwrap();

        diagram.remove_table("1");

        assert_eq!(diagram.relationship_count(), 0);
    }

    #[test]
    fn test_update_position() {
        let mut diagram = diagram_with(&[users()]);

        assert!(diagram.update_position("1", 75.5, -20.0));
        assert_eq!(diagram.position("1"), Some(Position::new(75.5, -20.0)));
    }

    #[test]
    fn test_update_position_after_removal_does_not_resurrect() {
        let mut diagram = diagram_with(&[users()]);
        diagram.remove_table("1");

        assert!(!diagram.update_position("1", 50.0, 70.0));
        assert!(!diagram.contains("1"));
        assert!(diagram.snapshot().positions.is_empty());
    }

    #[test]
    fn test_add_relationship_keeps_direction() {
        let mut diagram = diagram_with(&[users(), orders()]);

        let rel = diagram.add_relationship("3", "user_id", "1", "id").unwrap();

        assert_eq!(rel.source_table_id, "3");
        assert_eq!(rel.target_table_id, "1");
        assert_eq!(diagram.relationships(), vec![rel]);
    }

    #[test]
    fn test_add_relationship_to_missing_table() {
        let mut diagram = diagram_with(&[users()]);

        let result = diagram.add_relationship("1", "id", "9", "user_id");

        assert_eq!(
            result,
            Err(DiagramError::DanglingReference { id: "9".to_string() })
        );
        assert_eq!(diagram.relationship_count(), 0);
    }

    #[test]
    fn test_permissive_policy_keeps_duplicates_and_unknown_columns() {
        let mut diagram = diagram_with(&[users(), products()]);

        diagram.add_relationship("1", "id", "2", "id").unwrap();
        diagram.add_relationship("1", "id", "2", "id").unwrap();
        diagram.add_relationship("2", "id", "1", "id").unwrap();
        diagram.add_relationship("1", "nope", "2", "missing").unwrap();

        assert_eq!(diagram.relationship_count(), 4);
    }

    #[test]
    fn test_strict_policy_rejects_unknown_column() {
        let mut diagram = diagram_with(&[users(), products()]);
        diagram.set_relationship_policy(RelationshipPolicy::Strict);

        let result = diagram.add_relationship("1", "id", "2", "owner_id");

        assert_eq!(
            result,
            Err(DiagramError::UnknownColumn {
                table_id: "2".to_string(),
                column: "owner_id".to_string(),
            })
        );
    }

    #[test]
    fn test_strict_policy_rejects_duplicates_and_mirrors() {
        let mut diagram = diagram_with(&[users(), products()]);
        diagram.set_relationship_policy(RelationshipPolicy::Strict);
        diagram.add_relationship("1", "id", "2", "title").unwrap();

        assert!(matches!(
            diagram.add_relationship("1", "id", "2", "title"),
            Err(DiagramError::DuplicateRelationship { .. })
        ));
        assert!(matches!(
            diagram.add_relationship("2", "title", "1", "id"),
            Err(DiagramError::DuplicateRelationship { .. })
        ));
        // Same tables, different columns
        assert!(diagram.add_relationship("1", "email", "2", "title").is_ok());
        assert_eq!(diagram.relationship_count(), 2);
    }

    #[test]
    fn test_strict_policy_rejects_self_reference() {
        let mut diagram = diagram_with(&[users()]);
        diagram.set_relationship_policy(RelationshipPolicy::Strict);

        assert!(matches!(
            diagram.add_relationship("1", "id", "1", "id"),
            Err(DiagramError::SelfRelationship { .. })
        ));
        assert!(diagram.add_relationship("1", "id", "1", "email").is_ok());
    }

    #[test]
    fn test_relationships_in_creation_order_after_slot_reuse() {
        let mut diagram = diagram_with(&[users(), products(), orders()]);
        diagram.add_relationship("1", "id", "2", "id").unwrap();
        diagram.add_relationship("3", "user_id", "1", "id").unwrap();
        diagram.add_relationship("3", "product_id", "2", "id").unwrap();

        diagram.remove_table("1");
        diagram.add_table(users()).unwrap();
        diagram.add_relationship("2", "title", "1", "name").unwrap();

        assert_eq!(
            diagram.relationships(),
            vec![
                Relationship::new("3", "product_id", "2", "id"),
                Relationship::new("2", "title", "1", "name"),
            ]
        );
    }

    #[test]
    fn test_tables_in_insertion_order_after_slot_reuse() {
        let mut diagram = diagram_with(&[users(), products()]);
        diagram.remove_table("1");
        diagram.add_table(orders()).unwrap();

        let ids: Vec<&str> = diagram.tables().map(|t| t.id()).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn test_snapshot_is_consistent() {
        let mut diagram = diagram_with(&Catalog::demo().tables().to_vec());
        diagram.add_relationship("1", "id", "2", "id").unwrap();

        let snapshot = diagram.snapshot();

        assert_eq!(snapshot.tables.len(), 2);
        assert_eq!(snapshot.tables[0].name, "Users");
        let ids: Vec<&String> = snapshot.positions.keys().collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(snapshot.positions["2"], Position::new(230.0, 10.0));
        assert_eq!(snapshot.relationships.len(), 1);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut diagram = diagram_with(&[users()]);
        diagram.update_position("1", 42.0, 24.0);

        let json = serde_json::to_string(&diagram.snapshot()).unwrap();
        let back: DiagramSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(back, diagram.snapshot());
    }

    #[test]
    fn test_relationship_mirrored() {
        let rel = Relationship::new("1", "id", "2", "user_id");
        let mirror = rel.mirrored();

        assert_eq!(mirror, Relationship::new("2", "user_id", "1", "id"));
        assert!(rel.links_same_columns(&mirror));
        assert!(!rel.links_same_columns(&Relationship::new("1", "id", "2", "id")));
    }
}
