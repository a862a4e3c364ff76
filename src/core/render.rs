//! What a renderer needs to draw the diagram.
//!
//! Blocks are drawn at their model positions with columns in catalog order.
//! A relationship line leaves the source block's right edge and enters the
//! target block's left edge, each at the height of its column:
//! `y = block.y + header_height + column_index * row_height`.

use crate::core::config::BlockDimensions;
use crate::core::diagram::{DiagramSnapshot, Relationship};
use crate::core::geometry::Position;
use serde::Serialize;

/// A block to draw
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct BlockView {
    pub id: String,
    pub name: String,
    pub columns: Vec<String>,
    pub position: Position,
    /// Whether the block is being dragged (grabbing cursor)
    pub dragging: bool,
}

/// A relationship resolved to screen coordinates
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct RelationshipLine {
    pub relationship: Relationship,
    /// Attach point on the source block's right edge
    pub from: Position,
    /// Attach point on the target block's left edge
    pub to: Position,
}

impl RelationshipLine {
    /// Orthogonal SVG path: horizontal, vertical at the midpoint, horizontal
    pub fn svg_path(&self) -> String {
        let mid_x = (self.from.x + self.to.x) / 2.0;
        format!(
            "M {} {} L {} {} L {} {} L {} {}",
            self.from.x, self.from.y, mid_x, self.from.y, mid_x, self.to.y, self.to.x, self.to.y
        )
    }
}

/// Blocks in insertion order; `dragging_id` marks the block under the pointer
pub fn block_views(snapshot: &DiagramSnapshot, dragging_id: Option<&str>) -> Vec<BlockView> {
    snapshot
        .tables
        .iter()
        .filter_map(|table| {
            let position = *snapshot.positions.get(&table.id)?;
            Some(BlockView {
                id: table.id.clone(),
                name: table.name.clone(),
                columns: table.columns.clone(),
                position,
                dragging: dragging_id == Some(table.id.as_str()),
            })
        })
        .collect()
}

/// Resolve every relationship to its two attach points.
///
/// A relationship is skipped when either table is not in the snapshot or
/// either column is not one of its table's columns.
pub fn relationship_lines(
    snapshot: &DiagramSnapshot,
    dims: &BlockDimensions,
) -> Vec<RelationshipLine> {
    snapshot
        .relationships
        .iter()
        .filter_map(|relationship| {
            let from = attach_point(
                snapshot,
                dims,
                &relationship.source_table_id,
                &relationship.source_column,
                Side::Right,
            );
            let to = attach_point(
                snapshot,
                dims,
                &relationship.target_table_id,
                &relationship.target_column,
                Side::Left,
            );

            match (from, to) {
                (Some(from), Some(to)) => Some(RelationshipLine {
                    relationship: relationship.clone(),
                    from,
                    to,
                }),
                _ => {
                    tracing::debug!(
                        "Skipping line {}.{} -> {}.{}: endpoint not on diagram",
                        relationship.source_table_id,
                        relationship.source_column,
                        relationship.target_table_id,
                        relationship.target_column
                    );
                    None
                }
            }
        })
        .collect()
}

/// Block edge a line attaches to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Attach point of a column on the given side of its block
pub fn attach_point(
    snapshot: &DiagramSnapshot,
    dims: &BlockDimensions,
    table_id: &str,
    column: &str,
    side: Side,
) -> Option<Position> {
    let position = snapshot.positions.get(table_id)?;
    let table = snapshot.tables.iter().find(|t| t.id == table_id)?;
    let column_index = table.column_index(column)?;

    let x = match side {
        Side::Left => position.x,
        Side::Right => position.x + dims.width,
    };
    Some(Position::new(x, position.y + dims.column_offset(column_index)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::CatalogTable;
    use crate::core::diagram::Diagram;

    fn linked_diagram() -> Diagram {
        let mut diagram = Diagram::default();
        diagram
            .add_table(CatalogTable::new("1", "Users").with_columns(["id", "name", "email"]))
            .unwrap();
        diagram
            .add_table(CatalogTable::new("2", "Orders").with_columns(["id", "total", "user_id"]))
            .unwrap();
        diagram.add_relationship("1", "id", "2", "user_id").unwrap();
        diagram
    }

    #[test]
    fn test_block_views_follow_model() {
        let diagram = linked_diagram();

        let views = block_views(&diagram.snapshot(), Some("2"));

        assert_eq!(views.len(), 2);
        assert_eq!(views[0].name, "Users");
        assert_eq!(views[0].columns, vec!["id", "name", "email"]);
        assert_eq!(views[0].position, Position::new(10.0, 10.0));
        assert!(!views[0].dragging);
        assert!(views[1].dragging);
    }

    #[test]
    fn test_relationship_line_endpoints() {
        let diagram = linked_diagram();
        let dims = BlockDimensions::default();

        let lines = relationship_lines(&diagram.snapshot(), &dims);

        assert_eq!(lines.len(), 1);
        // Source: right edge of Users, column 0
        assert_eq!(lines[0].from, Position::new(210.0, 58.0));
        // Target: left edge of Orders, column 2
        assert_eq!(lines[0].to, Position::new(230.0, 106.0));
    }

    #[test]
    fn test_lines_follow_moved_blocks() {
        let mut diagram = linked_diagram();
        diagram.update_position("2", 500.0, 300.0);

        let lines = relationship_lines(&diagram.snapshot(), &BlockDimensions::default());

        assert_eq!(lines[0].to, Position::new(500.0, 396.0));
    }

    #[test]
    fn test_dangling_relationship_is_skipped() {
        let mut snapshot = linked_diagram().snapshot();
        snapshot.positions.remove("2");
        snapshot.tables.retain(|t| t.id != "2");

        let lines = relationship_lines(&snapshot, &BlockDimensions::default());

        assert!(lines.is_empty());
    }

    #[test]
    fn test_unknown_column_is_skipped() {
        let mut diagram = linked_diagram();
        diagram.add_relationship("1", "ghost", "2", "id").unwrap();

        let lines = relationship_lines(&diagram.snapshot(), &BlockDimensions::default());

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].relationship.source_column, "id");
    }

    #[test]
    fn test_svg_path() {
        let line = RelationshipLine {
            relationship: Relationship::new("1", "id", "2", "user_id"),
            from: Position::new(210.0, 58.0),
            to: Position::new(230.0, 106.0),
        };

        assert_eq!(line.svg_path(), "M 210 58 L 220 58 L 220 106 L 230 106");
    }
}
