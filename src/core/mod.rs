//! Core domain models and editing logic for relational schema diagrams

pub mod catalog;
pub mod config;
pub mod diagram;
pub mod drag;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod linking;
pub mod notification;
pub mod placement;
pub mod render;

pub use catalog::{Catalog, CatalogTable};
pub use config::{BlockDimensions, DiagramConfig, RelationshipPolicy, Viewport};
pub use diagram::{Diagram, DiagramSnapshot, PlacedTable, Relationship};
pub use drag::{BlockDragController, DragPhase, PointerCapture};
pub use editor::{EditorEvent, EditorOutcome, SchemaEditor};
pub use error::{CatalogError, DiagramError};
pub use geometry::{Position, Rect};
pub use linking::{ColumnLinker, ColumnRef};
pub use notification::{CanvasNotification, NotificationType};
pub use placement::{find_free_position, try_find_free_position};
pub use render::{BlockView, RelationshipLine};
