pub mod canvas;
pub mod icon;
pub mod notifications;
pub mod pointer;
pub mod sidebar;
pub mod table;

pub use canvas::SchemaCanvas;
pub use icon::{Icon, icons};
pub use notifications::{NotificationManager, NotificationsContainer};
pub use pointer::SignalCapture;
pub use sidebar::Sidebar;
pub use table::TableBlockView;
