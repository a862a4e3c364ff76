//! Canvas notifications shown to the user.

use crate::core::error::DiagramError;
use serde::{Deserialize, Serialize};

/// How long non-blocking notifications stay on screen
pub const DEFAULT_DISMISS_MS: u32 = 4000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationType {
    Success,
    Error,
    Warning,
    Info,
}

/// A toast-style message for the canvas
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasNotification {
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    /// `None` keeps the notification until the user dismisses it
    pub auto_dismiss_ms: Option<u32>,
}

impl CanvasNotification {
    pub fn new(
        notification_type: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            notification_type,
            title: title.into(),
            message: message.into(),
            auto_dismiss_ms: Some(DEFAULT_DISMISS_MS),
        }
    }

    /// Keep on screen until dismissed
    pub fn blocking(mut self) -> Self {
        self.auto_dismiss_ms = None;
        self
    }

    pub fn is_blocking(&self) -> bool {
        self.auto_dismiss_ms.is_none()
    }

    /// Notification for a user-visible diagram error; `None` for silent ones
    pub fn from_error(error: &DiagramError) -> Option<Self> {
        if !error.is_user_visible() {
            return None;
        }

        let notification = match error {
            DiagramError::DuplicateTable { .. } => {
                Self::new(NotificationType::Warning, "Table already added!", error.to_string())
                    .blocking()
            }
            _ => Self::new(
                NotificationType::Warning,
                "Relationship rejected",
                error.to_string(),
            ),
        };
        Some(notification)
    }
}
