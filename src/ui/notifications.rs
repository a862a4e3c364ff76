//! Notification component for canvas display
//!
//! Provides toast-style notifications for rejected edits and other messages.

use crate::core::{CanvasNotification, NotificationType};
use leptos::prelude::*;
use std::collections::VecDeque;

/// Maximum number of notifications to show at once
const MAX_NOTIFICATIONS: usize = 5;

/// Notification item with unique ID for tracking
#[derive(Clone, Debug)]
pub struct NotificationItem {
    pub id: u64,
    pub notification: CanvasNotification,
}

/// Notifications container component
/// Place this at the canvas level to show notifications
#[component]
pub fn NotificationsContainer(manager: NotificationManager) -> impl IntoView {
    let notifications = manager.notifications();

    view! {
        <div class="notifications">
            {move || {
                notifications.get().into_iter().map(|item| {
                    view! {
                        <NotificationToast
                            notification=item.notification
                            id=item.id
                            manager=manager
                        />
                    }
                }).collect_view()
            }}
        </div>
    }
}

#[component]
fn NotificationToast(
    notification: CanvasNotification,
    id: u64,
    manager: NotificationManager,
) -> impl IntoView {
    let (is_exiting, _set_is_exiting) = signal(false);

    if let Some(_ms) = notification.auto_dismiss_ms {
        #[cfg(not(feature = "ssr"))]
        {
            use gloo_timers::future::TimeoutFuture;
            use wasm_bindgen_futures::spawn_local;

            spawn_local(async move {
                TimeoutFuture::new(_ms).await;
                _set_is_exiting.try_set(true);
                // Exit animation
                TimeoutFuture::new(300).await;
                manager.dismiss(id);
            });
        }
    }

    let kind = match notification.notification_type {
        NotificationType::Success => "toast toast-success",
        NotificationType::Error => "toast toast-error",
        NotificationType::Warning => "toast toast-warning",
        NotificationType::Info => "toast toast-info",
    };

    view! {
        <div
            class=kind
            class:toast-exiting=move || is_exiting.get()
            role="alert"
        >
            <div class="toast-body">
                <h4 class="toast-title">{notification.title}</h4>
                <p class="toast-message">{notification.message}</p>
            </div>
            <button
                class="toast-close"
                title="Dismiss"
                on:click=move |_| manager.dismiss(id)
            >
                "×"
            </button>
        </div>
    }
}

/// Queue of visible notifications
#[derive(Clone, Copy)]
pub struct NotificationManager {
    notifications: RwSignal<VecDeque<NotificationItem>>,
    next_id: StoredValue<u64>,
}

impl NotificationManager {
    pub fn new() -> Self {
        Self {
            notifications: RwSignal::new(VecDeque::new()),
            next_id: StoredValue::new(0),
        }
    }

    pub fn notifications(&self) -> RwSignal<VecDeque<NotificationItem>> {
        self.notifications
    }

    /// Add a notification, evicting the oldest beyond the limit
    pub fn notify(&self, notification: CanvasNotification) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);

        self.notifications.update(|n| {
            n.push_back(NotificationItem { id, notification });
            while n.len() > MAX_NOTIFICATIONS {
                n.pop_front();
            }
        });
    }

    pub fn dismiss(&self, id: u64) {
        self.notifications.try_update(|n| n.retain(|item| item.id != id));
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}
