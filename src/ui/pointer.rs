//! Pointer capture for the browser canvas.
//!
//! Capturing bumps a reactive counter; the canvas attaches window-level
//! `mousemove`/`mouseup` listeners while the counter is non-zero. Dropping the
//! returned token decrements it, so listeners go away as soon as the drag
//! state that owns the token is left.
//!
//! [`ListenerSlot`] holds whatever listeners are currently attached so the
//! canvas can swap them out on capture changes and clear them on unmount.

use crate::core::PointerCapture;
use leptos::prelude::*;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Clone, Copy, Debug)]
pub struct SignalCapture {
    live: RwSignal<usize>,
}

impl SignalCapture {
    pub fn new() -> Self {
        Self {
            live: RwSignal::new(0),
        }
    }

    /// Number of outstanding captures
    pub fn live(&self) -> ReadSignal<usize> {
        self.live.read_only()
    }
}

impl Default for SignalCapture {
    fn default() -> Self {
        Self::new()
    }
}

/// Held by a dragging block
#[derive(Debug)]
pub struct CaptureToken {
    live: RwSignal<usize>,
}

impl Drop for CaptureToken {
    fn drop(&mut self) {
        // The signal is gone when the canvas is torn down first
        self.live.try_update(|n| *n = n.saturating_sub(1));
    }
}

impl PointerCapture for SignalCapture {
    type Guard = CaptureToken;

    fn capture(&mut self, block_id: &str) -> CaptureToken {
        tracing::trace!("Capturing pointer for block '{}'", block_id);
        self.live.update(|n| *n += 1);
        CaptureToken { live: self.live }
    }
}

/// An attached listener that can be taken off again
pub trait Detach {
    fn detach(self);
}

impl Detach for WindowListenerHandle {
    fn detach(self) {
        self.remove();
    }
}

impl<A: Detach, B: Detach> Detach for (A, B) {
    fn detach(self) {
        self.0.detach();
        self.1.detach();
    }
}

/// Shared home for the listeners attached during a capture.
///
/// Replacing or clearing the slot detaches whatever it held before.
pub struct ListenerSlot<H> {
    slot: Arc<Mutex<Option<H>>>,
}

impl<H> Clone for ListenerSlot<H> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<H: Detach> ListenerSlot<H> {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
        }
    }

    pub fn replace(&self, handle: Option<H>) {
        let previous = {
            let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *slot, handle)
        };
        if let Some(previous) = previous {
            previous.detach();
        }
    }

    pub fn clear(&self) {
        self.replace(None);
    }

    pub fn is_attached(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl<H: Detach> Default for ListenerSlot<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingHandle(Arc<AtomicUsize>);

    impl Detach for CountingHandle {
        fn detach(self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn handle_pair(detached: &Arc<AtomicUsize>) -> (CountingHandle, CountingHandle) {
        (
            CountingHandle(Arc::clone(detached)),
            CountingHandle(Arc::clone(detached)),
        )
    }

    #[test]
    fn test_replacing_detaches_previous_listeners() {
        let detached = Arc::new(AtomicUsize::new(0));
        let slot = ListenerSlot::new();

        slot.replace(Some(handle_pair(&detached)));
        assert!(slot.is_attached());
        assert_eq!(detached.load(Ordering::SeqCst), 0);

        slot.replace(Some(handle_pair(&detached)));
        assert_eq!(detached.load(Ordering::SeqCst), 2);
        assert!(slot.is_attached());
    }

    #[test]
    fn test_clear_on_unmount_detaches_live_listeners() {
        let detached = Arc::new(AtomicUsize::new(0));
        let slot = ListenerSlot::new();
        let cleanup = slot.clone();

        slot.replace(Some(handle_pair(&detached)));
        cleanup.clear();

        assert_eq!(detached.load(Ordering::SeqCst), 2);
        assert!(!slot.is_attached());

        // Nothing left to detach
        cleanup.clear();
        assert_eq!(detached.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_capture_token_releases_on_drop() {
        let owner = Owner::new();
        owner.with(|| {
            let mut capture = SignalCapture::new();
            let live = capture.live();

            let token = capture.capture("users");
            assert_eq!(live.get_untracked(), 1);

            drop(token);
            assert_eq!(live.get_untracked(), 0);
        });
    }
}
