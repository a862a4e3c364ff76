//! Block dragging state machine.
//!
//! Each block is either idle or dragging. Pointer-down on a block header
//! records the offset between the pointer and the block's top-left corner;
//! every pointer move then writes `pointer - offset` into the diagram until
//! the pointer is released.
//!
//! While a block is dragging, pointer events must be observed anywhere on the
//! surface. That global observation is a resource obtained from a
//! [`PointerCapture`] and held as a guard inside the `Dragging` state, so
//! every way out of `Dragging` (release, removal of the block, dropping the
//! controller) drops the guard and detaches the listeners.

use crate::core::diagram::Diagram;
use crate::core::geometry::Position;
use std::collections::HashMap;

/// Source of global pointer observation.
///
/// `capture` starts delivering pointer move/up events for the whole surface;
/// dropping the returned guard stops it.
pub trait PointerCapture {
    type Guard;

    fn capture(&mut self, block_id: &str) -> Self::Guard;
}

/// Per-block drag state, owning the capture guard while dragging
#[derive(Debug)]
pub enum DragState<G> {
    Idle,
    Dragging {
        /// Pointer position minus block position at pointer-down
        offset: Position,
        guard: G,
    },
}

/// Observable phase of a block, without the guard
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragPhase {
    Idle,
    Dragging { offset: Position },
}

impl DragPhase {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragPhase::Dragging { .. })
    }
}

/// Drag state machine for all blocks of a diagram.
///
/// A single pointer drives it, so at most one block is dragging at a time.
pub struct BlockDragController<C: PointerCapture> {
    capture: C,
    states: HashMap<String, DragState<C::Guard>>,
}

impl<C: PointerCapture> BlockDragController<C> {
    pub fn new(capture: C) -> Self {
        Self {
            capture,
            states: HashMap::new(),
        }
    }

    /// Pointer pressed on a block header.
    ///
    /// Returns `false` when the block is not placed.
    pub fn pointer_down(&mut self, diagram: &Diagram, block_id: &str, pointer: Position) -> bool {
        let Some(position) = diagram.position(block_id) else {
            tracing::debug!("Pointer down on missing block '{}'", block_id);
            return false;
        };
        let offset = pointer - position;

        self.release_except(block_id);

        // A repeated press keeps the existing capture instead of stacking another
        if let Some(DragState::Dragging {
            offset: current, ..
        }) = self.states.get_mut(block_id)
        {
            *current = offset;
            return true;
        }

        let guard = self.capture.capture(block_id);
        self.states
            .insert(block_id.to_string(), DragState::Dragging { offset, guard });
        true
    }

    /// Pointer moved anywhere on the surface.
    ///
    /// Returns the block that moved and its new position. A block that was
    /// removed mid-drag is released instead of being written to.
    pub fn pointer_move(
        &mut self,
        diagram: &mut Diagram,
        pointer: Position,
    ) -> Option<(String, Position)> {
        let (block_id, offset) = self.active()?;
        let target = pointer - offset;

        if diagram.update_position(&block_id, target.x, target.y) {
            Some((block_id, target))
        } else {
            self.forget(&block_id);
            None
        }
    }

    /// Pointer released anywhere; ends the active drag.
    ///
    /// Returns the block that stopped dragging.
    pub fn pointer_up(&mut self) -> Option<String> {
        let (block_id, _) = self.active()?;
        self.states.insert(block_id.clone(), DragState::Idle);
        Some(block_id)
    }

    /// Drop all state of a block, releasing its capture if it was dragging
    pub fn forget(&mut self, block_id: &str) {
        if let Some(DragState::Dragging { .. }) = self.states.remove(block_id) {
            tracing::debug!("Released drag of block '{}'", block_id);
        }
    }

    pub fn phase(&self, block_id: &str) -> DragPhase {
        match self.states.get(block_id) {
            Some(DragState::Dragging { offset, .. }) => DragPhase::Dragging { offset: *offset },
            _ => DragPhase::Idle,
        }
    }

    pub fn is_dragging(&self, block_id: &str) -> bool {
        self.phase(block_id).is_dragging()
    }

    /// Id of the block currently being dragged
    pub fn active_block(&self) -> Option<&str> {
        self.states.iter().find_map(|(id, state)| match state {
            DragState::Dragging { .. } => Some(id.as_str()),
            DragState::Idle => None,
        })
    }

    pub fn capture(&self) -> &C {
        &self.capture
    }

    pub fn capture_mut(&mut self) -> &mut C {
        &mut self.capture
    }

    fn active(&self) -> Option<(String, Position)> {
        self.states.iter().find_map(|(id, state)| match state {
            DragState::Dragging { offset, .. } => Some((id.clone(), *offset)),
            DragState::Idle => None,
        })
    }

    fn release_except(&mut self, block_id: &str) {
        for (id, state) in self.states.iter_mut() {
            if id != block_id && matches!(state, DragState::Dragging { .. }) {
                *state = DragState::Idle;
            }
        }
    }
}

impl<C: PointerCapture + Default> Default for BlockDragController<C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}
