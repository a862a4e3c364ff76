//! Automatic placement of newly added table blocks.
//!
//! Candidate top-left corners form a grid over the viewport, scanned row by
//! row: earlier `y` wins, then earlier `x`. The first candidate whose block
//! footprint overlaps no existing block is chosen. The scan order is part of
//! the contract, so the same set of existing positions always yields the same
//! result regardless of the order they are supplied in.
//!
//! When every candidate is taken the engine returns `(padding, padding)` and
//! lets the new block overlap. That is a degenerate but accepted outcome, not
//! an error.

use crate::core::config::{BlockDimensions, Viewport};
use crate::core::geometry::{Position, Rect};

/// Find a free slot for a new block, or the fallback position when the grid is full
pub fn find_free_position<'a, I>(
    existing: I,
    dims: &BlockDimensions,
    viewport: &Viewport,
) -> Position
where
    I: IntoIterator<Item = &'a Position>,
{
    match try_find_free_position(existing, dims, viewport) {
        Some(position) => position,
        None => {
            let fallback = dims.fallback_position();
            tracing::debug!(
                "No free slot in {}x{} viewport, falling back to {}",
                viewport.width,
                viewport.height,
                fallback
            );
            fallback
        }
    }
}

/// Find the first grid candidate that overlaps no existing block
pub fn try_find_free_position<'a, I>(
    existing: I,
    dims: &BlockDimensions,
    viewport: &Viewport,
) -> Option<Position>
where
    I: IntoIterator<Item = &'a Position>,
{
    let occupied: Vec<Rect> = existing.into_iter().map(|p| dims.rect_at(*p)).collect();

    candidates(dims, viewport).find(|candidate| {
        let footprint = dims.rect_at(*candidate);
        !occupied.iter().any(|other| footprint.overlaps(other))
    })
}

/// Most grid candidates considered along one axis
pub const MAX_AXIS_SLOTS: usize = 4096;

/// Grid candidates in row-major order.
///
/// Rows start at `padding` and advance by `height + gap` while
/// `y < viewport.height - height`; columns likewise horizontally. Each axis
/// stops after [`MAX_AXIS_SLOTS`] candidates.
pub fn candidates(
    dims: &BlockDimensions,
    viewport: &Viewport,
) -> impl Iterator<Item = Position> {
    let step_x = dims.width + dims.gap;
    let step_y = dims.height + dims.gap;
    let max_x = viewport.width - dims.width;
    let max_y = viewport.height - dims.height;
    let padding = dims.padding;

    // A non-positive step would never leave the first candidate
    let rows = if step_x > 0.0 && step_y > 0.0 {
        Some(axis(padding, step_y, max_y))
    } else {
        None
    };

    rows.into_iter().flatten().flat_map(move |y| {
        axis(padding, step_x, max_x).map(move |x| Position::new(x, y))
    })
}

fn axis(start: f64, step: f64, limit: f64) -> impl Iterator<Item = f64> {
    let span = (limit - start) / step;
    let count = if span > 0.0 {
        (span.ceil() as usize).min(MAX_AXIS_SLOTS)
    } else {
        0
    };
    (0..count)
        .map(move |i| start + i as f64 * step)
        .filter(move |value| *value < limit)
}

/// Number of blocks the viewport can tile without overlap
pub fn capacity(dims: &BlockDimensions, viewport: &Viewport) -> usize {
    candidates(dims, viewport).count()
}
