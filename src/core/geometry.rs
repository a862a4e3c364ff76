//! Canvas geometry primitives shared by placement, dragging and rendering.

use derive_more::{Add, Display, Sub};
use serde::{Deserialize, Serialize};

/// A point in canvas pixel coordinates.
///
/// Used both for block top-left corners and for raw pointer coordinates,
/// so drag offsets fall out of plain subtraction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, Add, Sub, Display)]
#[display("({x}, {y})")]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub origin: Position,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(origin: Position, width: f64, height: f64) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.origin.x
    }

    pub fn top(&self) -> f64 {
        self.origin.y
    }

    pub fn right(&self) -> f64 {
        self.origin.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.origin.y + self.height
    }

    /// Strict-separation overlap test: rectangles that only share an edge
    /// do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_arithmetic() {
        let pointer = Position::new(50.0, 70.0);
        let origin = Position::new(10.0, 10.0);

        assert_eq!(pointer - origin, Position::new(40.0, 60.0));
        assert_eq!(origin + Position::new(40.0, 60.0), pointer);
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(230.0, 10.0).to_string(), "(230, 10)");
    }

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(Position::new(10.0, 20.0), 200.0, 160.0);

        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.top(), 20.0);
        assert_eq!(rect.right(), 210.0);
        assert_eq!(rect.bottom(), 180.0);
    }

    #[test]
    fn test_overlapping_rects() {
        let a = Rect::new(Position::new(0.0, 0.0), 100.0, 100.0);
        let b = Rect::new(Position::new(50.0, 50.0), 100.0, 100.0);

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_rects_do_not_overlap() {
        let a = Rect::new(Position::new(0.0, 0.0), 100.0, 100.0);
        let right = Rect::new(Position::new(100.0, 0.0), 100.0, 100.0);
        let below = Rect::new(Position::new(0.0, 100.0), 100.0, 100.0);

        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_separated_rects() {
        let a = Rect::new(Position::new(0.0, 0.0), 100.0, 100.0);
        let far = Rect::new(Position::new(500.0, 500.0), 100.0, 100.0);

        assert!(!a.overlaps(&far));
    }
}
