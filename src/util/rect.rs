//! Axis-aligned rectangles
//!
//! Every collision in the arena is a rectangle test: player bodies, platforms
//! and attack hitboxes. Overlap is strict, so rectangles that only share an
//! edge do not overlap.

use serde::{Deserialize, Serialize};

use crate::util::vec2::Vec2;

/// Rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_position(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict overlap on the x axis only
    #[inline]
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.left() < other.right() && self.right() > other.left()
    }

    /// Strict overlap on both axes
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.overlaps_horizontally(other)
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(250.0, 280.0, 600.0, 40.0);
        assert_eq!(r.left(), 250.0);
        assert_eq!(r.right(), 850.0);
        assert_eq!(r.top(), 280.0);
        assert_eq!(r.bottom(), 320.0);
    }

    #[test]
    fn test_overlap() {
        let a = Rect::new(0.0, 0.0, 30.0, 30.0);
        let b = Rect::new(20.0, 20.0, 30.0, 30.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 30.0, 30.0);
        let below = Rect::new(0.0, 30.0, 30.0, 30.0);
        let beside = Rect::new(30.0, 0.0, 30.0, 30.0);
        assert!(!a.overlaps(&below));
        assert!(!a.overlaps(&beside));
        assert!(a.overlaps_horizontally(&below));
        assert!(!a.overlaps_horizontally(&beside));
    }

    #[test]
    fn test_from_position() {
        let r = Rect::from_position(Vec2::new(100.0, 300.0), Vec2::new(30.0, 30.0));
        assert_eq!(r, Rect::new(100.0, 300.0, 30.0, 30.0));
    }
}
