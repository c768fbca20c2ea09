//! Axis-aligned rectangle geometry
//!
//! A rect is a pair of corners: `lower` (min x, min y) and `upper`
//! (max x, max y). Overlap rects computed from disjoint boxes come out
//! inverted (`upper < lower` on some axis), which is how "no overlap" is
//! signalled.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::midpoint;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub lower: Vec2,
    pub upper: Vec2,
}

impl Rect {
    pub fn new(lower: Vec2, upper: Vec2) -> Self {
        Self { lower, upper }
    }

    /// Rect from a lower-left position and an extent
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            lower: pos,
            upper: pos + size,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.upper.x - self.lower.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.upper.y - self.lower.y
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.upper - self.lower
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        midpoint(self.lower, self.upper)
    }

    /// Intersection rect; inverted when the boxes do not overlap
    pub fn overlap(&self, other: &Rect) -> Rect {
        Rect {
            lower: self.lower.max(other.lower),
            upper: self.upper.min(other.upper),
        }
    }

    /// Strictly positive area on both axes (touching edges don't count)
    pub fn has_area(&self) -> bool {
        self.lower.x < self.upper.x && self.lower.y < self.upper.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_dimensions() {
        let r = Rect::from_pos_size(Vec2::new(1.0, 2.0), Vec2::new(4.0, 6.0));
        assert_eq!(r.width(), 4.0);
        assert_eq!(r.height(), 6.0);
        assert_eq!(r.center(), Vec2::new(3.0, 5.0));
        assert_eq!(r.upper, Vec2::new(5.0, 8.0));
    }

    #[test]
    fn test_overlap_of_intersecting_rects() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(4.0, 4.0));
        let b = Rect::new(Vec2::new(3.0, 1.0), Vec2::new(6.0, 2.0));
        let o = a.overlap(&b);
        assert_eq!(o, Rect::new(Vec2::new(3.0, 1.0), Vec2::new(4.0, 2.0)));
        assert!(o.has_area());
    }

    #[test]
    fn test_disjoint_overlap_is_inverted() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        let b = Rect::new(Vec2::new(2.0, 0.0), Vec2::new(3.0, 1.0));
        let o = a.overlap(&b);
        assert!(o.width() < 0.0);
        assert!(!o.has_area());
    }

    #[test]
    fn test_shared_edge_has_no_area() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        let b = Rect::new(Vec2::new(1.0, 0.0), Vec2::new(2.0, 1.0));
        assert!(!a.overlap(&b).has_area());
    }
}
