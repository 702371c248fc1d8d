//! Bounding-box overlap for the runner
//!
//! Sprites are tested with axis-aligned boxes. Rotated sprites use the box
//! enclosing the rotated rectangle, matching what the host engine reports.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of `size` centred on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(
            center.x - size.x / 2.0,
            center.y - size.y / 2.0,
            size.x,
            size.y,
        )
    }

    /// Bounds of a `size` rectangle centred on `center` and rotated by `rotation` radians
    pub fn rotated(center: Vec2, size: Vec2, rotation: f32) -> Self {
        if rotation == 0.0 {
            return Self::from_center(center, size);
        }
        let (sin, cos) = rotation.sin_cos();
        let extent = Vec2::new(
            (size.x * cos).abs() + (size.y * sin).abs(),
            (size.x * sin).abs() + (size.y * cos).abs(),
        );
        Self::from_center(center, extent)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Overlap test where each box only counts the first `leniency` of its
    /// width and height, so grazing contacts near the far edges are forgiven.
    pub fn overlaps_lenient(&self, other: &Rect, leniency: f32) -> bool {
        self.x < other.x + other.width * leniency
            && self.x + self.width * leniency > other.x
            && self.y < other.y + other.height * leniency
            && self.y + self.height * leniency > other.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_clear_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps_lenient(&b, 0.8));
        assert!(b.overlaps_lenient(&a, 0.8));
    }

    #[test]
    fn test_graze_forgiven() {
        // b starts at x=9: inside a's full width but past its 80% inset
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(9.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps_lenient(&b, 1.0));
        assert!(!a.overlaps_lenient(&b, 0.8));
    }

    #[test]
    fn test_disjoint() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(0.0, 50.0, 10.0, 10.0);
        assert!(!a.overlaps_lenient(&b, 0.8));
    }

    #[test]
    fn test_rotated_bounds_quarter_turn() {
        let r = Rect::rotated(Vec2::new(0.0, 0.0), Vec2::new(20.0, 10.0), FRAC_PI_2);
        assert!((r.width - 10.0).abs() < 1e-3);
        assert!((r.height - 20.0).abs() < 1e-3);
        assert!((r.x + 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_rotated_bounds_grow() {
        let size = Vec2::new(10.0, 10.0);
        let r = Rect::rotated(Vec2::ZERO, size, std::f32::consts::FRAC_PI_4);
        assert!(r.width > size.x);
        assert!(r.height > size.y);
    }
}
