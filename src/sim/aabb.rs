//! Axis-aligned bounding boxes for the flat, screen-space world
//!
//! Everything that can collide is a box (bird, pipe segments) or a circle
//! (coins). Overlap tests are edge-inclusive: an exact touch counts.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box, y growing downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Build from a top-left position and a size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Edge-inclusive box-vs-box overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Edge-inclusive box-vs-circle overlap (closest-point test)
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        let closest = center.clamp(self.min, self.max);
        (center - closest).length_squared() <= radius * radius
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_basic() {
        let a = Aabb::from_pos_size(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::from_pos_size(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        let c = Aabb::from_pos_size(Vec2::new(20.0, 20.0), Vec2::new(5.0, 5.0));

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_overlap_edge_touch_counts() {
        let a = Aabb::from_pos_size(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        // Shares only the x = 10 edge
        let b = Aabb::from_pos_size(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_circle_overlap() {
        let b = Aabb::from_pos_size(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));

        // Center inside
        assert!(b.overlaps_circle(Vec2::new(5.0, 5.0), 1.0));
        // Touching the right edge exactly
        assert!(b.overlaps_circle(Vec2::new(14.0, 5.0), 4.0));
        // Clear miss past a corner
        assert!(!b.overlaps_circle(Vec2::new(15.0, 15.0), 4.0));
    }

    #[test]
    fn test_contains_point() {
        let b = Aabb::from_pos_size(Vec2::new(2.0, 2.0), Vec2::new(4.0, 4.0));
        assert!(b.contains_point(Vec2::new(3.0, 3.0)));
        assert!(b.contains_point(Vec2::new(2.0, 2.0)));
        assert!(!b.contains_point(Vec2::new(6.5, 3.0)));
    }
}
