//! Axis-aligned bounding boxes given as center and full side lengths.

use glam::Vec2;

use crate::quadrant::Quadrant;

/// Axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub center: Vec2,
    /// Full side lengths.
    pub size: Vec2,
}

impl Bounds {
    #[inline]
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    #[inline]
    pub fn half_extent(&self) -> Vec2 {
        self.size / 2.0
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extent()
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extent()
    }

    /// Check if two boxes overlap.
    ///
    /// Strict on both axes: boxes that only share an edge do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Bounds) -> bool {
        let dist = (other.center - self.center).abs();
        let reach = (self.size + other.size) / 2.0;
        dist.x < reach.x && dist.y < reach.y
    }

    /// Check if `other` lies entirely inside this box (edges included).
    #[inline]
    pub fn contains(&self, other: &Bounds) -> bool {
        let dist = (other.center - self.center).abs() + other.half_extent();
        let half = self.half_extent();
        dist.x <= half.x && dist.y <= half.y
    }

    /// Check if a point lies inside this box (edges included).
    #[inline]
    pub fn contains_point(&self, point: Vec2) -> bool {
        let dist = (point - self.center).abs();
        let half = self.half_extent();
        dist.x <= half.x && dist.y <= half.y
    }

    /// The box covering `quadrant` after dividing this one.
    #[inline]
    pub fn quadrant(&self, quadrant: Quadrant) -> Bounds {
        let size = self.size / 2.0;
        Bounds::new(self.center + quadrant.direction() * size / 2.0, size)
    }
}
