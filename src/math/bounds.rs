//! Axis-aligned 2D bounds

use crate::core::types::Vec2;

/// Axis-aligned rectangle in surface coordinates (y grows downward)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Create bounds from min and max corners
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Create bounds from center and half-extents
    pub fn from_center_half_extent(center: Vec2, half_extent: Vec2) -> Self {
        Self {
            min: center - half_extent,
            max: center + half_extent,
        }
    }

    /// Square of side `width` centered at `center`
    pub fn square(center: Vec2, width: f32) -> Self {
        Self::from_center_half_extent(center, Vec2::splat(width / 2.0))
    }

    /// Check if point is strictly inside the bounds; a point on an edge is outside
    pub fn strictly_contains(&self, p: Vec2) -> bool {
        p.x > self.min.x && p.x < self.max.x &&
        p.y > self.min.y && p.y < self.max.y
    }
}
