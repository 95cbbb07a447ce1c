//! Axis-aligned rectangles

use crate::vector::Vec2;

/// Axis-aligned rectangle, used for box volumes and bounding regions
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Create from min and max corners
    #[inline]
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Create from center and half-extents
    #[inline]
    pub fn from_center_half_extents(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Square bounding box of a circle
    #[inline]
    pub fn from_circle(center: Vec2, radius: f32) -> Self {
        Self::from_center_half_extents(center, Vec2::new(radius, radius))
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    #[inline]
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x
            && point.y >= self.min.y && point.y <= self.max.y
    }

    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x
            && self.min.y <= other.max.y && self.max.y >= other.min.y
    }

    /// Closest point inside the rectangle to `point`
    #[inline]
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
        )
    }

    /// Whether a circle touches this rectangle
    #[inline]
    pub fn intersects_circle(&self, center: Vec2, radius: f32) -> bool {
        self.closest_point(center).distance_squared(center) <= radius * radius
    }

    /// Same rectangle moved by `offset`
    #[inline]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.min + offset, self.max + offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_and_intersects() {
        let a = Rect::from_center_half_extents(Vec2::ZERO, Vec2::new(1.0, 1.0));
        let b = Rect::from_center_half_extents(Vec2::new(1.5, 0.0), Vec2::new(1.0, 1.0));
        let c = Rect::from_center_half_extents(Vec2::new(5.0, 0.0), Vec2::new(1.0, 1.0));

        assert!(a.contains_point(Vec2::new(0.5, -0.5)));
        assert!(!a.contains_point(Vec2::new(1.5, 0.0)));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_rect_circle() {
        let rect = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0));
        assert!(rect.intersects_circle(Vec2::new(3.0, 1.0), 1.0));
        assert!(!rect.intersects_circle(Vec2::new(3.5, 1.0), 1.0));
    }
}
