//! Trigger volume shapes

use serde::{Deserialize, Serialize};
use void_math::{Rect, Vec2};

/// Trigger volume shapes, defined around a local origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TriggerVolume {
    /// Circle
    Circle {
        /// Radius
        radius: f32,
    },
    /// Axis-aligned box
    Box {
        /// Half-extents (width/2, height/2)
        half_extents: Vec2,
    },
}

impl TriggerVolume {
    /// Create a circle volume
    pub fn circle(radius: f32) -> Self {
        Self::Circle { radius }
    }

    /// Create a box volume from full width and height
    pub fn box_shape(width: f32, height: f32) -> Self {
        Self::Box {
            half_extents: Vec2::new(width / 2.0, height / 2.0),
        }
    }

    /// Check if a point (relative to the volume origin) is inside
    pub fn contains_point(&self, point: Vec2) -> bool {
        match self {
            Self::Circle { radius } => point.length_squared() <= radius * radius,
            Self::Box { half_extents } => {
                point.x.abs() <= half_extents.x && point.y.abs() <= half_extents.y
            }
        }
    }

    /// Bounding rectangle when placed at `position`
    pub fn bounding_rect(&self, position: Vec2) -> Rect {
        match self {
            Self::Circle { radius } => Rect::from_circle(position, *radius),
            Self::Box { half_extents } => Rect::from_center_half_extents(position, *half_extents),
        }
    }

    /// Exact overlap test between two placed volumes
    pub fn overlaps(&self, position: Vec2, other: &TriggerVolume, other_position: Vec2) -> bool {
        match (self, other) {
            (Self::Circle { radius: a }, Self::Circle { radius: b }) => {
                let reach = a + b;
                position.distance_squared(other_position) <= reach * reach
            }
            (Self::Box { .. }, Self::Box { .. }) => self
                .bounding_rect(position)
                .intersects(&other.bounding_rect(other_position)),
            (Self::Circle { radius }, Self::Box { .. }) => other
                .bounding_rect(other_position)
                .intersects_circle(position, *radius),
            (Self::Box { .. }, Self::Circle { radius }) => self
                .bounding_rect(position)
                .intersects_circle(other_position, *radius),
        }
    }

    /// Largest distance from the origin to the volume boundary
    pub fn reach(&self) -> f32 {
        match self {
            Self::Circle { radius } => *radius,
            Self::Box { half_extents } => half_extents.length(),
        }
    }
}

impl Default for TriggerVolume {
    fn default() -> Self {
        Self::circle(0.5)
    }
}
