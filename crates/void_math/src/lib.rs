//! # void_math - 2D Gameplay Math
//!
//! Small, copyable math primitives for side-view simulation:
//! - [`Vec2`] for positions, offsets and velocities
//! - [`Rect`] for axis-aligned regions and bounding boxes
//!
//! The x axis is horizontal (facing is the sign of x), the y axis points up.

pub mod rect;
pub mod vector;

pub use rect::*;
pub use vector::*;

/// Common math constants
pub mod consts {
    pub const EPSILON: f32 = 1e-6;
}

/// Sign used for facing: +1 for non-negative input, -1 otherwise
#[inline]
pub fn facing_sign(value: f32) -> f32 {
    if value < 0.0 { -1.0 } else { 1.0 }
}

pub mod prelude {
    pub use crate::rect::Rect;
    pub use crate::vector::Vec2;
    pub use crate::facing_sign;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_sign() {
        assert_eq!(facing_sign(0.0), 1.0);
        assert_eq!(facing_sign(2.5), 1.0);
        assert_eq!(facing_sign(-0.1), -1.0);
    }
}
