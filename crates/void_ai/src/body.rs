//! Simple velocity-integrated body

use crate::capabilities::MovementBody;
use void_math::Vec2;

/// A body that moves by its velocity each tick.
/// Stands in for the game's physics body in headless simulation.
#[derive(Debug, Clone)]
pub struct PointBody {
    position: Vec2,
    velocity: Vec2,
    kinematic: bool,
    gravity_enabled: bool,
    /// Downward acceleration while gravity is enabled
    pub gravity: f32,
}

impl PointBody {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            kinematic: false,
            gravity_enabled: true,
            gravity: 0.0,
        }
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }
}

impl Default for PointBody {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

impl MovementBody for PointBody {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn set_kinematic(&mut self, kinematic: bool) {
        self.kinematic = kinematic;
    }

    fn is_kinematic(&self) -> bool {
        self.kinematic
    }

    fn set_gravity_enabled(&mut self, enabled: bool) {
        self.gravity_enabled = enabled;
    }

    fn gravity_enabled(&self) -> bool {
        self.gravity_enabled
    }

    fn integrate(&mut self, delta_time: f32) {
        if self.gravity_enabled && !self.kinematic {
            self.velocity.y -= self.gravity * delta_time;
        }
        self.position += self.velocity * delta_time;
    }
}
