//! Straight-line horizontal steering

use void_math::facing_sign;

/// Output of a steering step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SteeringOutput {
    /// Horizontal velocity to apply
    pub velocity_x: f32,
    /// Within stop distance of the destination
    pub arrived: bool,
}

impl SteeringOutput {
    /// Stand still
    pub fn zero() -> Self {
        Self::default()
    }

    /// Facing implied by the velocity, if moving
    pub fn facing(&self) -> Option<f32> {
        (self.velocity_x != 0.0).then(|| facing_sign(self.velocity_x))
    }
}

/// Move toward `target_x` at `speed`, stopping within `stop_distance`.
/// The velocity never carries the body past the destination in one tick.
pub fn arrive(
    current_x: f32,
    target_x: f32,
    speed: f32,
    stop_distance: f32,
    delta_time: f32,
) -> SteeringOutput {
    let delta = target_x - current_x;
    let distance = delta.abs();
    if distance <= stop_distance {
        return SteeringOutput {
            velocity_x: 0.0,
            arrived: true,
        };
    }

    let mut magnitude = speed.max(0.0);
    if delta_time > 0.0 {
        magnitude = magnitude.min(distance / delta_time);
    }
    SteeringOutput {
        velocity_x: magnitude.copysign(delta),
        arrived: false,
    }
}

/// Move toward `target_x` without an arrival radius
pub fn seek(current_x: f32, target_x: f32, speed: f32, delta_time: f32) -> SteeringOutput {
    arrive(current_x, target_x, speed, 0.0, delta_time)
}

/// Point `offset` behind the anchor, on the side away from `threat_x`.
/// Without a threat the follower keeps its current side.
pub fn follow_point(anchor_x: f32, follower_x: f32, threat_x: Option<f32>, offset: f32) -> f32 {
    let side = match threat_x {
        Some(threat) if threat != anchor_x => -facing_sign(threat - anchor_x),
        _ => facing_sign(follower_x - anchor_x),
    };
    anchor_x + side * offset
}

/// Next patrol waypoint: alternates between the two sides of `origin_x`
pub fn patrol_waypoint(origin_x: f32, leg: f32, distance: f32) -> f32 {
    origin_x + facing_sign(leg) * distance
}
