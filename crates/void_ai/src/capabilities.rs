//! Capability contracts between the AI and the rest of the game

use serde::{Deserialize, Serialize};
use std::fmt;
use void_combat::Damageable;
use void_math::Vec2;

/// Identifier of anything in a combat world
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(pub u64);

impl ActorId {
    /// Raw id, as used by colliders
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor#{}", self.0)
    }
}

/// Side an entity fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Player,
    Ally,
    Hostile,
    Neutral,
}

impl Faction {
    /// Whether members of `self` attack members of `other`
    pub fn is_hostile_to(self, other: Faction) -> bool {
        matches!(
            (self, other),
            (Faction::Hostile, Faction::Player | Faction::Ally)
                | (Faction::Player | Faction::Ally, Faction::Hostile)
        )
    }
}

/// Something an actor can detect and attack
pub trait Targetable: Damageable {
    /// World position
    fn position(&self) -> Vec2;

    /// Radius of the body collider
    fn body_radius(&self) -> f32 {
        0.5
    }

    /// Faction used for hostility checks
    fn faction(&self) -> Faction;

    /// Turn to look at a horizontal position
    fn face_towards(&mut self, _x: f32) {}
}

/// Velocity-driven body
pub trait MovementBody {
    fn position(&self) -> Vec2;
    fn set_position(&mut self, position: Vec2);
    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);

    /// Kinematic bodies ignore collision response and gravity
    fn set_kinematic(&mut self, kinematic: bool);
    fn is_kinematic(&self) -> bool;

    fn set_gravity_enabled(&mut self, enabled: bool);
    fn gravity_enabled(&self) -> bool;

    /// Advance the body. Bodies driven by an external physics engine leave this empty.
    fn integrate(&mut self, _delta_time: f32) {}

    /// Set only the horizontal velocity
    fn set_horizontal_velocity(&mut self, x: f32) {
        let velocity = self.velocity();
        self.set_velocity(velocity.with_x(x));
    }
}

/// Kind of an animation parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    Trigger,
    Bool,
    Float,
}

/// Receives animation cues
pub trait AnimationCueSink {
    fn trigger(&mut self, cue: &str);
    fn reset_cue(&mut self, cue: &str);
    fn has_parameter(&self, name: &str, kind: ParameterKind) -> bool;
    fn set_visible(&mut self, visible: bool);
}

/// Fire-and-forget sound playback
pub trait AudioCueSink {
    fn play(&mut self, cue: &str, delay: f32);
}

/// Runs conversations; completion arrives as a `DialogueCompleted` event
pub trait DialogueCollaborator {
    fn start_conversation(&mut self, id: &str);
}

/// Quest bookkeeping
pub trait QuestCollaborator {
    fn complete_objective_by_title(&mut self, title: &str);
}

/// HUD visibility
pub trait UiCollaborator {
    fn hide_hud(&mut self);
    fn restore_hud(&mut self);
}
