//! Void AI - combat actors for 2D action games
//!
//! Actors detect hostile targets, chase them, swing attacks with delayed hit
//! windows, react to damage and run a death sequence. [`CombatWorld`] owns
//! every actor and advances them in a fixed, deterministic order.
//!
//! # Example
//!
//! ```ignore
//! use void_ai::prelude::*;
//!
//! let mut world = CombatWorld::with_seed(7);
//! let player = world.add_target(Box::new(TestTarget::new(Vec2::new(8.0, 0.0), 100.0)));
//! let profile = ActorProfile::new(ActorVariant::MeleePatroller)
//!     .with_attack(AttackDefinition::new("slash", 10.0, 2.0));
//! let grunt = world.spawn_actor(profile, Vec2::ZERO, Box::new(RecordingAnimator::new()))?;
//! world.tick(1.0 / 60.0);
//! ```

pub mod actor;
pub mod audio;
pub mod body;
pub mod capabilities;
pub mod death;
pub mod error;
pub mod events;
pub mod perception;
pub mod profile;
pub mod scheduler;
pub mod snapshot;
pub mod state;
pub mod steering;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod world;

pub mod prelude {
    pub use crate::actor::{ActorColliders, CombatActor, ExecutingAttack, TickContext};
    pub use crate::audio::{ProximityAudio, SilentAudio};
    pub use crate::body::PointBody;
    pub use crate::capabilities::{
        ActorId, AnimationCueSink, AudioCueSink, DialogueCollaborator, Faction, MovementBody,
        ParameterKind, QuestCollaborator, Targetable, UiCollaborator,
    };
    pub use crate::death::{DeathPhase, DeathSequencer, DeathStep};
    pub use crate::error::{AiError, Result};
    pub use crate::events::{ActorDied, BossDefeated, DialogueCompleted, TargetAcquired};
    pub use crate::perception::{DetectionState, DetectionUpdate, ZoneKind};
    pub use crate::profile::{ActorProfile, ActorVariant};
    pub use crate::scheduler::{Scheduler, TimerKey, TimerPurpose};
    pub use crate::snapshot::{EntitySnapshot, Snapshot};
    pub use crate::state::{CombatState, StateMachine};
    pub use crate::steering::SteeringOutput;
    pub use crate::world::CombatWorld;
    pub use void_combat::{
        AttackDefinition, AttackSelection, DamageInfo, DamageOutcome, Damageable, HitPlacement,
    };
    pub use void_math::Vec2;
}

pub use prelude::*;
