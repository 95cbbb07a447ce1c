//! Void Combat - Health, Hit Volumes and Attacks
//!
//! This crate provides the combat primitives shared by AI actors.
//!
//! # Features
//!
//! - Health tracker with a once-only death report
//! - Single-use hit volumes mirrored by facing
//! - Attack definitions with per-attack and shared cooldowns
//! - Best-fit and random attack selection
//!
//! # Example
//!
//! ```ignore
//! use void_combat::prelude::*;
//!
//! let mut health = HealthTracker::new(100.0);
//! let outcome = health.apply_damage(25.0);
//! assert!(!outcome.died);
//!
//! let attacks = vec![
//!     AttackDefinition::new("jab", 5.0, 3.0),
//!     AttackDefinition::new("lunge", 8.0, 4.0),
//! ];
//! // Nothing reaches 5.0, so the longest attack is the best effort
//! assert_eq!(select_best_attack_for_distance(&attacks, 5.0), Some(1));
//! ```

pub mod attack;
pub mod damage;
pub mod error;
pub mod health;
pub mod hit_volume;

pub mod prelude {
    pub use crate::attack::{
        choose_among, select_best_attack_for_distance, AttackDefinition, AttackSelection, AttackSet,
        AttackSlot,
    };
    pub use crate::damage::{DamageInfo, DamageOutcome, Damageable};
    pub use crate::error::{CombatError, Result};
    pub use crate::health::HealthTracker;
    pub use crate::hit_volume::{HitPlacement, HitResult, HitVolume};
}

pub use prelude::*;
