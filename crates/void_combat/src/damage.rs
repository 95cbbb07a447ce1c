//! Damage information and the damageable capability

use serde::{Deserialize, Serialize};
use void_math::Vec2;

/// Information about a damage instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageInfo {
    /// Damage amount (negative amounts count as zero)
    pub amount: f32,
    /// Entity that caused the damage (if any)
    pub source_entity: Option<u64>,
    /// World position where damage was applied
    pub hit_point: Option<Vec2>,
}

impl DamageInfo {
    /// Create new damage info
    pub fn new(amount: f32) -> Self {
        Self {
            amount,
            source_entity: None,
            hit_point: None,
        }
    }

    /// Set the source entity
    pub fn with_source(mut self, entity: u64) -> Self {
        self.source_entity = Some(entity);
        self
    }

    /// Set the hit point
    pub fn with_hit_point(mut self, point: Vec2) -> Self {
        self.hit_point = Some(point);
        self
    }
}

impl Default for DamageInfo {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// What a damage call actually did
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DamageOutcome {
    /// Health actually removed
    pub dealt: f32,
    /// True only for the call that caused death
    pub died: bool,
}

impl DamageOutcome {
    /// Outcome of a call that changed nothing
    pub const NONE: Self = Self {
        dealt: 0.0,
        died: false,
    };
}

/// Anything that can receive hits
pub trait Damageable {
    /// Apply damage; a no-op once dead
    fn apply_damage(&mut self, damage: &DamageInfo) -> DamageOutcome;

    /// Whether the entity can still be hit
    fn is_alive(&self) -> bool;

    /// Called after a hit landed, with the attacker if known
    fn react_to_hit(&mut self, _source: Option<u64>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_info() {
        let damage = DamageInfo::new(50.0)
            .with_source(123)
            .with_hit_point(Vec2::new(1.0, 2.0));

        assert_eq!(damage.amount, 50.0);
        assert_eq!(damage.source_entity, Some(123));
        assert_eq!(damage.hit_point, Some(Vec2::new(1.0, 2.0)));
    }
}
