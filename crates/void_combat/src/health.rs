//! Health tracking

use crate::damage::{DamageInfo, DamageOutcome, Damageable};
use crate::error::{CombatError, Result};
use serde::{Deserialize, Serialize};

/// Hit points of a single actor.
///
/// Once dead, damage is ignored and death is reported exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthTracker {
    /// Current health, always within `0..=max`
    current: f32,
    /// Maximum health
    max: f32,
    /// Set on the call that brings health to zero
    is_dead: bool,
    /// Set once death handling has started
    #[serde(skip)]
    death_processed: bool,
}

impl HealthTracker {
    /// Create a tracker at full health
    pub fn new(max: f32) -> Self {
        Self {
            current: max.max(0.0),
            max: max.max(0.0),
            is_dead: false,
            death_processed: false,
        }
    }

    /// Create a tracker, rejecting a non-positive maximum
    pub fn try_new(max: f32) -> Result<Self> {
        if !(max > 0.0) || !max.is_finite() {
            return Err(CombatError::InvalidHealth(max));
        }
        Ok(Self::new(max))
    }

    /// Remove health. Negative amounts count as zero.
    pub fn apply_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.is_dead {
            log::debug!("damage of {} ignored: already dead", amount);
            return DamageOutcome::NONE;
        }

        // NaN also collapses to zero here
        let amount = amount.max(0.0);
        let previous = self.current;
        self.current = (self.current - amount).max(0.0);

        let died = self.current <= 0.0;
        if died {
            self.is_dead = true;
        }

        DamageOutcome {
            dealt: previous - self.current,
            died,
        }
    }

    /// Force death through the same once-only path as lethal damage
    pub fn kill(&mut self) -> DamageOutcome {
        if self.is_dead {
            return DamageOutcome::NONE;
        }
        let dealt = self.current;
        self.current = 0.0;
        self.is_dead = true;
        DamageOutcome { dealt, died: true }
    }

    /// Restore health up to max. Returns the amount healed.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if self.is_dead {
            return 0.0;
        }

        let old_health = self.current;
        self.current = (self.current + amount.max(0.0)).min(self.max);
        self.current - old_health
    }

    /// Mark death handling as started. Returns false if it already was.
    pub fn begin_death_processing(&mut self) -> bool {
        if !self.is_dead || self.death_processed {
            return false;
        }
        self.death_processed = true;
        true
    }

    /// Whether death handling has started
    pub fn death_processed(&self) -> bool {
        self.death_processed
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    /// Check if alive
    pub fn is_alive(&self) -> bool {
        !self.is_dead && self.current > 0.0
    }

    /// Health as a fraction (0.0 - 1.0)
    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            return 0.0;
        }
        self.current / self.max
    }

    /// Check if at full health
    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }
}

impl Default for HealthTracker {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl Damageable for HealthTracker {
    fn apply_damage(&mut self, damage: &DamageInfo) -> DamageOutcome {
        HealthTracker::apply_damage(self, damage.amount)
    }

    fn is_alive(&self) -> bool {
        HealthTracker::is_alive(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_health_tracker() {
        let mut health = HealthTracker::new(100.0);
        assert_eq!(health.current(), 100.0);
        assert!(health.is_alive());

        let outcome = health.apply_damage(30.0);
        assert_eq!(outcome.dealt, 30.0);
        assert!(!outcome.died);
        assert_eq!(health.current(), 70.0);
        assert!((health.fraction() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_death_reported_once() {
        let mut health = HealthTracker::new(50.0);

        let outcome = health.apply_damage(100.0);
        assert!(outcome.died);
        assert_eq!(outcome.dealt, 50.0);
        assert_eq!(health.current(), 0.0);

        let again = health.apply_damage(10.0);
        assert_eq!(again, DamageOutcome::NONE);
        assert_eq!(health.kill(), DamageOutcome::NONE);
        assert!(!health.is_alive());
    }

    #[test]
    fn test_negative_damage_is_zero() {
        let mut health = HealthTracker::new(10.0);
        let outcome = health.apply_damage(-5.0);
        assert_eq!(outcome.dealt, 0.0);
        assert_eq!(health.current(), 10.0);
    }

    #[test]
    fn test_kill_and_processing_guard() {
        let mut health = HealthTracker::new(10.0);
        assert!(!health.begin_death_processing());

        assert!(health.kill().died);
        assert!(health.begin_death_processing());
        assert!(!health.begin_death_processing());
        assert!(health.death_processed());
    }

    #[test]
    fn test_healing() {
        let mut health = HealthTracker::new(100.0);
        health.apply_damage(50.0);

        assert_eq!(health.heal(30.0), 30.0);
        assert_eq!(health.current(), 80.0);

        // Can't overheal
        assert_eq!(health.heal(50.0), 20.0);
        assert!(health.is_full());

        health.kill();
        assert_eq!(health.heal(10.0), 0.0);
    }

    #[test]
    fn test_try_new_rejects_non_positive() {
        assert_eq!(HealthTracker::try_new(0.0).unwrap_err(), CombatError::InvalidHealth(0.0));
        assert!(HealthTracker::try_new(-1.0).is_err());
        assert!(HealthTracker::try_new(f32::NAN).is_err());
        assert!(HealthTracker::try_new(5.0).is_ok());
    }

    proptest! {
        #[test]
        fn prop_health_never_negative_and_death_once(
            max in 1.0f32..500.0,
            hits in proptest::collection::vec(-50.0f32..200.0, 0..40),
        ) {
            let mut health = HealthTracker::new(max);
            let mut deaths = 0;
            for amount in hits {
                let outcome = health.apply_damage(amount);
                if outcome.died {
                    deaths += 1;
                }
                prop_assert!(health.current() >= 0.0);
                prop_assert!(health.current() <= max);
                prop_assert!(outcome.dealt >= 0.0);
            }
            prop_assert!(deaths <= 1);
            prop_assert_eq!(deaths == 1, health.is_dead());
        }
    }
}
