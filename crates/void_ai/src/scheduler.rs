//! Cancellable delayed callbacks keyed by owner and purpose

use crate::capabilities::ActorId;

/// Why a timer exists. One pending timer per owner and purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimerPurpose {
    /// Turn the hit volume on
    HitOn,
    /// Turn the hit volume off
    HitOff,
    /// Release the actor from the current attack
    AttackRelease,
}

impl TimerPurpose {
    /// Timers that would make a hit volume deal damage
    pub fn is_hit_window(self) -> bool {
        matches!(self, Self::HitOn | Self::HitOff)
    }
}

/// Key of a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerKey {
    pub owner: ActorId,
    pub purpose: TimerPurpose,
}

#[derive(Debug, Clone)]
struct PendingTimer {
    key: TimerKey,
    fire_at: f64,
    sequence: u64,
}

// Absorbs f32 -> f64 rounding of delays and tick lengths
const FIRE_TOLERANCE: f64 = 1e-6;

/// Timer queue advanced once per tick.
///
/// Scheduling a key that is already pending replaces it.
#[derive(Debug, Default)]
pub struct Scheduler {
    now: f64,
    timers: Vec<PendingTimer>,
    next_sequence: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed time
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Fire `purpose` for `owner` after `delay` seconds, replacing any pending one
    pub fn schedule(&mut self, owner: ActorId, purpose: TimerPurpose, delay: f32) {
        let key = TimerKey { owner, purpose };
        if self.cancel(owner, purpose) {
            log::trace!("timer {:?} replaced", key);
        }
        self.timers.push(PendingTimer {
            key,
            fire_at: self.now + delay.max(0.0) as f64,
            sequence: self.next_sequence,
        });
        self.next_sequence += 1;
    }

    /// Cancel one timer. Returns whether it was pending.
    pub fn cancel(&mut self, owner: ActorId, purpose: TimerPurpose) -> bool {
        let before = self.timers.len();
        self.timers
            .retain(|timer| timer.key.owner != owner || timer.key.purpose != purpose);
        self.timers.len() != before
    }

    /// Cancel every timer of `owner` matching `predicate`
    pub fn cancel_where<F>(&mut self, owner: ActorId, predicate: F) -> usize
    where
        F: Fn(TimerPurpose) -> bool,
    {
        let before = self.timers.len();
        self.timers
            .retain(|timer| timer.key.owner != owner || !predicate(timer.key.purpose));
        before - self.timers.len()
    }

    /// Cancel every timer of `owner`
    pub fn cancel_owner(&mut self, owner: ActorId) -> usize {
        self.cancel_where(owner, |_| true)
    }

    pub fn is_pending(&self, owner: ActorId, purpose: TimerPurpose) -> bool {
        self.timers
            .iter()
            .any(|timer| timer.key.owner == owner && timer.key.purpose == purpose)
    }

    /// Number of timers pending for `owner`
    pub fn pending_for(&self, owner: ActorId) -> usize {
        self.timers.iter().filter(|timer| timer.key.owner == owner).count()
    }

    /// Seconds until a timer fires
    pub fn remaining(&self, owner: ActorId, purpose: TimerPurpose) -> Option<f32> {
        self.timers
            .iter()
            .find(|timer| timer.key.owner == owner && timer.key.purpose == purpose)
            .map(|timer| (timer.fire_at - self.now).max(0.0) as f32)
    }

    /// Advance time and return the timers that fired, earliest first
    pub fn advance(&mut self, delta_time: f32) -> Vec<TimerKey> {
        self.now += delta_time.max(0.0) as f64;
        let now = self.now;

        let (mut fired, pending): (Vec<PendingTimer>, Vec<PendingTimer>) = self
            .timers
            .drain(..)
            .partition(|timer| timer.fire_at <= now + FIRE_TOLERANCE);
        self.timers = pending;

        fired.sort_by(|a, b| {
            a.fire_at
                .partial_cmp(&b.fire_at)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.sequence.cmp(&b.sequence))
        });
        fired.into_iter().map(|timer| timer.key).collect()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ActorId = ActorId(1);
    const B: ActorId = ActorId(2);

    #[test]
    fn test_fires_after_delay() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(A, TimerPurpose::HitOn, 0.3);

        assert!(scheduler.advance(0.1).is_empty());
        assert!(scheduler.advance(0.1).is_empty());
        let fired = scheduler.advance(0.1);
        assert_eq!(fired, vec![TimerKey { owner: A, purpose: TimerPurpose::HitOn }]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_reschedule_replaces() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(A, TimerPurpose::HitOn, 0.1);
        scheduler.schedule(A, TimerPurpose::HitOn, 0.5);
        assert_eq!(scheduler.len(), 1);

        assert!(scheduler.advance(0.2).is_empty());
        assert_eq!(scheduler.advance(0.3).len(), 1);
    }

    #[test]
    fn test_cancel_owner_leaves_others() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(A, TimerPurpose::HitOn, 0.1);
        scheduler.schedule(A, TimerPurpose::AttackRelease, 0.2);
        scheduler.schedule(B, TimerPurpose::HitOn, 0.1);

        assert_eq!(scheduler.cancel_owner(A), 2);
        assert_eq!(scheduler.pending_for(A), 0);

        let fired = scheduler.advance(1.0);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].owner, B);
    }

    #[test]
    fn test_cancel_hit_window_only() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(A, TimerPurpose::HitOn, 0.1);
        scheduler.schedule(A, TimerPurpose::HitOff, 0.2);
        scheduler.schedule(A, TimerPurpose::AttackRelease, 0.3);

        assert_eq!(scheduler.cancel_where(A, TimerPurpose::is_hit_window), 2);
        assert!(scheduler.is_pending(A, TimerPurpose::AttackRelease));
        assert!(!scheduler.cancel(A, TimerPurpose::HitOn));
    }

    #[test]
    fn test_fired_in_time_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(A, TimerPurpose::AttackRelease, 0.6);
        scheduler.schedule(A, TimerPurpose::HitOff, 0.5);
        scheduler.schedule(A, TimerPurpose::HitOn, 0.0);

        let purposes: Vec<TimerPurpose> =
            scheduler.advance(1.0).into_iter().map(|k| k.purpose).collect();
        assert_eq!(
            purposes,
            vec![TimerPurpose::HitOn, TimerPurpose::HitOff, TimerPurpose::AttackRelease]
        );
    }
}
