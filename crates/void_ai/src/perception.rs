//! Detection freshness per zone

use crate::capabilities::ActorId;
use serde::{Deserialize, Serialize};

/// What a detection zone is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneKind {
    /// Entities to engage
    Target,
    /// Entities to keep away from (ally followers)
    Threat,
}

/// Result of a detection update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionUpdate {
    /// Reported this tick
    Seen(ActorId),
    /// Unseen for at least the loss delay; the reference was cleared
    Lost(ActorId),
    /// Unseen, but still within the loss delay
    Retained(ActorId),
    /// No target held
    Empty,
}

/// Held target of one zone, with a time-since-seen counter
#[derive(Debug, Clone)]
pub struct DetectionState {
    kind: ZoneKind,
    target: Option<ActorId>,
    seen_this_tick: Option<ActorId>,
    time_since_seen: f32,
    loss_delay: f32,
}

impl DetectionState {
    pub fn new(kind: ZoneKind, loss_delay: f32) -> Self {
        Self {
            kind,
            target: None,
            seen_this_tick: None,
            time_since_seen: 0.0,
            loss_delay: loss_delay.max(0.0),
        }
    }

    pub fn kind(&self) -> ZoneKind {
        self.kind
    }

    /// The held target
    pub fn target(&self) -> Option<ActorId> {
        self.target
    }

    pub fn time_since_seen(&self) -> f32 {
        self.time_since_seen
    }

    pub fn loss_delay(&self) -> f32 {
        self.loss_delay
    }

    /// Latch `target` as seen this tick. The held target wins over newcomers.
    pub fn report_seen(&mut self, target: ActorId) {
        match self.seen_this_tick {
            Some(_) if self.target != Some(target) => {}
            _ => self.seen_this_tick = Some(target),
        }
    }

    /// Consume this tick's latch
    pub fn update(&mut self, delta_time: f32) -> DetectionUpdate {
        if let Some(seen) = self.seen_this_tick.take() {
            self.target = Some(seen);
            self.time_since_seen = 0.0;
            return DetectionUpdate::Seen(seen);
        }

        let Some(target) = self.target else {
            return DetectionUpdate::Empty;
        };

        self.time_since_seen += delta_time;
        if self.time_since_seen >= self.loss_delay {
            self.target = None;
            self.time_since_seen = 0.0;
            DetectionUpdate::Lost(target)
        } else {
            DetectionUpdate::Retained(target)
        }
    }

    /// Drop the held target and any latch
    pub fn clear(&mut self) {
        self.target = None;
        self.seen_this_tick = None;
        self.time_since_seen = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TARGET: ActorId = ActorId(2);

    #[test]
    fn test_seen_resets_counter() {
        let mut detection = DetectionState::new(ZoneKind::Target, 1.0);
        detection.report_seen(TARGET);
        assert_eq!(detection.update(0.1), DetectionUpdate::Seen(TARGET));
        assert_eq!(detection.update(0.5), DetectionUpdate::Retained(TARGET));

        detection.report_seen(TARGET);
        detection.update(0.1);
        assert_eq!(detection.time_since_seen(), 0.0);
    }

    #[test]
    fn test_held_target_wins() {
        let mut detection = DetectionState::new(ZoneKind::Target, 1.0);
        detection.report_seen(TARGET);
        detection.update(0.1);

        detection.report_seen(TARGET);
        detection.report_seen(ActorId(3));
        assert_eq!(detection.update(0.1), DetectionUpdate::Seen(TARGET));
    }

    #[test]
    fn test_lost_after_delay() {
        let mut detection = DetectionState::new(ZoneKind::Threat, 0.25);
        detection.report_seen(TARGET);
        detection.update(0.1);

        assert_eq!(detection.update(0.1), DetectionUpdate::Retained(TARGET));
        assert_eq!(detection.update(0.1), DetectionUpdate::Retained(TARGET));
        assert_eq!(detection.update(0.1), DetectionUpdate::Lost(TARGET));
        assert_eq!(detection.target(), None);
        assert_eq!(detection.update(0.1), DetectionUpdate::Empty);
    }

    proptest! {
        #[test]
        fn prop_target_retained_until_loss_delay(
            loss_ticks in 1u32..60,
            unseen_ticks in 0u32..120,
        ) {
            let dt = 0.05f32;
            let loss_delay = loss_ticks as f32 * dt;
            let mut detection = DetectionState::new(ZoneKind::Target, loss_delay);
            detection.report_seen(TARGET);
            detection.update(dt);

            for _ in 0..unseen_ticks {
                detection.update(dt);
            }

            // Allow one tick of float slack at the exact boundary
            let unseen = unseen_ticks as f32 * dt;
            if unseen + dt * 0.5 < loss_delay {
                prop_assert_eq!(detection.target(), Some(TARGET));
            } else if unseen > loss_delay + dt * 0.5 {
                prop_assert_eq!(detection.target(), None);
            }
        }
    }
}
