//! Overlap events

use serde::{Deserialize, Serialize};

/// Type of overlap event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverlapEventType {
    /// Entity entered the zone
    Enter,
    /// Entity left the zone
    Exit,
    /// Entity is inside the zone (every tick)
    Stay,
}

/// An overlap event reported by a [`crate::zone::ZoneTracker`]
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapEvent {
    /// Type of event
    pub event_type: OverlapEventType,
    /// Owner of the zone
    pub zone_owner: u64,
    /// The entity that overlapped
    pub other: u64,
    /// Time spent inside so far (for Stay and Exit events)
    pub time_inside: f32,
}

impl OverlapEvent {
    /// Create an enter event
    pub fn enter(zone_owner: u64, other: u64) -> Self {
        Self {
            event_type: OverlapEventType::Enter,
            zone_owner,
            other,
            time_inside: 0.0,
        }
    }

    /// Create an exit event
    pub fn exit(zone_owner: u64, other: u64, time_inside: f32) -> Self {
        Self {
            event_type: OverlapEventType::Exit,
            zone_owner,
            other,
            time_inside,
        }
    }

    /// Create a stay event
    pub fn stay(zone_owner: u64, other: u64, time_inside: f32) -> Self {
        Self {
            event_type: OverlapEventType::Stay,
            zone_owner,
            other,
            time_inside,
        }
    }

    pub fn is_enter(&self) -> bool {
        self.event_type == OverlapEventType::Enter
    }

    pub fn is_exit(&self) -> bool {
        self.event_type == OverlapEventType::Exit
    }

    pub fn is_stay(&self) -> bool {
        self.event_type == OverlapEventType::Stay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_creation() {
        let event = OverlapEvent::enter(1, 2);
        assert!(event.is_enter());
        assert_eq!(event.zone_owner, 1);
        assert_eq!(event.other, 2);

        let exit = OverlapEvent::exit(1, 2, 1.5);
        assert!(exit.is_exit());
        assert_eq!(exit.time_inside, 1.5);
    }
}
