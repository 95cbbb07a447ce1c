//! Enter/Exit/Stay tracking for a zone

use crate::events::OverlapEvent;
use std::collections::BTreeMap;

/// Tracks which entities are inside a zone across ticks
#[derive(Debug, Clone, Default)]
pub struct ZoneTracker {
    /// Owner of the zone
    zone_owner: u64,
    /// Entities currently inside, with time spent inside
    inside: BTreeMap<u64, f32>,
    /// Whether to emit Stay events
    pub emit_stay_events: bool,
}

impl ZoneTracker {
    /// Create a tracker for a zone owned by `zone_owner`
    pub fn new(zone_owner: u64) -> Self {
        Self {
            zone_owner,
            inside: BTreeMap::new(),
            emit_stay_events: false,
        }
    }

    /// Also report entities that remain inside
    pub fn with_stay_events(mut self) -> Self {
        self.emit_stay_events = true;
        self
    }

    /// Owner of the zone
    pub fn zone_owner(&self) -> u64 {
        self.zone_owner
    }

    /// Feed the set of entities overlapping this tick, returning the resulting events.
    /// Exits come first, then enters and stays in id order.
    pub fn update(&mut self, current: &[u64], dt: f32) -> Vec<OverlapEvent> {
        let mut events = Vec::new();

        let exited: Vec<u64> = self
            .inside
            .keys()
            .filter(|id| !current.contains(id))
            .copied()
            .collect();
        for id in exited {
            if let Some(time_inside) = self.inside.remove(&id) {
                log::trace!("zone {}: {} exited", self.zone_owner, id);
                events.push(OverlapEvent::exit(self.zone_owner, id, time_inside));
            }
        }

        let mut sorted: Vec<u64> = current.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        for id in sorted {
            match self.inside.get_mut(&id) {
                Some(time_inside) => {
                    *time_inside += dt;
                    if self.emit_stay_events {
                        events.push(OverlapEvent::stay(self.zone_owner, id, *time_inside));
                    }
                }
                None => {
                    self.inside.insert(id, 0.0);
                    log::trace!("zone {}: {} entered", self.zone_owner, id);
                    events.push(OverlapEvent::enter(self.zone_owner, id));
                }
            }
        }

        events
    }

    /// Whether `id` is inside the zone
    pub fn contains(&self, id: u64) -> bool {
        self.inside.contains_key(&id)
    }

    /// Entities inside the zone
    pub fn inside(&self) -> impl Iterator<Item = u64> + '_ {
        self.inside.keys().copied()
    }

    /// Number of entities inside
    pub fn count(&self) -> usize {
        self.inside.len()
    }

    /// Forget everything inside without emitting exits
    pub fn clear(&mut self) {
        self.inside.clear();
    }
}
