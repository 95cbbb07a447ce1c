//! Per-tick read-only view of the world

use crate::capabilities::{ActorId, Faction};
use std::collections::BTreeMap;
use void_math::Vec2;

/// What other actors may know about an entity during one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntitySnapshot {
    pub id: ActorId,
    pub position: Vec2,
    pub alive: bool,
    pub faction: Faction,
    pub radius: f32,
}

/// Positions and aliveness of every entity, frozen at the start of a tick.
/// Target references are resolved through this, never through live objects.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    entities: BTreeMap<ActorId, EntitySnapshot>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity: EntitySnapshot) {
        self.entities.insert(entity.id, entity);
    }

    pub fn get(&self, id: ActorId) -> Option<&EntitySnapshot> {
        self.entities.get(&id)
    }

    /// The entity, if it exists and is alive
    pub fn alive(&self, id: ActorId) -> Option<&EntitySnapshot> {
        self.entities.get(&id).filter(|entity| entity.alive)
    }

    pub fn is_alive(&self, id: ActorId) -> bool {
        self.alive(id).is_some()
    }

    pub fn position(&self, id: ActorId) -> Option<Vec2> {
        self.entities.get(&id).map(|entity| entity.position)
    }

    /// Whether `candidate` is something an entity of `faction` would target
    pub fn is_eligible(&self, owner: ActorId, faction: Faction, candidate: ActorId) -> bool {
        candidate != owner
            && self
                .alive(candidate)
                .is_some_and(|entity| faction.is_hostile_to(entity.faction))
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntitySnapshot> {
        self.entities.values()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(id: u64, x: f32, alive: bool, faction: Faction) -> EntitySnapshot {
        EntitySnapshot {
            id: ActorId(id),
            position: Vec2::new(x, 0.0),
            alive,
            faction,
            radius: 0.5,
        }
    }

    #[test]
    fn test_eligibility() {
        let mut snapshot = Snapshot::new();
        snapshot.insert(entity(1, 0.0, true, Faction::Hostile));
        snapshot.insert(entity(2, 5.0, true, Faction::Player));
        snapshot.insert(entity(3, 1.0, false, Faction::Player));
        snapshot.insert(entity(4, 1.0, true, Faction::Hostile));

        assert!(snapshot.is_eligible(ActorId(1), Faction::Hostile, ActorId(2)));
        assert!(!snapshot.is_eligible(ActorId(1), Faction::Hostile, ActorId(3)));
        assert!(!snapshot.is_eligible(ActorId(1), Faction::Hostile, ActorId(4)));
        assert!(!snapshot.is_eligible(ActorId(1), Faction::Hostile, ActorId(1)));
        assert!(!snapshot.is_eligible(ActorId(1), Faction::Hostile, ActorId(99)));
    }
}
