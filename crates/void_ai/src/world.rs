//! The combat world: owns actors, targets, colliders and timers, and
//! advances them in a fixed order each tick.

use crate::actor::{ActorColliders, CombatActor, TickContext};
use crate::audio::{ProximityAudio, SilentAudio};
use crate::capabilities::{
    ActorId, AnimationCueSink, AudioCueSink, Faction, QuestCollaborator, Targetable,
};
use crate::error::{AiError, Result};
use crate::events::{ActorDied, BossDefeated};
use crate::perception::ZoneKind;
use crate::profile::ActorProfile;
use crate::scheduler::{Scheduler, TimerPurpose};
use crate::snapshot::{EntitySnapshot, Snapshot};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use void_combat::{DamageInfo, DamageOutcome, Damageable, HitResult};
use void_event::EventBus;
use void_math::Vec2;
use void_triggers::{
    Collider, ColliderHandle, ColliderSet, OverlapEventType, TriggerFilter, TriggerVolume,
    VolumeTag, ZoneTracker,
};

const DEFAULT_AUDIBLE_RADIUS: f32 = 30.0;

/// Single-threaded combat simulation.
///
/// Each tick runs: snapshot, actor ticks, timers, hit resolution, deaths,
/// body integration, event delivery.
pub struct CombatWorld {
    actors: BTreeMap<ActorId, CombatActor>,
    targets: BTreeMap<ActorId, Box<dyn Targetable>>,
    target_colliders: BTreeMap<ActorId, ColliderHandle>,
    colliders: ColliderSet,
    zones: BTreeMap<ColliderHandle, ZoneTracker>,
    scheduler: Scheduler,
    events: EventBus,
    audio: ProximityAudio,
    quest: Option<Box<dyn QuestCollaborator>>,
    listener: Option<ActorId>,
    rng: ChaCha8Rng,
    next_id: u64,
    tick_count: u64,
}

impl CombatWorld {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// World with deterministic attack selection
    pub fn with_seed(seed: u64) -> Self {
        Self {
            actors: BTreeMap::new(),
            targets: BTreeMap::new(),
            target_colliders: BTreeMap::new(),
            colliders: ColliderSet::new(),
            zones: BTreeMap::new(),
            scheduler: Scheduler::new(),
            events: EventBus::new(),
            audio: ProximityAudio::new(Box::new(SilentAudio), DEFAULT_AUDIBLE_RADIUS),
            quest: None,
            listener: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_id: 1,
            tick_count: 0,
        }
    }

    pub fn with_audio(mut self, sink: Box<dyn AudioCueSink>, audible_radius: f32) -> Self {
        self.audio = ProximityAudio::new(sink, audible_radius);
        self
    }

    pub fn with_quest(mut self, quest: Box<dyn QuestCollaborator>) -> Self {
        self.quest = Some(quest);
        self
    }

    /// Reserve an id for an actor built outside the world
    pub fn allocate_id(&mut self) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Build and register an actor from a profile
    pub fn spawn_actor(
        &mut self,
        profile: ActorProfile,
        position: Vec2,
        animator: Box<dyn AnimationCueSink>,
    ) -> Result<ActorId> {
        let id = self.allocate_id();
        let actor = CombatActor::new(id, profile, position, animator)?;
        self.insert_actor(actor)
    }

    /// Register a pre-built actor and its colliders
    pub fn insert_actor(&mut self, mut actor: CombatActor) -> Result<ActorId> {
        let id = actor.id();
        if self.actors.contains_key(&id) || self.targets.contains_key(&id) {
            return Err(AiError::InvalidProfile(format!("{} is already registered", id)));
        }
        self.next_id = self.next_id.max(id.raw() + 1);

        let owner = id.raw();
        let profile = actor.profile();
        let body = self.colliders.insert(Collider::new(
            owner,
            VolumeTag::Body,
            TriggerVolume::circle(profile.body_radius),
        ));
        let detection = self.colliders.insert(Collider::new(
            owner,
            VolumeTag::Detection,
            TriggerVolume::circle(profile.detection_radius),
        ));
        let threat = profile.threat_radius.map(|radius| {
            self.colliders.insert(Collider::new(
                owner,
                VolumeTag::Threat,
                TriggerVolume::circle(radius),
            ))
        });
        let hit = self.colliders.insert(actor.hit_volume().collider(actor.facing()));
        for zone in std::iter::once(detection).chain(threat) {
            self.zones.insert(zone, ZoneTracker::new(owner));
        }

        actor.attach_colliders(ActorColliders {
            body,
            detection,
            threat,
            hit,
        });
        self.colliders.set_owner_position(owner, actor.position());

        log::info!("spawned {} '{}' as {:?}", id, actor.profile().name, actor.variant());
        self.actors.insert(id, actor);
        Ok(id)
    }

    /// Register an externally driven entity, usually the player
    pub fn add_target(&mut self, target: Box<dyn Targetable>) -> ActorId {
        let id = self.allocate_id();
        let collider = self.colliders.insert(Collider::new(
            id.raw(),
            VolumeTag::Body,
            TriggerVolume::circle(target.body_radius()),
        ));
        self.colliders.set_owner_position(id.raw(), target.position());
        self.target_colliders.insert(id, collider);
        self.targets.insert(id, target);
        id
    }

    pub fn set_anchor(&mut self, actor: ActorId, anchor: Option<ActorId>) -> Result<()> {
        self.actor_mut(actor)
            .ok_or(AiError::UnknownActor(actor))?
            .set_anchor(anchor);
        Ok(())
    }

    /// Bind the entity whose position gates proximity audio.
    /// `None` or an unknown id disables attenuation.
    pub fn bind_audio_listener(&mut self, listener: Option<ActorId>) {
        let position = listener.and_then(|id| self.entity_position(id));
        self.listener = if position.is_some() { listener } else { None };
        self.audio.bind_listener(position);
    }

    pub fn actor(&self, id: ActorId) -> Option<&CombatActor> {
        self.actors.get(&id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut CombatActor> {
        self.actors.get_mut(&id)
    }

    pub fn actors(&self) -> impl Iterator<Item = &CombatActor> {
        self.actors.values()
    }

    pub fn target(&self, id: ActorId) -> Option<&dyn Targetable> {
        self.targets.get(&id).map(|target| &**target)
    }

    pub fn entity_position(&self, id: ActorId) -> Option<Vec2> {
        self.actors
            .get(&id)
            .map(|actor| actor.position())
            .or_else(|| self.targets.get(&id).map(|target| target.position()))
    }

    /// Live aliveness of an actor or target
    pub fn is_alive(&self, id: ActorId) -> bool {
        match self.actors.get(&id) {
            Some(actor) => actor.is_alive(),
            None => self.targets.get(&id).is_some_and(|target| target.is_alive()),
        }
    }

    fn faction_of(&self, id: ActorId) -> Option<Faction> {
        self.actors
            .get(&id)
            .map(|actor| actor.faction())
            .or_else(|| self.targets.get(&id).map(|target| target.faction()))
    }

    /// Occupancy of an actor's target zone
    pub fn detection_zone(&self, id: ActorId) -> Option<&ZoneTracker> {
        let handles = self.actors.get(&id)?.colliders()?;
        self.zones.get(&handles.detection)
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn colliders(&self) -> &ColliderSet {
        &self.colliders
    }

    pub fn audio(&self) -> &ProximityAudio {
        &self.audio
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Deal damage from outside the world, such as a player swing
    pub fn damage(
        &mut self,
        id: ActorId,
        amount: f32,
        source: Option<ActorId>,
    ) -> Result<DamageOutcome> {
        let mut info = DamageInfo::new(amount);
        if let Some(source) = source {
            info = info.with_source(source.raw());
        }

        let outcome = if let Some(actor) = self.actors.get_mut(&id) {
            let outcome = actor.apply_damage(&info);
            actor.react_to_hit(info.source_entity);
            outcome
        } else if let Some(target) = self.targets.get_mut(&id) {
            let outcome = target.apply_damage(&info);
            target.react_to_hit(info.source_entity);
            outcome
        } else {
            return Err(AiError::UnknownActor(id));
        };

        self.flush_invalidated_timers();
        self.process_deaths();
        Ok(outcome)
    }

    /// Kill an actor outright. Returns false if it was already dead.
    pub fn kill(&mut self, id: ActorId) -> Result<bool> {
        let actor = self.actors.get_mut(&id).ok_or(AiError::UnknownActor(id))?;
        actor.health_mut().kill();
        let started = self.start_death(id);
        self.cancel_attacks_on_dead_targets();
        Ok(started)
    }

    pub fn suppress_combat_behaviors(&mut self, id: ActorId) -> Result<()> {
        self.actors
            .get_mut(&id)
            .ok_or(AiError::UnknownActor(id))?
            .suppress_combat_behaviors();
        self.flush_invalidated_timers();
        Ok(())
    }

    pub fn restore_combat_behaviors(&mut self, id: ActorId) -> Result<()> {
        self.actors
            .get_mut(&id)
            .ok_or(AiError::UnknownActor(id))?
            .restore_combat_behaviors();
        Ok(())
    }

    /// Scripted walk; only honored while the actor is suppressed
    pub fn walk_to(&mut self, id: ActorId, x: f32, speed: f32) -> Result<bool> {
        Ok(self.actors.get_mut(&id).ok_or(AiError::UnknownActor(id))?.walk_to(x, speed))
    }

    pub fn face_towards(&mut self, id: ActorId, x: f32) -> Result<()> {
        if let Some(actor) = self.actors.get_mut(&id) {
            actor.face_towards(x);
        } else {
            self.targets
                .get_mut(&id)
                .ok_or(AiError::UnknownActor(id))?
                .face_towards(x);
        }
        Ok(())
    }

    pub fn is_walking(&self, id: ActorId) -> bool {
        self.actors.get(&id).is_some_and(|actor| actor.is_walking())
    }

    /// Advance the simulation by `delta_time` seconds
    pub fn tick(&mut self, delta_time: f32) {
        let snapshot = self.take_snapshot();

        let ids: Vec<ActorId> = self.actors.keys().copied().collect();
        for id in ids {
            self.report_detections(id, &snapshot, delta_time);

            let Some(actor) = self.actors.get_mut(&id) else {
                continue;
            };
            let mut ctx = TickContext {
                delta_time,
                snapshot: &snapshot,
                scheduler: &mut self.scheduler,
                audio: &mut self.audio,
                quest: self.quest.as_deref_mut(),
                events: &self.events,
                rng: &mut self.rng,
            };
            actor.tick(&mut ctx);
        }
        self.flush_invalidated_timers();
        self.cancel_attacks_on_dead_targets();

        for key in self.scheduler.advance(delta_time) {
            // A window that opened during this advance lands before it closes
            if matches!(key.purpose, TimerPurpose::HitOff | TimerPurpose::AttackRelease)
                && self
                    .actors
                    .get(&key.owner)
                    .is_some_and(|actor| actor.hit_volume().is_armed())
            {
                self.sync_hit_colliders();
                self.resolve_hits(&snapshot);
            }

            let target_alive = self
                .actors
                .get(&key.owner)
                .and_then(|actor| actor.executing_attack())
                .is_some_and(|executing| self.is_alive(executing.target));
            if let Some(actor) = self.actors.get_mut(&key.owner) {
                actor.on_timer(key.purpose, target_alive);
            }
        }
        self.sync_hit_colliders();

        self.resolve_hits(&snapshot);
        self.flush_invalidated_timers();
        self.process_deaths();

        for actor in self.actors.values_mut().filter(|actor| actor.is_active()) {
            actor.body.integrate(delta_time);
        }

        self.events.process();
        self.tick_count += 1;
    }

    fn take_snapshot(&mut self) -> Snapshot {
        let mut snapshot = Snapshot::new();
        for (id, actor) in self.actors.iter().filter(|(_, actor)| actor.is_active()) {
            snapshot.insert(EntitySnapshot {
                id: *id,
                position: actor.position(),
                alive: actor.is_alive(),
                faction: actor.faction(),
                radius: actor.profile().body_radius,
            });
        }
        for (id, target) in &self.targets {
            snapshot.insert(EntitySnapshot {
                id: *id,
                position: target.position(),
                alive: target.is_alive(),
                faction: target.faction(),
                radius: target.body_radius(),
            });
        }

        for entity in snapshot.iter() {
            self.colliders.set_owner_position(entity.id.raw(), entity.position);
        }
        for (id, handle) in &self.target_colliders {
            let alive = snapshot.is_alive(*id);
            self.colliders.set_enabled(*handle, alive);
        }
        self.sync_hit_colliders();

        if let Some(position) = self.listener.and_then(|listener| snapshot.position(listener)) {
            self.audio.set_listener_position(position);
        }
        snapshot
    }

    /// Mirror each hit volume's placement and activation into its collider
    fn sync_hit_colliders(&mut self) {
        for actor in self.actors.values() {
            let Some(handles) = actor.colliders() else {
                continue;
            };
            let (offset, radius) = actor.hit_collider_shape();
            if let Some(collider) = self.colliders.get_mut(handles.hit) {
                collider.offset = offset;
                collider.volume = TriggerVolume::circle(radius);
                collider.enabled = actor.hit_volume().is_active() && !actor.is_dead();
            }
        }
    }

    /// Feed each zone the nearest eligible body, keeping a held target while it stays inside
    fn report_detections(&mut self, id: ActorId, snapshot: &Snapshot, delta_time: f32) {
        let Some(actor) = self.actors.get(&id) else {
            return;
        };
        if !actor.is_active() || actor.is_dead() || actor.is_suppressed() {
            return;
        }
        let Some(handles) = actor.colliders() else {
            return;
        };
        let faction = actor.faction();
        let held_target = actor.target();
        let held_threat = actor.threat();

        let seen = self.track_zone(
            handles.detection,
            id,
            faction,
            snapshot,
            held_target,
            delta_time,
        );
        let threat = handles.threat.and_then(|handle| {
            self.track_zone(handle, id, faction, snapshot, held_threat, delta_time)
        });

        if let Some(actor) = self.actors.get_mut(&id) {
            if let Some(target) = seen {
                actor.report_seen(ZoneKind::Target, target);
            }
            if let Some(threat) = threat {
                actor.report_seen(ZoneKind::Threat, threat);
            }
        }
    }

    /// Update a zone's occupancy and pick who it reports: the held entity
    /// while it stays inside, otherwise the nearest eligible one
    fn track_zone(
        &mut self,
        zone: ColliderHandle,
        owner: ActorId,
        faction: Faction,
        snapshot: &Snapshot,
        held: Option<ActorId>,
        delta_time: f32,
    ) -> Option<ActorId> {
        let eligible: Vec<u64> = self
            .colliders
            .overlapping_owners(zone, &TriggerFilter::bodies())
            .into_iter()
            .filter(|candidate| snapshot.is_eligible(owner, faction, ActorId(*candidate)))
            .collect();

        if let Some(tracker) = self.zones.get_mut(&zone) {
            for event in tracker.update(&eligible, delta_time) {
                match event.event_type {
                    OverlapEventType::Enter => {
                        log::debug!("{} noticed {}", owner, ActorId(event.other))
                    }
                    OverlapEventType::Exit => log::debug!(
                        "{} lost sight of {} after {:.2}s",
                        owner,
                        ActorId(event.other),
                        event.time_inside
                    ),
                    OverlapEventType::Stay => {}
                }
            }
        }

        match held {
            Some(held) if eligible.contains(&held.raw()) => Some(held),
            _ => eligible.first().copied().map(ActorId),
        }
    }

    /// Cancel pending timers of actors whose swing was interrupted
    fn flush_invalidated_timers(&mut self) {
        for (id, actor) in self.actors.iter_mut() {
            if actor.take_timer_invalidation() {
                let cancelled = self.scheduler.cancel_owner(*id);
                if cancelled > 0 {
                    log::trace!("{} cancelled {} attack timers", id, cancelled);
                }
            }
        }
    }

    fn cancel_attacks_on_dead_targets(&mut self) {
        let stale: Vec<ActorId> = self
            .actors
            .iter()
            .filter(|(_, actor)| {
                actor
                    .executing_attack()
                    .is_some_and(|executing| !self.is_alive(executing.target))
            })
            .map(|(id, _)| *id)
            .collect();

        for id in stale {
            if let Some(actor) = self.actors.get_mut(&id) {
                actor.cancel_attack_on_dead_target();
            }
        }
        self.flush_invalidated_timers();
    }

    /// Apply armed hit volumes to the first hostile body they overlap
    fn resolve_hits(&mut self, snapshot: &Snapshot) {
        let armed: Vec<ActorId> = self
            .actors
            .iter()
            .filter(|(_, actor)| actor.hit_volume().is_armed())
            .map(|(id, _)| *id)
            .collect();

        for id in armed {
            let Some(attacker) = self.actors.get(&id) else {
                continue;
            };
            let Some(handles) = attacker.colliders() else {
                continue;
            };
            let faction = attacker.faction();
            let candidates: Vec<ActorId> = self
                .colliders
                .overlapping_owners(handles.hit, &TriggerFilter::bodies())
                .into_iter()
                .map(ActorId)
                .filter(|candidate| {
                    self.faction_of(*candidate)
                        .or_else(|| snapshot.get(*candidate).map(|entity| entity.faction))
                        .is_some_and(|other| faction.is_hostile_to(other))
                })
                .collect();

            let Some(mut attacker) = self.actors.remove(&id) else {
                continue;
            };
            for candidate in candidates {
                let result = if let Some(victim) = self.actors.get_mut(&candidate) {
                    attacker.hit_volume_mut().try_apply(candidate.raw(), victim)
                } else if let Some(target) = self.targets.get_mut(&candidate) {
                    attacker.hit_volume_mut().try_apply(candidate.raw(), target.as_mut())
                } else {
                    continue;
                };

                if let HitResult::Hit(outcome) = result {
                    log::debug!("{} hit {} for {:.1}", id, candidate, outcome.dealt);
                    break;
                }
            }
            self.actors.insert(id, attacker);
        }
    }

    fn process_deaths(&mut self) {
        let dying: Vec<ActorId> = self
            .actors
            .iter()
            .filter(|(_, actor)| actor.health().is_dead() && !actor.health().death_processed())
            .map(|(id, _)| *id)
            .collect();

        for id in dying {
            self.start_death(id);
        }
        self.cancel_attacks_on_dead_targets();
    }

    fn start_death(&mut self, id: ActorId) -> bool {
        let Some(actor) = self.actors.get_mut(&id) else {
            return false;
        };
        if !actor.begin_death(&mut self.scheduler, &mut self.colliders, &mut self.audio) {
            return false;
        }
        if let Some(handles) = actor.colliders() {
            for zone in std::iter::once(handles.detection).chain(handles.threat) {
                if let Some(tracker) = self.zones.get_mut(&zone) {
                    tracker.clear();
                }
            }
        }

        self.events.publish(ActorDied { actor: id });
        if actor.profile().boss {
            log::info!("boss {} defeated", id);
            self.events.publish(BossDefeated { boss: id });
        }
        true
    }
}

impl Default for CombatWorld {
    fn default() -> Self {
        Self::new()
    }
}
