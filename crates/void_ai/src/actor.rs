//! Combat actors: the per-tick state machine

use crate::audio::ProximityAudio;
use crate::body::PointBody;
use crate::capabilities::{
    ActorId, AnimationCueSink, Faction, MovementBody, ParameterKind, QuestCollaborator, Targetable,
};
use crate::death::{DeathPhase, DeathSequencer};
use crate::error::{AiError, Result};
use crate::events::TargetAcquired;
use crate::perception::{DetectionState, DetectionUpdate, ZoneKind};
use crate::profile::{ActorProfile, ActorVariant};
use crate::scheduler::{Scheduler, TimerPurpose};
use crate::snapshot::{EntitySnapshot, Snapshot};
use crate::state::{CombatState, StateMachine};
use crate::steering::{self, SteeringOutput};
use rand::RngCore;
use void_combat::{
    AttackSet, DamageInfo, DamageOutcome, Damageable, HealthTracker, HitPlacement, HitVolume,
};
use void_event::EventBus;
use void_math::{facing_sign, Vec2};
use void_triggers::ColliderHandle;

/// Everything an actor may touch during its tick besides itself
pub struct TickContext<'a> {
    pub delta_time: f32,
    /// Frozen view used to resolve target references
    pub snapshot: &'a Snapshot,
    pub scheduler: &'a mut Scheduler,
    pub audio: &'a mut ProximityAudio,
    pub quest: Option<&'a mut (dyn QuestCollaborator + 'static)>,
    pub events: &'a EventBus,
    pub rng: &'a mut dyn RngCore,
}

/// The attack currently being swung
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExecutingAttack {
    pub slot: usize,
    pub target: ActorId,
    pub damage: f32,
}

/// Collider handles registered for an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorColliders {
    pub body: ColliderHandle,
    pub detection: ColliderHandle,
    pub threat: Option<ColliderHandle>,
    pub hit: ColliderHandle,
}

#[derive(Debug, Clone, Copy)]
struct ScriptedWalk {
    target_x: f32,
    speed: f32,
}

/// An AI-controlled combat entity
pub struct CombatActor {
    id: ActorId,
    profile: ActorProfile,
    pub(crate) attacks: AttackSet,
    pub(crate) body: Box<dyn MovementBody>,
    pub(crate) animator: Box<dyn AnimationCueSink>,
    pub(crate) machine: StateMachine,
    pub(crate) health: HealthTracker,
    pub(crate) detection: DetectionState,
    pub(crate) threat: Option<DetectionState>,
    pub(crate) hit_volume: HitVolume,
    pub(crate) executing: Option<ExecutingAttack>,
    pub(crate) death: DeathSequencer,
    pub(crate) active: bool,
    colliders: Option<ActorColliders>,
    facing: f32,
    original_position: Vec2,
    anchor: Option<ActorId>,
    patrol_leg: f32,
    patrol_target: Option<f32>,
    idle_timer: f32,
    hurt_timer: f32,
    suppressed: bool,
    walk: Option<ScriptedWalk>,
    battle_started: bool,
    objective_reported: bool,
    timers_invalidated: bool,
}

impl CombatActor {
    /// Create an actor at `position`. Invalid attacks are dropped and logged.
    pub fn new(
        id: ActorId,
        profile: ActorProfile,
        position: Vec2,
        animator: Box<dyn AnimationCueSink>,
    ) -> Result<Self> {
        profile.validate_tuning()?;
        let health = HealthTracker::try_new(profile.max_health)?;

        let attacks = AttackSet::lenient(profile.attacks.clone())
            .with_global_cooldown(profile.global_cooldown);
        if attacks.is_empty() {
            log::warn!("{} has no usable attacks", id);
        }
        let placement = attacks
            .get(0)
            .map(|slot| slot.definition.placement)
            .unwrap_or_default();

        let threat = profile
            .threat_radius
            .map(|_| DetectionState::new(ZoneKind::Threat, profile.loss_delay));

        Ok(Self {
            id,
            attacks,
            body: Box::new(PointBody::new(position)),
            animator,
            machine: StateMachine::new(id, profile.variant.initial_state()),
            health,
            detection: DetectionState::new(ZoneKind::Target, profile.loss_delay),
            threat,
            hit_volume: HitVolume::new(id.raw(), placement),
            executing: None,
            death: DeathSequencer::new(profile.death_duration, profile.hide_frames),
            active: true,
            colliders: None,
            facing: 1.0,
            original_position: position,
            anchor: None,
            patrol_leg: 1.0,
            patrol_target: None,
            idle_timer: 0.0,
            hurt_timer: 0.0,
            suppressed: false,
            walk: None,
            battle_started: false,
            objective_reported: false,
            timers_invalidated: false,
            profile,
        })
    }

    /// Replace the default point body, keeping the spawn position
    pub fn with_body(mut self, mut body: Box<dyn MovementBody>) -> Self {
        body.set_position(self.original_position);
        self.body = body;
        self
    }

    /// Player (or other entity) an ally follows
    pub fn with_anchor(mut self, anchor: ActorId) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn with_facing(mut self, facing: f32) -> Self {
        self.facing = facing_sign(facing);
        self
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn profile(&self) -> &ActorProfile {
        &self.profile
    }

    pub fn variant(&self) -> ActorVariant {
        self.profile.variant
    }

    pub fn faction(&self) -> Faction {
        self.profile.faction()
    }

    pub fn state(&self) -> CombatState {
        self.machine.current()
    }

    pub fn previous_state(&self) -> Option<CombatState> {
        self.machine.previous()
    }

    pub fn state_machine(&self) -> &StateMachine {
        &self.machine
    }

    pub fn position(&self) -> Vec2 {
        self.body.position()
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity()
    }

    /// +1 facing right, -1 facing left
    pub fn facing(&self) -> f32 {
        self.facing
    }

    pub fn body(&self) -> &dyn MovementBody {
        self.body.as_ref()
    }

    pub fn original_position(&self) -> Vec2 {
        self.original_position
    }

    pub fn health(&self) -> &HealthTracker {
        &self.health
    }

    pub fn health_mut(&mut self) -> &mut HealthTracker {
        &mut self.health
    }

    /// Held target of the target zone
    pub fn target(&self) -> Option<ActorId> {
        self.detection.target()
    }

    /// Held target of the threat zone
    pub fn threat(&self) -> Option<ActorId> {
        self.threat.as_ref().and_then(|zone| zone.target())
    }

    pub fn detection(&self) -> &DetectionState {
        &self.detection
    }

    pub fn attacks(&self) -> &AttackSet {
        &self.attacks
    }

    pub fn hit_volume(&self) -> &HitVolume {
        &self.hit_volume
    }

    pub(crate) fn hit_volume_mut(&mut self) -> &mut HitVolume {
        &mut self.hit_volume
    }

    pub fn executing_attack(&self) -> Option<ExecutingAttack> {
        self.executing
    }

    pub fn anchor(&self) -> Option<ActorId> {
        self.anchor
    }

    pub fn set_anchor(&mut self, anchor: Option<ActorId>) {
        self.anchor = anchor;
    }

    pub fn colliders(&self) -> Option<ActorColliders> {
        self.colliders
    }

    pub(crate) fn attach_colliders(&mut self, colliders: ActorColliders) {
        self.colliders = Some(colliders);
    }

    /// Offset and radius of the hit collider for the current facing
    pub fn hit_collider_shape(&self) -> (Vec2, f32) {
        let placement: HitPlacement = self.hit_volume.placement();
        (placement.offset(self.facing), placement.radius)
    }

    pub fn is_dead(&self) -> bool {
        self.machine.is_dead() || self.health.is_dead()
    }

    /// False once the death sequence has finished
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn death_phase(&self) -> DeathPhase {
        self.death.phase()
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// Whether a scripted walk is in progress
    pub fn is_walking(&self) -> bool {
        self.walk.is_some()
    }

    /// Whether hit timers were invalidated since the last call
    pub fn take_timer_invalidation(&mut self) -> bool {
        std::mem::take(&mut self.timers_invalidated)
    }

    /// A detection zone saw `target` this tick
    pub fn report_seen(&mut self, kind: ZoneKind, target: ActorId) {
        if self.suppressed || self.is_dead() {
            return;
        }
        match kind {
            ZoneKind::Target => self.detection.report_seen(target),
            ZoneKind::Threat => {
                if let Some(zone) = self.threat.as_mut() {
                    zone.report_seen(target);
                }
            }
        }
    }

    /// One simulation step: hurt recovery, detection, state body, cooldowns
    pub fn tick(&mut self, ctx: &mut TickContext<'_>) {
        let dt = ctx.delta_time;
        if !self.active {
            return;
        }
        if self.machine.is_dead() {
            self.tick_dead(dt);
            return;
        }
        self.machine.update(dt);

        if self.hurt_timer > 0.0 {
            self.hurt_timer -= dt;
            if self.hurt_timer <= 0.0 {
                self.hurt_timer = 0.0;
                if self.machine.is_in(CombatState::Hurt) {
                    self.recover_from_hurt(ctx.snapshot);
                }
            }
        }

        if !self.suppressed {
            self.update_detection(ctx);
        }

        match self.machine.current() {
            CombatState::Idle => self.tick_idle(ctx),
            CombatState::Patrol => self.tick_patrol(ctx),
            CombatState::FollowAnchor => self.tick_follow(ctx),
            CombatState::Chase | CombatState::Approach => self.tick_pursuit(ctx),
            CombatState::Attack => self.tick_attack(ctx),
            CombatState::Hurt => self.body.set_horizontal_velocity(0.0),
            CombatState::Returning => self.tick_returning(ctx),
            CombatState::Scripted => self.tick_scripted(dt),
            CombatState::Dead => {}
        }

        self.report_battle_start(ctx);
        self.attacks.tick(dt);
    }

    fn update_detection(&mut self, ctx: &mut TickContext<'_>) {
        let held = self.detection.target();
        match self.detection.update(ctx.delta_time) {
            DetectionUpdate::Seen(target) if held != Some(target) => {
                log::info!("{} acquired target {}", self.id, target);
                ctx.events.publish(TargetAcquired { actor: self.id, target });
            }
            DetectionUpdate::Lost(target) => {
                log::info!("{} lost target {}", self.id, target);
                self.abandon_target();
            }
            _ => {}
        }
        if let Some(zone) = self.threat.as_mut() {
            zone.update(ctx.delta_time);
        }
    }

    /// Move to `to`, running entry and exit side effects
    fn transition_to(&mut self, to: CombatState) -> bool {
        let from = self.machine.current();
        if !self.machine.transition_to(to) {
            return false;
        }

        if from == CombatState::Attack {
            self.interrupt_attack();
            if self.profile.suspends_physics_during_attack() {
                self.body.set_kinematic(false);
            }
        }

        match to {
            CombatState::Attack if self.profile.suspends_physics_during_attack() => {
                self.body.set_kinematic(true);
            }
            CombatState::Idle => self.idle_timer = 0.0,
            CombatState::Chase | CombatState::Approach => self.battle_started = true,
            _ => {}
        }
        true
    }

    fn report_battle_start(&mut self, ctx: &mut TickContext<'_>) {
        if !self.battle_started || self.objective_reported {
            return;
        }
        self.objective_reported = true;
        let Some(title) = self.profile.battle_start_objective.as_deref() else {
            return;
        };
        match ctx.quest.as_deref_mut() {
            Some(quest) => {
                log::info!("{} started battle, completing objective '{}'", self.id, title);
                quest.complete_objective_by_title(title);
            }
            None => {
                let err = AiError::MissingDependency(format!(
                    "quest collaborator for objective '{}'",
                    title
                ));
                log::warn!("{}: {}", self.id, err);
            }
        }
    }

    /// Held target if it is still alive in this tick's snapshot
    fn valid_target(&self, snapshot: &Snapshot) -> Option<EntitySnapshot> {
        self.detection.target().and_then(|target| snapshot.alive(target).copied())
    }

    fn apply_steering(&mut self, out: SteeringOutput) {
        self.body.set_horizontal_velocity(out.velocity_x);
        if let Some(facing) = out.facing() {
            self.facing = facing;
        }
    }

    /// Turn to look at a horizontal position
    pub fn face_towards(&mut self, x: f32) {
        let current = self.position().x;
        if x != current {
            self.facing = facing_sign(x - current);
        }
    }

    fn engage_if_target(&mut self, snapshot: &Snapshot) -> bool {
        if self.valid_target(snapshot).is_none() {
            return false;
        }
        self.transition_to(self.profile.variant.pursuit_state())
    }

    fn choose_next_waypoint(&mut self) -> f32 {
        let waypoint = steering::patrol_waypoint(
            self.original_position.x,
            self.patrol_leg,
            self.profile.patrol_distance,
        );
        self.patrol_leg = -self.patrol_leg;
        self.patrol_target = Some(waypoint);
        waypoint
    }

    fn is_home(&self) -> bool {
        (self.position().x - self.original_position.x).abs() <= self.profile.stop_distance
    }

    /// Fall back to the variant's state without a target
    fn go_home(&mut self) {
        let home = self.profile.variant.home_state();
        match home {
            CombatState::Patrol => {
                self.choose_next_waypoint();
            }
            CombatState::Returning if self.is_home() => {
                self.transition_to(CombatState::Idle);
                return;
            }
            _ => {}
        }
        self.transition_to(home);
    }

    fn abandon_target(&mut self) {
        self.detection.clear();
        if self.machine.current().is_engaged() {
            self.go_home();
        }
    }

    /// Drop the attack in progress and switch the hit volume off
    pub(crate) fn interrupt_attack(&mut self) {
        if self.executing.take().is_some() || self.hit_volume.is_active() {
            self.timers_invalidated = true;
        }
        self.hit_volume.deactivate();
    }

    fn tick_idle(&mut self, ctx: &mut TickContext<'_>) {
        self.body.set_horizontal_velocity(0.0);
        if self.engage_if_target(ctx.snapshot) {
            return;
        }

        match self.profile.variant {
            ActorVariant::MeleePatroller => {
                self.idle_timer += ctx.delta_time;
                if self.idle_timer >= self.profile.idle_time {
                    self.choose_next_waypoint();
                    self.transition_to(CombatState::Patrol);
                }
            }
            ActorVariant::AllyFollower if self.anchor.is_some() => {
                self.transition_to(CombatState::FollowAnchor);
            }
            _ => {}
        }
    }

    fn tick_patrol(&mut self, ctx: &mut TickContext<'_>) {
        if self.engage_if_target(ctx.snapshot) {
            return;
        }

        let waypoint = match self.patrol_target {
            Some(waypoint) => waypoint,
            None => self.choose_next_waypoint(),
        };
        let out = steering::arrive(
            self.position().x,
            waypoint,
            self.profile.patrol_speed,
            self.profile.stop_distance,
            ctx.delta_time,
        );
        self.apply_steering(out);
        if out.arrived {
            self.patrol_target = None;
            self.transition_to(CombatState::Idle);
        }
    }

    fn tick_follow(&mut self, ctx: &mut TickContext<'_>) {
        if self.engage_if_target(ctx.snapshot) {
            return;
        }

        let Some(anchor) = self.anchor.and_then(|anchor| ctx.snapshot.get(anchor)) else {
            self.body.set_horizontal_velocity(0.0);
            return;
        };
        let threat_x = self
            .threat()
            .and_then(|threat| ctx.snapshot.alive(threat))
            .map(|threat| threat.position.x);

        let position = self.position();
        let point = steering::follow_point(
            anchor.position.x,
            position.x,
            threat_x,
            self.profile.follow_offset,
        );
        let out = steering::arrive(
            position.x,
            point,
            self.profile.follow_speed,
            self.profile.stop_distance,
            ctx.delta_time,
        );
        self.apply_steering(out);
        if out.arrived {
            self.face_towards(anchor.position.x);
        }
    }

    fn tick_pursuit(&mut self, ctx: &mut TickContext<'_>) {
        let Some(target) = self.valid_target(ctx.snapshot) else {
            log::debug!("{} target no longer valid", self.id);
            self.abandon_target();
            return;
        };

        let distance = self.position().distance(target.position);
        if distance > self.profile.give_up_distance() {
            log::info!("{} gave up on {} at distance {:.2}", self.id, target.id, distance);
            self.abandon_target();
            return;
        }

        if self.attacks.any_in_range(distance) {
            self.body.set_horizontal_velocity(0.0);
            self.face_towards(target.position.x);
            self.transition_to(CombatState::Attack);
            return;
        }

        let out = steering::seek(
            self.position().x,
            target.position.x,
            self.profile.chase_speed,
            ctx.delta_time,
        );
        self.apply_steering(out);
    }

    fn tick_attack(&mut self, ctx: &mut TickContext<'_>) {
        self.body.set_horizontal_velocity(0.0);

        let Some(target) = self.valid_target(ctx.snapshot) else {
            log::debug!("{} target no longer valid", self.id);
            self.abandon_target();
            return;
        };

        // Leaving every range drops the swing in flight
        let distance = self.position().distance(target.position);
        if !self.attacks.any_in_range(distance) {
            self.transition_to(self.profile.variant.pursuit_state());
            return;
        }

        // Wait for the current swing to release
        if self.executing.is_some() {
            return;
        }

        self.face_towards(target.position.x);
        let selection = self.profile.selection();
        let Some(index) = self.attacks.select(selection, distance, &mut *ctx.rng) else {
            return;
        };

        if let Err(err) = self.execute_attack(index, target.id, ctx) {
            log::warn!("{}", err);
            if let AiError::MissingCue { cue, .. } = &err {
                self.attacks.disable(cue);
            }
            self.transition_to(self.profile.variant.pursuit_state());
        }
    }

    /// Start attack `index` against `target`: cue, cooldown and the
    /// delayed hit window. Returns `Ok(false)` if an attack is already running.
    pub fn execute_attack(
        &mut self,
        index: usize,
        target: ActorId,
        ctx: &mut TickContext<'_>,
    ) -> Result<bool> {
        if self.executing.is_some() {
            log::debug!("{} attack ignored, one is already executing", self.id);
            return Ok(false);
        }
        let Some(slot) = self.attacks.get(index) else {
            return Ok(false);
        };
        let definition = slot.definition.clone();

        if !self.animator.has_parameter(&definition.id, ParameterKind::Trigger) {
            return Err(AiError::MissingCue {
                actor: self.id,
                cue: definition.id,
            });
        }

        self.animator.trigger(&definition.id);
        if let Some(cue) = definition.audio_cue.as_deref() {
            ctx.audio.play_at(cue, self.position(), 0.0);
        }

        self.executing = Some(ExecutingAttack {
            slot: index,
            target,
            damage: definition.damage,
        });
        self.attacks.start_cooldown(index);
        self.hit_volume.deactivate();
        self.hit_volume.set_placement(definition.placement);

        ctx.scheduler
            .schedule(self.id, TimerPurpose::HitOn, definition.pre_activation_delay);
        ctx.scheduler
            .schedule(self.id, TimerPurpose::HitOff, definition.hit_end());
        ctx.scheduler.schedule(
            self.id,
            TimerPurpose::AttackRelease,
            definition.release_time(self.profile.attack_animation_duration),
        );

        log::debug!("{} executes '{}' on {}", self.id, definition.id, target);
        Ok(true)
    }

    /// A scheduled timer fired. `target_alive` is the live state of the attack target.
    pub fn on_timer(&mut self, purpose: TimerPurpose, target_alive: bool) {
        match purpose {
            TimerPurpose::HitOn => {
                let Some(executing) = self.executing else {
                    log::debug!("{} hit activation without an attack", self.id);
                    return;
                };
                if self.is_dead() || !self.machine.is_in(CombatState::Attack) || !target_alive {
                    log::debug!("{} hit activation suppressed", self.id);
                    return;
                }
                self.hit_volume.activate(executing.damage);
            }
            TimerPurpose::HitOff => self.hit_volume.deactivate(),
            TimerPurpose::AttackRelease => {
                self.executing = None;
                self.hit_volume.deactivate();
            }
        }
    }

    /// The attack target died before the swing landed
    pub(crate) fn cancel_attack_on_dead_target(&mut self) {
        if let Some(executing) = self.executing {
            log::debug!("{} target {} died, cancelling swing", self.id, executing.target);
        }
        self.interrupt_attack();
    }

    fn tick_returning(&mut self, ctx: &mut TickContext<'_>) {
        if self.engage_if_target(ctx.snapshot) {
            return;
        }

        let out = steering::arrive(
            self.position().x,
            self.original_position.x,
            self.profile.return_speed,
            self.profile.stop_distance,
            ctx.delta_time,
        );
        if out.arrived {
            self.body.set_position(self.original_position);
            self.body.set_velocity(Vec2::ZERO);
            self.transition_to(CombatState::Idle);
        } else {
            self.apply_steering(out);
        }
    }

    fn tick_scripted(&mut self, dt: f32) {
        let Some(walk) = self.walk else {
            self.body.set_horizontal_velocity(0.0);
            return;
        };

        let position = self.position();
        let out = steering::arrive(
            position.x,
            walk.target_x,
            walk.speed,
            self.profile.stop_distance,
            dt,
        );
        if out.arrived {
            self.body.set_position(position.with_x(walk.target_x));
            self.body.set_horizontal_velocity(0.0);
            self.walk = None;
            log::debug!("{} reached scripted destination {:.2}", self.id, walk.target_x);
        } else {
            self.apply_steering(out);
        }
    }

    fn recover_from_hurt(&mut self, snapshot: &Snapshot) {
        let resume = self.machine.take_resume_state();

        if let Some(target) = self.valid_target(snapshot) {
            let distance = self.position().distance(target.position);
            if self.attacks.any_in_range(distance) {
                self.transition_to(CombatState::Attack);
            } else {
                self.transition_to(self.profile.variant.pursuit_state());
            }
            return;
        }

        match resume {
            Some(CombatState::Patrol) => {
                if self.patrol_target.is_none() {
                    self.choose_next_waypoint();
                }
                self.transition_to(CombatState::Patrol);
            }
            Some(state) if state.is_resumable() => {
                self.transition_to(state);
            }
            _ => self.go_home(),
        }
    }

    /// Hit reaction: enter `Hurt` and drop the pending swing
    pub fn on_damaged(&mut self, source: Option<u64>) {
        if self.is_dead() || self.suppressed {
            return;
        }
        if self.profile.hurt_duration <= 0.0 {
            log::debug!("{} ignores hurt reaction", self.id);
            return;
        }

        log::debug!("{} hurt by {:?}", self.id, source);
        self.interrupt_attack();
        if self.animator.has_parameter(&self.profile.hurt_cue, ParameterKind::Trigger) {
            self.animator.trigger(&self.profile.hurt_cue);
        }
        self.hurt_timer = self.profile.hurt_duration;
        self.body.set_horizontal_velocity(0.0);
        self.transition_to(CombatState::Hurt);
    }

    /// Hand the actor to a cinematic: no detection, no attacks
    pub fn suppress_combat_behaviors(&mut self) {
        if self.is_dead() || self.suppressed {
            return;
        }
        log::info!("{} combat behaviors suppressed", self.id);
        self.suppressed = true;
        self.interrupt_attack();
        self.detection.clear();
        if let Some(zone) = self.threat.as_mut() {
            zone.clear();
        }
        self.hurt_timer = 0.0;
        self.body.set_horizontal_velocity(0.0);
        self.transition_to(CombatState::Scripted);
    }

    /// Give the actor back to its own state machine
    pub fn restore_combat_behaviors(&mut self) {
        if self.is_dead() || !self.suppressed {
            return;
        }
        log::info!("{} combat behaviors restored", self.id);
        self.suppressed = false;
        self.walk = None;
        self.transition_to(self.profile.variant.initial_state());
    }

    /// Walk to `x` at `speed`. Only honored while suppressed.
    pub fn walk_to(&mut self, x: f32, speed: f32) -> bool {
        if !self.suppressed || self.is_dead() {
            log::debug!("{} walk_to ignored outside scripted control", self.id);
            return false;
        }
        self.walk = Some(ScriptedWalk { target_x: x, speed });
        true
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl Damageable for CombatActor {
    fn apply_damage(&mut self, damage: &DamageInfo) -> DamageOutcome {
        if self.machine.is_dead() {
            log::debug!("{} damage ignored: dead", self.id);
            return DamageOutcome::NONE;
        }
        self.health.apply_damage(damage.amount)
    }

    fn is_alive(&self) -> bool {
        !self.machine.is_dead() && self.health.is_alive()
    }

    fn react_to_hit(&mut self, source: Option<u64>) {
        self.on_damaged(source);
    }
}

impl Targetable for CombatActor {
    fn position(&self) -> Vec2 {
        self.body.position()
    }

    fn body_radius(&self) -> f32 {
        self.profile.body_radius
    }

    fn faction(&self) -> Faction {
        self.profile.faction()
    }

    fn face_towards(&mut self, x: f32) {
        CombatActor::face_towards(self, x);
    }
}
