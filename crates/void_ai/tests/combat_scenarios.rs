//! End-to-end combat scenarios driven through `CombatWorld`

use approx::assert_relative_eq;
use void_ai::prelude::*;
use void_ai::testing::{RecordingAnimator, RecordingAudio, RecordingQuest, TestTarget};

const DT: f32 = 0.1;

fn slash() -> AttackDefinition {
    AttackDefinition::new("slash", 10.0, 2.0)
        .with_timing(0.3, 0.2)
        .with_cooldown(1.5)
}

fn melee() -> ActorProfile {
    ActorProfile::new(ActorVariant::MeleePatroller)
        .with_name("grunt")
        .with_detection(10.0, 2.0)
        .with_attack(slash())
}

struct Arena {
    world: CombatWorld,
    player: ActorId,
    target: TestTarget,
    actor: ActorId,
    animator: RecordingAnimator,
}

impl Arena {
    fn new(profile: ActorProfile, target_x: f32) -> Self {
        Self::with_world(CombatWorld::with_seed(7), profile, target_x, RecordingAnimator::new())
    }

    fn with_world(
        mut world: CombatWorld,
        profile: ActorProfile,
        target_x: f32,
        animator: RecordingAnimator,
    ) -> Self {
        let target = TestTarget::new(Vec2::new(target_x, 0.0), 100.0);
        let player = world.add_target(Box::new(target.clone()));
        let actor = world
            .spawn_actor(profile, Vec2::ZERO, Box::new(animator.clone()))
            .unwrap();
        Self {
            world,
            player,
            target,
            actor,
            animator,
        }
    }

    fn actor(&self) -> &CombatActor {
        self.world.actor(self.actor).unwrap()
    }

    fn state(&self) -> CombatState {
        self.actor().state()
    }

    fn ticks(&mut self, count: usize) {
        for _ in 0..count {
            self.world.tick(DT);
        }
    }

    /// Tick until `done` holds, at most `max_ticks` times
    fn tick_until(&mut self, max_ticks: usize, done: impl Fn(&Self) -> bool) -> bool {
        for _ in 0..max_ticks {
            if done(self) {
                return true;
            }
            self.world.tick(DT);
        }
        done(self)
    }

    fn tick_until_swinging(&mut self) {
        assert!(self.tick_until(80, |arena| arena.actor().executing_attack().is_some()));
    }
}

#[test]
fn test_melee_engages_and_hits_once() {
    let mut arena = Arena::new(melee(), 8.0);

    arena.world.tick(DT);
    assert_eq!(arena.state(), CombatState::Chase);
    assert_eq!(arena.actor().target(), Some(arena.player));
    assert!(arena.world.detection_zone(arena.actor).unwrap().contains(arena.player.raw()));

    assert!(arena.tick_until(60, |arena| arena.state() == CombatState::Attack));
    arena.tick_until_swinging();

    // Executed this tick: the volume opens 0.3s later
    assert!(!arena.actor().hit_volume().is_active());
    arena.world.tick(DT);
    assert!(!arena.actor().hit_volume().is_active());
    assert_eq!(arena.target.hits(), 0);
    arena.world.tick(DT);
    assert!(arena.actor().hit_volume().is_active());

    assert_eq!(arena.target.health(), 90.0);
    assert_eq!(arena.target.hits(), 1);

    // Still inside the cooldown: no second swing, no second hit
    arena.ticks(5);
    assert_eq!(arena.target.health(), 90.0);
    assert_eq!(arena.target.hits(), 1);
    assert_eq!(arena.animator.count("slash"), 1);
}

#[test]
fn test_hit_window_shorter_than_a_tick_still_lands() {
    let profile = ActorProfile::new(ActorVariant::MeleePatroller)
        .with_detection(10.0, 2.0)
        .with_attack(slash().with_timing(0.0, 0.05));
    let mut arena = Arena::new(profile, 1.0);

    arena.tick_until_swinging();
    assert!(!arena.actor().hit_volume().is_active());
    assert_eq!(arena.target.health(), 90.0);
    assert_eq!(arena.target.hits(), 1);

    arena.ticks(5);
    assert_eq!(arena.target.hits(), 1);
}

#[test]
fn test_target_leaving_range_mid_swing_resumes_chase() {
    let profile = ActorProfile::new(ActorVariant::MeleePatroller)
        .with_detection(10.0, 2.0)
        .with_attack(slash().with_total_duration(1.5));
    let mut arena = Arena::new(profile, 1.5);
    arena.tick_until_swinging();
    assert_eq!(arena.state(), CombatState::Attack);

    arena.target.set_position(Vec2::new(7.0, 0.0));
    arena.world.tick(DT);

    assert_eq!(arena.state(), CombatState::Chase);
    assert!(arena.actor().executing_attack().is_none());
    assert!(!arena.actor().hit_volume().is_active());
    assert_eq!(arena.world.scheduler().pending_for(arena.actor), 0);
    assert_eq!(arena.target.hits(), 0);
}

#[test]
fn test_actor_faces_its_target() {
    let mut arena = Arena::new(melee(), -6.0);
    arena.tick_until_swinging();
    assert_eq!(arena.actor().facing(), -1.0);
}

#[test]
fn test_target_death_before_activation_cancels_swing() {
    let mut arena = Arena::new(melee(), 7.9);
    arena.tick_until_swinging();
    assert!(arena.world.scheduler().is_pending(arena.actor, TimerPurpose::HitOn));

    arena.target.kill();
    arena.world.tick(DT);

    assert!(!arena.world.scheduler().is_pending(arena.actor, TimerPurpose::HitOn));
    assert!(!arena.world.scheduler().is_pending(arena.actor, TimerPurpose::HitOff));
    assert!(arena.actor().executing_attack().is_none());
    for _ in 0..10 {
        arena.world.tick(DT);
        assert!(!arena.actor().hit_volume().is_active());
    }
    assert_eq!(arena.target.hits(), 0);
    assert!(!arena.actor().state().is_engaged());
}

#[test]
fn test_death_cancels_pending_timers_and_runs_once() {
    let mut arena = Arena::new(melee(), 7.9);
    let (_, died) = arena.world.events_mut().subscribe_channel::<ActorDied>();
    arena.tick_until_swinging();
    assert!(arena.world.scheduler().pending_for(arena.actor) > 0);

    assert!(arena.world.kill(arena.actor).unwrap());
    assert!(!arena.world.kill(arena.actor).unwrap());

    assert_eq!(arena.state(), CombatState::Dead);
    assert_eq!(arena.world.detection_zone(arena.actor).unwrap().count(), 0);
    assert_eq!(arena.world.scheduler().pending_for(arena.actor), 0);
    let colliders = arena.world.colliders();
    assert!(colliders
        .handles_of(arena.actor.raw())
        .iter()
        .all(|handle| !colliders.is_enabled(*handle)));
    assert_eq!(arena.animator.count("death"), 1);
    assert!(arena.animator.resets().contains(&"slash".to_string()));

    arena.world.tick(DT);
    assert_eq!(died.drain(), vec![ActorDied { actor: arena.actor }]);
    assert_eq!(arena.target.hits(), 0);

    // Damage after death changes nothing
    let outcome = arena.world.damage(arena.actor, 50.0, Some(arena.player)).unwrap();
    assert_eq!(outcome, DamageOutcome::NONE);
    assert_eq!(arena.animator.count("death"), 1);
}

#[test]
fn test_death_sequence_hides_then_deactivates() {
    let mut arena = Arena::new(melee(), 7.9);
    arena.world.kill(arena.actor).unwrap();
    assert_eq!(arena.actor().velocity(), Vec2::ZERO);
    assert!(arena.actor().body().is_kinematic());
    assert!(!arena.actor().body().gravity_enabled());

    arena.ticks(5);
    assert!(arena.animator.is_visible());
    assert!(arena.actor().is_active());

    arena.ticks(7);
    assert!(!arena.animator.is_visible());
    assert_eq!(arena.actor().position(), arena.actor().profile().off_stage_position);

    arena.ticks(3);
    assert!(!arena.actor().is_active());
    assert_eq!(arena.actor().death_phase(), DeathPhase::Finished);
    assert_eq!(arena.state(), CombatState::Dead);
}

#[test]
fn test_hurt_cancels_pending_hit() {
    let mut arena = Arena::new(melee(), 7.9);
    arena.tick_until_swinging();

    arena.world.damage(arena.actor, 5.0, Some(arena.player)).unwrap();
    assert_eq!(arena.state(), CombatState::Hurt);
    assert_eq!(arena.actor().health().current(), 95.0);
    assert!(!arena.world.scheduler().is_pending(arena.actor, TimerPurpose::HitOn));
    assert!(!arena.world.scheduler().is_pending(arena.actor, TimerPurpose::HitOff));
    assert!(arena.actor().executing_attack().is_none());
    assert_eq!(arena.animator.count("hurt"), 1);

    // Recovers into Attack with the target still in range, but the slash is cooling down
    arena.ticks(5);
    assert_eq!(arena.state(), CombatState::Attack);
    assert_eq!(arena.target.health(), 100.0);
}

#[test]
fn test_hurt_immune_actor_keeps_swinging() {
    let mut profile = melee();
    profile.hurt_duration = 0.0;
    let mut arena = Arena::new(profile, 7.9);
    arena.tick_until_swinging();

    arena.world.damage(arena.actor, 5.0, Some(arena.player)).unwrap();
    assert_eq!(arena.state(), CombatState::Attack);
    assert!(arena.world.scheduler().is_pending(arena.actor, TimerPurpose::HitOn));

    assert!(arena.tick_until(10, |arena| arena.target.health() < 100.0));
}

#[test]
fn test_target_loss_after_delay() {
    let mut profile = ActorProfile::new(ActorVariant::Guardian)
        .with_detection(10.0, 2.0)
        .with_attack(slash());
    profile.chase_speed = 0.0;
    let mut arena = Arena::new(profile, 9.0);

    arena.world.tick(DT);
    assert_eq!(arena.state(), CombatState::Chase);

    // Outside the zone but short of the give-up distance
    arena.target.set_position(Vec2::new(14.0, 0.0));
    arena.ticks(18);
    assert_eq!(arena.actor().target(), Some(arena.player));
    assert_eq!(arena.state(), CombatState::Chase);

    arena.ticks(4);
    assert_eq!(arena.actor().target(), None);
    assert_eq!(arena.state(), CombatState::Idle);
}

#[test]
fn test_reentering_zone_keeps_target() {
    let mut profile = melee();
    profile.chase_speed = 0.0;
    let mut arena = Arena::new(profile, 9.0);
    arena.world.tick(DT);

    arena.target.set_position(Vec2::new(14.0, 0.0));
    arena.ticks(15);
    arena.target.set_position(Vec2::new(9.0, 0.0));
    arena.ticks(10);

    assert_eq!(arena.actor().target(), Some(arena.player));
    assert_eq!(arena.actor().detection().time_since_seen(), 0.0);
}

#[test]
fn test_missing_cue_disables_attack() {
    let animator = RecordingAnimator::with_parameters(&["hurt", "death"]);
    let mut arena = Arena::with_world(CombatWorld::with_seed(7), melee(), 7.9, animator);

    assert!(arena.tick_until(60, |arena| arena.actor().attacks().is_empty()));
    assert!(arena.actor().state().is_pursuit());
    assert_eq!(arena.animator.count("slash"), 0);

    arena.ticks(20);
    assert_eq!(arena.target.hits(), 0);
}

#[test]
fn test_caster_is_kinematic_only_while_attacking() {
    let profile = ActorProfile::new(ActorVariant::RangedCaster)
        .with_detection(8.0, 2.0)
        .with_attack(AttackDefinition::new("bolt", 8.0, 6.0).with_timing(0.2, 0.1));
    let mut arena = Arena::new(profile, 5.0);

    assert!(arena.tick_until(5, |arena| arena.state() == CombatState::Attack));
    assert!(arena.actor().body().is_kinematic());

    arena.target.set_position(Vec2::new(7.5, 0.0));
    assert!(arena.tick_until(20, |arena| arena.state() == CombatState::Chase));
    assert!(!arena.actor().body().is_kinematic());
}

#[test]
fn test_battle_start_objective_reported_once() {
    let quest = RecordingQuest::new();
    let world = CombatWorld::with_seed(3).with_quest(Box::new(quest.clone()));
    let mut profile = melee();
    profile.battle_start_objective = Some("Defeat the gatekeeper".to_string());
    let mut arena = Arena::with_world(world, profile, 7.9, RecordingAnimator::new());

    arena.tick_until_swinging();
    arena.ticks(10);

    // Step back out of range to force another chase
    let x = arena.actor().position().x;
    arena.target.set_position(Vec2::new(x + 6.0, 0.0));
    assert!(arena.tick_until(20, |arena| arena.state() == CombatState::Chase));
    arena.ticks(10);

    assert_eq!(quest.completed(), vec!["Defeat the gatekeeper".to_string()]);
}

#[test]
fn test_boss_defeat_published_once() {
    let mut arena = Arena::new(melee().as_boss(), 7.9);
    let (_, defeated) = arena.world.events_mut().subscribe_channel::<BossDefeated>();

    arena.world.damage(arena.actor, 150.0, Some(arena.player)).unwrap();
    arena.world.kill(arena.actor).unwrap();
    arena.ticks(3);

    assert_eq!(defeated.drain(), vec![BossDefeated { boss: arena.actor }]);
}

#[test]
fn test_audio_cues_without_listener_always_play() {
    let audio = RecordingAudio::new();
    let world = CombatWorld::with_seed(1).with_audio(Box::new(audio.clone()), 5.0);
    let profile = ActorProfile::new(ActorVariant::MeleePatroller)
        .with_detection(10.0, 2.0)
        .with_attack(slash().with_audio_cue("whoosh"));
    let mut arena = Arena::with_world(world, profile, 7.9, RecordingAnimator::new());

    arena.world.bind_audio_listener(None);
    assert!(!arena.world.audio().attenuation_enabled());

    arena.tick_until_swinging();
    assert_eq!(audio.count("whoosh"), 1);
}

#[test]
fn test_audio_cues_far_from_listener_are_dropped() {
    let audio = RecordingAudio::new();
    let mut world = CombatWorld::with_seed(1).with_audio(Box::new(audio.clone()), 5.0);
    let listener = world.add_target(Box::new(
        TestTarget::new(Vec2::new(100.0, 0.0), 10.0).with_faction(Faction::Neutral),
    ));
    world.bind_audio_listener(Some(listener));

    let profile = ActorProfile::new(ActorVariant::MeleePatroller)
        .with_detection(10.0, 2.0)
        .with_attack(slash().with_audio_cue("whoosh"));
    let mut arena = Arena::with_world(world, profile, 7.9, RecordingAnimator::new());
    assert!(arena.world.audio().attenuation_enabled());

    arena.tick_until_swinging();
    assert_eq!(audio.count("whoosh"), 0);
}

#[test]
fn test_ally_follows_anchor_then_engages() {
    let mut world = CombatWorld::with_seed(11);
    let player = world.add_target(Box::new(TestTarget::new(Vec2::ZERO, 100.0)));
    let ally_profile = ActorProfile::new(ActorVariant::AllyFollower)
        .with_attack(AttackDefinition::new("strike", 6.0, 1.5).with_timing(0.2, 0.2));
    let ally = world
        .spawn_actor(ally_profile, Vec2::new(5.0, 0.0), Box::new(RecordingAnimator::new()))
        .unwrap();
    world.set_anchor(ally, Some(player)).unwrap();

    for _ in 0..30 {
        world.tick(DT);
    }
    let follower = world.actor(ally).unwrap();
    assert_eq!(follower.state(), CombatState::FollowAnchor);
    assert_relative_eq!(
        follower.position().x,
        1.5,
        epsilon = follower.profile().stop_distance + 1e-4
    );

    let grunt = world
        .spawn_actor(melee(), Vec2::new(7.0, 0.0), Box::new(RecordingAnimator::new()))
        .unwrap();
    world.tick(DT);

    let follower = world.actor(ally).unwrap();
    assert_eq!(follower.target(), Some(grunt));
    assert_eq!(follower.state(), CombatState::Approach);
}

#[test]
fn test_suppressed_actor_ignores_targets_and_walks() {
    let mut arena = Arena::new(melee(), 7.9);
    arena.world.suppress_combat_behaviors(arena.actor).unwrap();
    assert_eq!(arena.state(), CombatState::Scripted);

    assert!(arena.world.walk_to(arena.actor, -1.0, 2.0).unwrap());
    assert!(arena.world.is_walking(arena.actor));
    assert!(arena.tick_until(40, |arena| !arena.world.is_walking(arena.actor)));
    assert_relative_eq!(arena.actor().position().x, -1.0);
    assert_eq!(arena.actor().target(), None);
    assert_eq!(arena.state(), CombatState::Scripted);

    arena.world.restore_combat_behaviors(arena.actor).unwrap();
    assert!(!arena.world.walk_to(arena.actor, 0.0, 2.0).unwrap());
    arena.world.tick(DT);
    assert_eq!(arena.state(), CombatState::Chase);
}
