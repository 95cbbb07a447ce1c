//! Post-battle cinematic driven through a live combat world

use approx::assert_relative_eq;
use void_ai::prelude::*;
use void_ai::testing::{RecordingAnimator, TestTarget};
use void_cinematic::prelude::*;
use void_cinematic::testing::{finish_conversation, RecordingDialogue, RecordingUi};

const DT: f32 = 0.1;
const CONVERSATION: &str = "after_the_warden";

fn config() -> DirectorConfig {
    let mut config = DirectorConfig::new(CONVERSATION, 30.0);
    config.settle_delay = 0.5;
    config
}

struct Stage {
    world: CombatWorld,
    director: CinematicDirector,
    player: ActorId,
    target: TestTarget,
    ally: ActorId,
    boss: ActorId,
    dialogue: RecordingDialogue,
    ui: RecordingUi,
}

impl Stage {
    fn new(ally_x: f32) -> Self {
        let mut world = CombatWorld::with_seed(5);
        let target = TestTarget::new(Vec2::ZERO, 100.0);
        let player = world.add_target(Box::new(target.clone()));
        let ally = world
            .spawn_actor(
                ActorProfile::new(ActorVariant::AllyFollower).with_name("squire"),
                Vec2::new(ally_x, 0.0),
                Box::new(RecordingAnimator::new()),
            )
            .unwrap();
        let boss = world
            .spawn_actor(
                ActorProfile::new(ActorVariant::Guardian)
                    .with_name("warden")
                    .as_boss()
                    .with_attack(AttackDefinition::new("slam", 20.0, 3.0)),
                Vec2::new(40.0, 0.0),
                Box::new(RecordingAnimator::new()),
            )
            .unwrap();

        let dialogue = RecordingDialogue::new();
        let ui = RecordingUi::new();
        let director = CinematicDirector::new(
            config(),
            ally,
            player,
            Box::new(dialogue.clone()),
            Box::new(ui.clone()),
            world.events_mut(),
        )
        .unwrap();

        Self {
            world,
            director,
            player,
            target,
            ally,
            boss,
            dialogue,
            ui,
        }
    }

    /// Point a fresh director at a different ally
    fn redirect(&mut self, ally: ActorId) {
        self.director = CinematicDirector::new(
            config(),
            ally,
            self.player,
            Box::new(self.dialogue.clone()),
            Box::new(self.ui.clone()),
            self.world.events_mut(),
        )
        .unwrap();
    }

    fn step(&mut self) -> void_cinematic::Result<()> {
        self.world.tick(DT);
        self.director.update(DT, &mut self.world)
    }

    fn run_until(&mut self, max_steps: usize, phase: CinematicPhase) -> bool {
        for _ in 0..max_steps {
            if self.director.phase() == phase {
                return true;
            }
            self.step().unwrap();
        }
        self.director.phase() == phase
    }

    fn ally(&self) -> &CombatActor {
        self.world.actor(self.ally).unwrap()
    }
}

#[test]
fn test_full_sequence() {
    let mut stage = Stage::new(6.0);
    stage.step().unwrap();
    assert_eq!(stage.director.phase(), CinematicPhase::Waiting);

    stage.world.kill(stage.boss).unwrap();
    stage.step().unwrap();
    assert_eq!(stage.director.phase(), CinematicPhase::Settling);
    assert_eq!(stage.director.defeated_boss(), Some(stage.boss));
    assert!(stage.ui.is_hidden());
    assert_eq!(stage.ally().state(), CombatState::Scripted);

    assert!(stage.run_until(10, CinematicPhase::Positioning));
    assert!(stage.world.is_walking(stage.ally));
    stage.step().unwrap();
    assert_relative_eq!(stage.ally().velocity().x, -2.0);

    assert!(stage.run_until(40, CinematicPhase::Dialogue));
    assert_relative_eq!(stage.ally().position().x, 2.0);
    assert_eq!(stage.ally().facing(), -1.0);
    assert_eq!(stage.target.facing(), 1.0);
    assert_eq!(stage.dialogue.started(), vec![CONVERSATION.to_string()]);

    // Holds until the dialogue system reports back
    for _ in 0..5 {
        stage.step().unwrap();
    }
    assert_eq!(stage.director.phase(), CinematicPhase::Dialogue);
    assert!(stage.ui.is_hidden());

    finish_conversation(&stage.world, CONVERSATION);
    stage.step().unwrap();
    assert_eq!(stage.director.phase(), CinematicPhase::Exiting);
    assert!(!stage.ui.is_hidden());
    assert_eq!(stage.ui.restore_calls(), 1);

    stage.step().unwrap();
    assert_relative_eq!(stage.ally().velocity().x, 5.0);

    assert!(stage.run_until(100, CinematicPhase::Finished));
    assert_relative_eq!(stage.ally().position().x, 30.0);
    assert!(stage.director.is_finished());
    assert_eq!(
        stage.director.history().first(),
        Some(&PhaseTransition::new(CinematicPhase::Waiting, CinematicPhase::SuppressAlly))
    );
}

#[test]
fn test_duplicate_broadcasts_run_once() {
    let mut stage = Stage::new(6.0);
    let boss = BossDefeated { boss: stage.boss };
    stage.world.events().publish(boss);
    stage.world.events().publish(boss);
    stage.step().unwrap();
    assert_eq!(stage.director.phase(), CinematicPhase::Settling);
    assert_eq!(stage.ui.hide_calls(), 1);

    stage.world.events().publish(boss);
    stage.step().unwrap();
    assert_eq!(stage.ui.hide_calls(), 1);
    assert!(matches!(
        stage.director.trigger(&mut stage.world),
        Err(CinematicError::AlreadyRunning)
    ));

    assert!(stage.run_until(60, CinematicPhase::Dialogue));
    finish_conversation(&stage.world, CONVERSATION);
    assert!(stage.run_until(100, CinematicPhase::Finished));

    stage.world.events().publish(boss);
    stage.step().unwrap();
    stage.step().unwrap();
    assert_eq!(stage.director.phase(), CinematicPhase::Finished);
    assert_eq!(stage.dialogue.started().len(), 1);
    assert_eq!(stage.ui.hide_calls(), 1);
}

#[test]
fn test_missing_ally_aborts_and_restores_hud() {
    let mut stage = Stage::new(6.0);
    stage.redirect(ActorId(999));

    stage.world.kill(stage.boss).unwrap();
    stage.world.tick(DT);
    let result = stage.director.update(DT, &mut stage.world);

    assert!(matches!(result, Err(CinematicError::AllyNotFound(ActorId(999)))));
    assert!(!stage.ui.is_hidden());
    assert_eq!(stage.ui.restore_calls(), 1);
    assert_eq!(stage.director.phase(), CinematicPhase::Waiting);
    assert!(stage.dialogue.started().is_empty());
}

#[test]
fn test_dead_ally_counts_as_missing() {
    let mut stage = Stage::new(6.0);
    stage.world.kill(stage.ally).unwrap();
    stage.world.kill(stage.boss).unwrap();
    stage.world.tick(DT);

    let result = stage.director.update(DT, &mut stage.world);
    assert!(matches!(result, Err(CinematicError::AllyNotFound(_))));
    assert!(!stage.ui.is_hidden());
}

#[test]
fn test_ally_already_in_place_skips_walk() {
    let mut stage = Stage::new(-2.1);
    stage.director.trigger(&mut stage.world).unwrap();
    assert_eq!(stage.director.defeated_boss(), None);

    assert!(stage.run_until(10, CinematicPhase::Facing));
    assert!(!stage.world.is_walking(stage.ally));
    assert_relative_eq!(stage.ally().position().x, -2.1);
    assert!(stage
        .director
        .history()
        .contains(&PhaseTransition::new(CinematicPhase::Positioning, CinematicPhase::Facing)));
    assert_eq!(stage.ally().facing(), 1.0);
    assert_eq!(stage.target.facing(), -1.0);
}

#[test]
fn test_missing_player_aborts_at_positioning() {
    let mut stage = Stage::new(6.0);
    stage.director = CinematicDirector::new(
        config(),
        stage.ally,
        ActorId(404),
        Box::new(stage.dialogue.clone()),
        Box::new(stage.ui.clone()),
        stage.world.events_mut(),
    )
    .unwrap();
    stage.director.trigger(&mut stage.world).unwrap();
    assert_eq!(stage.director.phase(), CinematicPhase::Settling);

    let mut result = Ok(());
    for _ in 0..10 {
        result = stage.step();
        if result.is_err() {
            break;
        }
    }

    assert!(matches!(result, Err(CinematicError::PlayerNotFound(ActorId(404)))));
    assert_eq!(stage.director.phase(), CinematicPhase::Waiting);
    assert!(!stage.ui.is_hidden());
    assert!(stage.dialogue.started().is_empty());
}
