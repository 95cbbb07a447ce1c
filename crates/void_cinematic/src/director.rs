//! Post-battle cinematic: once the boss falls, bring the ally over to the
//! player, run a conversation, then walk the ally off.

use crate::config::DirectorConfig;
use crate::error::{CinematicError, Result};
use crate::phase::{CinematicPhase, PhaseTransition};
use void_ai::{
    ActorId, BossDefeated, CombatWorld, DialogueCollaborator, DialogueCompleted, UiCollaborator,
};
use void_event::{EventBus, EventChannel, SubscriberId};
use void_math::facing_sign;

/// Runs the post-battle sequence at most once.
///
/// Call [`CinematicDirector::update`] once per frame after the world tick.
pub struct CinematicDirector {
    config: DirectorConfig,
    ally: ActorId,
    player: ActorId,
    dialogue: Box<dyn DialogueCollaborator>,
    ui: Box<dyn UiCollaborator>,
    boss_defeated: EventChannel<BossDefeated>,
    boss_subscription: Option<SubscriberId>,
    dialogue_completed: EventChannel<DialogueCompleted>,
    phase: CinematicPhase,
    phase_time: f32,
    hud_hidden: bool,
    defeated_boss: Option<ActorId>,
    history: Vec<PhaseTransition>,
}

impl CinematicDirector {
    /// Create a director listening for `BossDefeated` on `bus`
    pub fn new(
        config: DirectorConfig,
        ally: ActorId,
        player: ActorId,
        dialogue: Box<dyn DialogueCollaborator>,
        ui: Box<dyn UiCollaborator>,
        bus: &mut EventBus,
    ) -> Result<Self> {
        config.validate()?;
        let (subscription, boss_defeated) = bus.subscribe_channel::<BossDefeated>();
        Ok(Self {
            config,
            ally,
            player,
            dialogue,
            ui,
            boss_defeated,
            boss_subscription: Some(subscription),
            dialogue_completed: EventChannel::new(),
            phase: CinematicPhase::Waiting,
            phase_time: 0.0,
            hud_hidden: false,
            defeated_boss: None,
            history: Vec::new(),
        })
    }

    pub fn config(&self) -> &DirectorConfig {
        &self.config
    }

    pub fn phase(&self) -> CinematicPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase.is_running()
    }

    pub fn is_finished(&self) -> bool {
        self.phase == CinematicPhase::Finished
    }

    /// Boss whose defeat started the sequence
    pub fn defeated_boss(&self) -> Option<ActorId> {
        self.defeated_boss
    }

    /// Phase changes so far, oldest first
    pub fn history(&self) -> &[PhaseTransition] {
        &self.history
    }

    /// Start the sequence without waiting for a broadcast
    pub fn trigger(&mut self, world: &mut CombatWorld) -> Result<()> {
        if self.phase != CinematicPhase::Waiting {
            return Err(CinematicError::AlreadyRunning);
        }
        self.begin(world)
    }

    /// Advance one step
    pub fn update(&mut self, delta_time: f32, world: &mut CombatWorld) -> Result<()> {
        let broadcasts = self.boss_defeated.drain();

        if self.phase == CinematicPhase::Waiting {
            let Some(first) = broadcasts.first() else {
                return Ok(());
            };
            if broadcasts.len() > 1 {
                let duplicates = broadcasts.len() - 1;
                log::debug!("cinematic: {} duplicate boss broadcasts ignored", duplicates);
            }
            self.defeated_boss = Some(first.boss);
            return self.begin(world);
        }

        if !broadcasts.is_empty() {
            log::debug!("cinematic: boss broadcast ignored while {}", self.phase);
        }

        self.phase_time += delta_time;
        match self.phase {
            CinematicPhase::Waiting | CinematicPhase::Finished => Ok(()),
            // Transient, resolved inside `begin`
            CinematicPhase::SuppressAlly => Ok(()),
            CinematicPhase::Settling => {
                if self.phase_time >= self.config.settle_delay {
                    self.start_positioning(world)?;
                }
                Ok(())
            }
            CinematicPhase::Positioning => {
                if !world.is_walking(self.ally) {
                    self.face_each_other(world)?;
                }
                Ok(())
            }
            CinematicPhase::Facing => {
                self.start_dialogue(world);
                Ok(())
            }
            CinematicPhase::Dialogue => {
                if let Some(done) = self.dialogue_completed.receive() {
                    log::info!("cinematic: conversation '{}' completed", done.conversation);
                    self.start_exit(world)?;
                }
                Ok(())
            }
            CinematicPhase::Exiting => {
                if !world.is_walking(self.ally) {
                    self.finish(world);
                }
                Ok(())
            }
        }
    }

    fn set_phase(&mut self, phase: CinematicPhase) {
        if phase == self.phase {
            return;
        }
        log::info!("cinematic: {} -> {}", self.phase, phase);
        self.history.push(PhaseTransition::new(self.phase, phase));
        self.phase = phase;
        self.phase_time = 0.0;
    }

    fn ally_alive(&self, world: &CombatWorld) -> bool {
        world.actor(self.ally).is_some_and(|ally| !ally.is_dead())
    }

    fn begin(&mut self, world: &mut CombatWorld) -> Result<()> {
        self.set_phase(CinematicPhase::SuppressAlly);
        self.ui.hide_hud();
        self.hud_hidden = true;

        if !self.ally_alive(world) || world.suppress_combat_behaviors(self.ally).is_err() {
            return Err(self.abort(CinematicError::AllyNotFound(self.ally)));
        }

        self.set_phase(CinematicPhase::Settling);
        Ok(())
    }

    /// Give the HUD back and return to waiting
    fn abort(&mut self, error: CinematicError) -> CinematicError {
        log::warn!("cinematic aborted: {}", error);
        self.restore_hud();
        self.set_phase(CinematicPhase::Waiting);
        error
    }

    fn restore_hud(&mut self) {
        if self.hud_hidden {
            self.ui.restore_hud();
            self.hud_hidden = false;
        }
    }

    fn start_positioning(&mut self, world: &mut CombatWorld) -> Result<()> {
        let Some(player) = world.entity_position(self.player) else {
            return Err(self.abort(CinematicError::PlayerNotFound(self.player)));
        };
        let ally = world
            .actor(self.ally)
            .filter(|ally| !ally.is_dead())
            .map(|ally| ally.position());
        let Some(ally) = ally else {
            return Err(self.abort(CinematicError::AllyNotFound(self.ally)));
        };

        // Stay on the side the ally is already on
        let side = facing_sign(ally.x - player.x);
        let spot = player.x + side * self.config.conversation_distance;

        self.set_phase(CinematicPhase::Positioning);
        if (ally.x - spot).abs() <= self.config.tolerance {
            log::debug!("cinematic: ally already at conversation distance");
            return self.face_each_other(world);
        }

        match world.walk_to(self.ally, spot, self.config.approach_speed) {
            Ok(true) => Ok(()),
            _ => Err(self.abort(CinematicError::AllyNotFound(self.ally))),
        }
    }

    fn face_each_other(&mut self, world: &mut CombatWorld) -> Result<()> {
        let Some(ally) = world.entity_position(self.ally) else {
            return Err(self.abort(CinematicError::AllyNotFound(self.ally)));
        };
        let Some(player) = world.entity_position(self.player) else {
            return Err(self.abort(CinematicError::PlayerNotFound(self.player)));
        };

        self.set_phase(CinematicPhase::Facing);
        world
            .face_towards(self.ally, player.x)
            .and_then(|()| world.face_towards(self.player, ally.x))
            .map_err(|err| self.abort(err.into()))?;
        Ok(())
    }

    fn start_dialogue(&mut self, world: &mut CombatWorld) {
        let inbox = self.dialogue_completed.clone();
        world
            .events_mut()
            .subscribe_once(move |event: &DialogueCompleted| inbox.send(event.clone()));

        self.set_phase(CinematicPhase::Dialogue);
        self.dialogue.start_conversation(&self.config.conversation_id);
    }

    fn start_exit(&mut self, world: &mut CombatWorld) -> Result<()> {
        self.restore_hud();
        self.set_phase(CinematicPhase::Exiting);

        match world.walk_to(self.ally, self.config.destination_x, self.config.exit_speed) {
            Ok(true) => Ok(()),
            _ => Err(self.abort(CinematicError::AllyNotFound(self.ally))),
        }
    }

    fn finish(&mut self, world: &mut CombatWorld) {
        if let Some(subscription) = self.boss_subscription.take() {
            world.events_mut().unsubscribe(subscription);
        }
        self.set_phase(CinematicPhase::Finished);
    }
}
