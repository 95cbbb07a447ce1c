//! Death sequencing: stop, animate, hide, deactivate

use crate::actor::CombatActor;
use crate::audio::ProximityAudio;
use crate::capabilities::ParameterKind;
use crate::scheduler::Scheduler;
use crate::state::CombatState;
use void_math::Vec2;
use void_triggers::ColliderSet;

/// Where an actor is in its death sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeathPhase {
    Alive,
    /// Death animation playing
    Dying { elapsed: f32 },
    /// Hidden off-stage, waiting out the remaining frames
    Hidden { frames_left: u32 },
    Finished,
}

/// Side effect requested by [`DeathSequencer::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathStep {
    None,
    Hide,
    Finish,
}

/// Timeline of a single death
#[derive(Debug, Clone)]
pub struct DeathSequencer {
    duration: f32,
    hide_frames: u32,
    phase: DeathPhase,
}

impl DeathSequencer {
    pub fn new(duration: f32, hide_frames: u32) -> Self {
        Self {
            duration: duration.max(0.0),
            hide_frames,
            phase: DeathPhase::Alive,
        }
    }

    pub fn phase(&self) -> DeathPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, DeathPhase::Dying { .. } | DeathPhase::Hidden { .. })
    }

    /// Start the timeline. Returns false if it already started.
    pub fn begin(&mut self) -> bool {
        if self.phase != DeathPhase::Alive {
            return false;
        }
        self.phase = DeathPhase::Dying { elapsed: 0.0 };
        true
    }

    pub fn advance(&mut self, delta_time: f32) -> DeathStep {
        match self.phase {
            DeathPhase::Alive | DeathPhase::Finished => DeathStep::None,
            DeathPhase::Dying { elapsed } => {
                let elapsed = elapsed + delta_time;
                if elapsed >= self.duration {
                    self.phase = DeathPhase::Hidden {
                        frames_left: self.hide_frames,
                    };
                    DeathStep::Hide
                } else {
                    self.phase = DeathPhase::Dying { elapsed };
                    DeathStep::None
                }
            }
            DeathPhase::Hidden { frames_left } => {
                if frames_left == 0 {
                    self.phase = DeathPhase::Finished;
                    DeathStep::Finish
                } else {
                    self.phase = DeathPhase::Hidden {
                        frames_left: frames_left - 1,
                    };
                    DeathStep::None
                }
            }
        }
    }
}

impl CombatActor {
    /// Run the one-time death procedure. Returns false if it already ran.
    pub fn begin_death(
        &mut self,
        scheduler: &mut Scheduler,
        colliders: &mut ColliderSet,
        audio: &mut ProximityAudio,
    ) -> bool {
        self.health.kill();
        if !self.health.begin_death_processing() {
            return false;
        }

        let id = self.id();
        log::info!("{} died", id);
        self.machine.transition_to(CombatState::Dead);

        self.body.set_velocity(Vec2::ZERO);
        self.body.set_kinematic(true);
        self.body.set_gravity_enabled(false);

        self.executing = None;
        self.hit_volume.deactivate();
        let cancelled = scheduler.cancel_owner(id);
        if cancelled > 0 {
            log::debug!("{} cancelled {} pending timers", id, cancelled);
        }
        colliders.disable_owner(id.raw());

        for slot in self.attacks.slots() {
            self.animator.reset_cue(&slot.definition.id);
        }
        let hurt_cue = self.profile().hurt_cue.clone();
        self.animator.reset_cue(&hurt_cue);

        let death_cue = self.profile().death_cue.clone();
        if self.animator.has_parameter(&death_cue, ParameterKind::Trigger) {
            self.animator.trigger(&death_cue);
        } else {
            log::warn!("{} has no '{}' cue, skipping death animation", id, death_cue);
        }
        if let Some(cue) = self.profile().death_audio_cue.clone() {
            audio.play_at(&cue, self.position(), 0.0);
        }

        self.death.begin();
        true
    }

    pub(crate) fn tick_dead(&mut self, delta_time: f32) {
        self.body.set_velocity(Vec2::ZERO);
        match self.death.advance(delta_time) {
            DeathStep::Hide => {
                let off_stage = self.profile().off_stage_position;
                self.animator.set_visible(false);
                self.body.set_position(off_stage);
                log::debug!("{} hidden off-stage", self.id());
            }
            DeathStep::Finish => {
                self.set_active(false);
                log::info!("{} deactivated", self.id());
            }
            DeathStep::None => {}
        }
    }
}
