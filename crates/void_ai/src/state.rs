//! Combat state machine

use crate::capabilities::ActorId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// States of a combat actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatState {
    Idle,
    Patrol,
    FollowAnchor,
    Chase,
    Approach,
    Attack,
    Hurt,
    Returning,
    /// Terminal
    Dead,
    /// Driven by a cinematic
    Scripted,
}

impl CombatState {
    /// Moving toward a target
    pub fn is_pursuit(self) -> bool {
        matches!(self, Self::Chase | Self::Approach)
    }

    /// States that care about a held target
    pub fn is_engaged(self) -> bool {
        matches!(self, Self::Chase | Self::Approach | Self::Attack)
    }

    /// States an actor can go back to once an interruption ends without a target
    pub fn is_resumable(self) -> bool {
        matches!(self, Self::Idle | Self::Patrol | Self::FollowAnchor | Self::Returning)
    }
}

impl fmt::Display for CombatState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Current and previous state of one actor.
///
/// `Dead` absorbs every transition. Entering `Hurt` remembers the
/// state to resume afterwards.
#[derive(Debug, Clone)]
pub struct StateMachine {
    owner: ActorId,
    current: CombatState,
    previous: Option<CombatState>,
    resume: Option<CombatState>,
    time_in_state: f32,
    transitions: u32,
}

impl StateMachine {
    pub fn new(owner: ActorId, initial: CombatState) -> Self {
        Self {
            owner,
            current: initial,
            previous: None,
            resume: None,
            time_in_state: 0.0,
            transitions: 0,
        }
    }

    pub fn current(&self) -> CombatState {
        self.current
    }

    pub fn previous(&self) -> Option<CombatState> {
        self.previous
    }

    pub fn is_in(&self, state: CombatState) -> bool {
        self.current == state
    }

    pub fn is_dead(&self) -> bool {
        self.current == CombatState::Dead
    }

    /// Seconds since the last transition
    pub fn time_in_state(&self) -> f32 {
        self.time_in_state
    }

    /// Number of transitions taken
    pub fn transition_count(&self) -> u32 {
        self.transitions
    }

    /// State recorded when `Hurt` was entered
    pub fn resume_state(&self) -> Option<CombatState> {
        self.resume
    }

    /// Consume the recorded resume state
    pub fn take_resume_state(&mut self) -> Option<CombatState> {
        self.resume.take()
    }

    /// Move to `to`. Returns false if nothing changed.
    pub fn transition_to(&mut self, to: CombatState) -> bool {
        if self.current == CombatState::Dead {
            if to != CombatState::Dead {
                log::debug!("{}: transition to {} refused, already dead", self.owner, to);
            }
            return false;
        }
        if self.current == to {
            return false;
        }

        log::debug!("{}: {} -> {}", self.owner, self.current, to);
        if to == CombatState::Hurt {
            self.resume = Some(self.current);
        }
        self.previous = Some(self.current);
        self.current = to;
        self.time_in_state = 0.0;
        self.transitions += 1;
        true
    }

    /// Advance the time-in-state counter
    pub fn update(&mut self, delta_time: f32) {
        self.time_in_state += delta_time;
    }
}
