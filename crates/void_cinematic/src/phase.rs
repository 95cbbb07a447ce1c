//! Cinematic phases

use std::fmt;

/// Step of the post-battle sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CinematicPhase {
    /// Listening for the trigger
    #[default]
    Waiting,
    /// Ally handed to scripted control, HUD hidden
    SuppressAlly,
    /// Waiting for the death animation to play out
    Settling,
    /// Ally walking to conversation distance
    Positioning,
    /// Ally and player turning to each other
    Facing,
    /// Conversation running in the dialogue collaborator
    Dialogue,
    /// Ally walking to its destination
    Exiting,
    Finished,
}

impl CinematicPhase {
    /// Whether a sequence is in progress
    pub fn is_running(&self) -> bool {
        !matches!(self, Self::Waiting | Self::Finished)
    }

    /// Whether the HUD is hidden during this phase
    pub fn hides_hud(&self) -> bool {
        matches!(
            self,
            Self::SuppressAlly | Self::Settling | Self::Positioning | Self::Facing | Self::Dialogue
        )
    }
}

impl fmt::Display for CinematicPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Recorded phase change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTransition {
    pub from: CinematicPhase,
    pub to: CinematicPhase,
}

impl PhaseTransition {
    pub fn new(from: CinematicPhase, to: CinematicPhase) -> Self {
        Self { from, to }
    }
}
