//! Events published on the combat world's bus

use crate::capabilities::ActorId;

/// An actor started its death sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorDied {
    pub actor: ActorId,
}

/// A boss-flagged actor started dying
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BossDefeated {
    pub boss: ActorId,
}

/// An actor picked up a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetAcquired {
    pub actor: ActorId,
    pub target: ActorId,
}

/// A conversation started by a dialogue collaborator finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueCompleted {
    pub conversation: String,
}
