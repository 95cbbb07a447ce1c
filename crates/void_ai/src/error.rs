//! Error types for the AI system

use crate::capabilities::ActorId;
use thiserror::Error;
use void_combat::CombatError;

/// AI errors. None of these are fatal: callers log them and degrade the actor.
#[derive(Debug, Error)]
pub enum AiError {
    /// An animation cue the actor needs does not exist
    #[error("{actor} has no animation cue '{cue}'")]
    MissingCue { actor: ActorId, cue: String },

    /// A collaborator the subsystem depends on is absent
    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    /// Profile violates an invariant
    #[error("Invalid actor profile: {0}")]
    InvalidProfile(String),

    /// Profile could not be parsed
    #[error("Failed to parse profile: {0}")]
    Config(#[from] toml::de::Error),

    /// Attack configuration error
    #[error(transparent)]
    Combat(#[from] CombatError),

    /// No actor with this id
    #[error("Unknown actor: {0}")]
    UnknownActor(ActorId),
}

/// Result type for AI operations
pub type Result<T> = std::result::Result<T, AiError>;
