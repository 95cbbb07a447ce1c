//! Cinematic error types

use thiserror::Error;
use void_ai::{ActorId, AiError};

/// Cinematic errors
#[derive(Error, Debug)]
pub enum CinematicError {
    #[error("Ally {0} not found or no longer alive")]
    AllyNotFound(ActorId),

    #[error("Player {0} not found")]
    PlayerNotFound(ActorId),

    #[error("Combat world rejected a cinematic command: {0}")]
    Ai(#[from] AiError),

    #[error("Cinematic already running or finished")]
    AlreadyRunning,

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for cinematic operations
pub type Result<T> = std::result::Result<T, CinematicError>;
