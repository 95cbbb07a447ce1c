//! Error types for the combat system

use thiserror::Error;

/// Combat configuration errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CombatError {
    /// Attack definition violates an invariant
    #[error("Invalid attack '{id}': {reason}")]
    InvalidAttack { id: String, reason: String },

    /// Two attacks share an id
    #[error("Duplicate attack id: {0}")]
    DuplicateAttack(String),

    /// Max health must be positive
    #[error("Invalid max health: {0}")]
    InvalidHealth(f32),
}

/// Result type for combat operations
pub type Result<T> = std::result::Result<T, CombatError>;
