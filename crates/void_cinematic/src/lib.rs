//! Void Cinematic - scripted sequences triggered by combat events
//!
//! [`CinematicDirector`] waits for `BossDefeated`, takes the ally out of
//! combat control, walks it over to the player for a conversation and then
//! walks it off once the dialogue collaborator reports completion.

pub mod config;
pub mod director;
pub mod error;
pub mod phase;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub mod prelude {
    pub use crate::config::DirectorConfig;
    pub use crate::director::CinematicDirector;
    pub use crate::error::{CinematicError, Result};
    pub use crate::phase::{CinematicPhase, PhaseTransition};
}

pub use prelude::*;
