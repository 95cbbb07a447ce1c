//! Director tuning

use crate::error::{CinematicError, Result};
use serde::{Deserialize, Serialize};

/// Tuning for the post-battle cinematic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectorConfig {
    /// Wait after the boss falls, letting the death animation play
    #[serde(default = "default_settle_delay")]
    pub settle_delay: f32,
    /// Distance the ally keeps from the player while talking
    #[serde(default = "default_conversation_distance")]
    pub conversation_distance: f32,
    #[serde(default = "default_tolerance")]
    pub tolerance: f32,
    #[serde(default = "default_approach_speed")]
    pub approach_speed: f32,
    /// Must be faster than `approach_speed`
    #[serde(default = "default_exit_speed")]
    pub exit_speed: f32,
    /// Where the ally walks once the conversation ends
    #[serde(default)]
    pub destination_x: f32,
    #[serde(default = "default_conversation_id")]
    pub conversation_id: String,
}

fn default_settle_delay() -> f32 { 2.0 }
fn default_conversation_distance() -> f32 { 2.0 }
fn default_tolerance() -> f32 { 0.2 }
fn default_approach_speed() -> f32 { 2.0 }
fn default_exit_speed() -> f32 { 5.0 }
fn default_conversation_id() -> String { "boss_defeated".to_string() }

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            settle_delay: default_settle_delay(),
            conversation_distance: default_conversation_distance(),
            tolerance: default_tolerance(),
            approach_speed: default_approach_speed(),
            exit_speed: default_exit_speed(),
            destination_x: 0.0,
            conversation_id: default_conversation_id(),
        }
    }
}

impl DirectorConfig {
    pub fn new(conversation_id: impl Into<String>, destination_x: f32) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            destination_x,
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.settle_delay >= 0.0) {
            return Err(CinematicError::InvalidConfig(format!(
                "settle_delay must not be negative, got {}",
                self.settle_delay
            )));
        }
        let positive = [
            ("conversation_distance", self.conversation_distance),
            ("tolerance", self.tolerance),
            ("approach_speed", self.approach_speed),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(CinematicError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    field, value
                )));
            }
        }
        if !(self.exit_speed > self.approach_speed) {
            return Err(CinematicError::InvalidConfig(format!(
                "exit_speed {} must exceed approach_speed {}",
                self.exit_speed, self.approach_speed
            )));
        }
        if self.conversation_id.is_empty() {
            return Err(CinematicError::InvalidConfig("conversation_id is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_defaults() {
        let config = DirectorConfig::from_toml_str(
            r#"
            conversation_id = "after_the_warden"
            destination_x = 42.0
            "#,
        )
        .unwrap();
        assert_eq!(config.conversation_id, "after_the_warden");
        assert_eq!(config.destination_x, 42.0);
        assert_eq!(config.settle_delay, 2.0);
        assert_eq!(config.exit_speed, 5.0);
    }

    #[test]
    fn test_exit_must_be_faster() {
        let mut config = DirectorConfig::default();
        config.exit_speed = config.approach_speed;
        assert!(matches!(config.validate(), Err(CinematicError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(DirectorConfig::from_toml_str("tolerance = 0.0").is_err());
        assert!(DirectorConfig::from_toml_str("settle_delay = -1.0").is_err());
        assert!(DirectorConfig::from_toml_str("conversation_id = \"\"").is_err());
        assert!(matches!(
            DirectorConfig::from_toml_str("settle_delay = \"soon\""),
            Err(CinematicError::Config(_))
        ));
    }
}
