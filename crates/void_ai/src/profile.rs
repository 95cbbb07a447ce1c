//! Actor tuning loaded from TOML

use crate::capabilities::Faction;
use crate::error::{AiError, Result};
use crate::state::CombatState;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use void_combat::{AttackDefinition, AttackSelection, CombatError};
use void_math::Vec2;

/// Behavior family of an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorVariant {
    /// Walks between two waypoints, chases and hits up close
    #[default]
    MeleePatroller,
    /// Stands still, casts from range
    RangedCaster,
    /// Follows the player and engages hostiles nearby
    AllyFollower,
    /// Holds a post and returns to it after a fight
    Guardian,
}

impl ActorVariant {
    /// Default side for the variant
    pub fn default_faction(self) -> Faction {
        match self {
            Self::AllyFollower => Faction::Ally,
            _ => Faction::Hostile,
        }
    }

    /// State taken when chasing a target
    pub fn pursuit_state(self) -> CombatState {
        match self {
            Self::AllyFollower => CombatState::Approach,
            _ => CombatState::Chase,
        }
    }

    /// State the actor falls back to without a target
    pub fn home_state(self) -> CombatState {
        match self {
            Self::MeleePatroller => CombatState::Patrol,
            Self::RangedCaster => CombatState::Idle,
            Self::AllyFollower => CombatState::FollowAnchor,
            Self::Guardian => CombatState::Returning,
        }
    }

    /// State at spawn
    pub fn initial_state(self) -> CombatState {
        match self {
            Self::AllyFollower => CombatState::FollowAnchor,
            _ => CombatState::Idle,
        }
    }

    fn default_selection(self) -> AttackSelection {
        match self {
            Self::RangedCaster | Self::AllyFollower => AttackSelection::Random,
            _ => AttackSelection::BestFit,
        }
    }
}

/// Tuning for one actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorProfile {
    /// Display name for logs
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub variant: ActorVariant,
    /// Overrides the variant's faction
    #[serde(default)]
    pub faction: Option<Faction>,
    #[serde(default = "default_max_health")]
    pub max_health: f32,
    #[serde(default = "default_body_radius")]
    pub body_radius: f32,

    #[serde(default = "default_patrol_speed")]
    pub patrol_speed: f32,
    #[serde(default = "default_follow_speed")]
    pub follow_speed: f32,
    #[serde(default = "default_chase_speed")]
    pub chase_speed: f32,
    #[serde(default = "default_return_speed")]
    pub return_speed: f32,
    /// Arrival radius for waypoints and the home position
    #[serde(default = "default_stop_distance")]
    pub stop_distance: f32,

    /// Radius of the target zone
    #[serde(default = "default_detection_radius")]
    pub detection_radius: f32,
    /// Radius of the threat zone (followers)
    #[serde(default)]
    pub threat_radius: Option<f32>,
    /// Unseen time after which the target is dropped
    #[serde(default = "default_loss_delay")]
    pub loss_delay: f32,
    /// Chase is abandoned beyond this multiple of the detection radius
    #[serde(default = "default_give_up_multiplier")]
    pub give_up_multiplier: f32,

    #[serde(default = "default_idle_time")]
    pub idle_time: f32,
    #[serde(default = "default_patrol_distance")]
    pub patrol_distance: f32,
    #[serde(default = "default_follow_offset")]
    pub follow_offset: f32,

    /// Zero makes the actor hurt-immune
    #[serde(default = "default_hurt_duration")]
    pub hurt_duration: f32,
    #[serde(default = "default_death_duration")]
    pub death_duration: f32,
    /// Ticks to wait after hiding before deactivation
    #[serde(default = "default_hide_frames")]
    pub hide_frames: u32,
    #[serde(default = "default_off_stage_position")]
    pub off_stage_position: Vec2,

    /// Overrides the variant's selection policy
    #[serde(default)]
    pub selection: Option<AttackSelection>,
    /// Cooldown shared by all attacks
    #[serde(default)]
    pub global_cooldown: Option<f32>,
    /// Make the body kinematic while attacking; defaults to true for casters
    #[serde(default)]
    pub suspend_physics_during_attack: Option<bool>,
    /// Release time for attacks without their own total duration
    #[serde(default = "default_attack_animation_duration")]
    pub attack_animation_duration: f32,

    /// Quest objective completed when the first fight starts
    #[serde(default)]
    pub battle_start_objective: Option<String>,
    /// Death broadcasts `BossDefeated`
    #[serde(default)]
    pub boss: bool,

    #[serde(default = "default_hurt_cue")]
    pub hurt_cue: String,
    #[serde(default = "default_death_cue")]
    pub death_cue: String,
    #[serde(default)]
    pub death_audio_cue: Option<String>,

    #[serde(default)]
    pub attacks: Vec<AttackDefinition>,
}

fn default_max_health() -> f32 { 100.0 }
fn default_body_radius() -> f32 { 0.5 }
fn default_patrol_speed() -> f32 { 2.0 }
fn default_follow_speed() -> f32 { 3.0 }
fn default_chase_speed() -> f32 { 4.0 }
fn default_return_speed() -> f32 { 3.0 }
fn default_stop_distance() -> f32 { 0.1 }
fn default_detection_radius() -> f32 { 8.0 }
fn default_loss_delay() -> f32 { 2.0 }
fn default_give_up_multiplier() -> f32 { 1.5 }
fn default_idle_time() -> f32 { 1.5 }
fn default_patrol_distance() -> f32 { 4.0 }
fn default_follow_offset() -> f32 { 1.5 }
fn default_hurt_duration() -> f32 { 0.3 }
fn default_death_duration() -> f32 { 1.0 }
fn default_hide_frames() -> u32 { 1 }
fn default_off_stage_position() -> Vec2 { Vec2::new(-10_000.0, -10_000.0) }
fn default_attack_animation_duration() -> f32 { 0.6 }
fn default_hurt_cue() -> String { "hurt".to_string() }
fn default_death_cue() -> String { "death".to_string() }

impl Default for ActorProfile {
    fn default() -> Self {
        Self::new(ActorVariant::default())
    }
}

impl ActorProfile {
    /// Profile with default tuning for `variant`
    pub fn new(variant: ActorVariant) -> Self {
        Self {
            name: String::new(),
            variant,
            faction: None,
            max_health: default_max_health(),
            body_radius: default_body_radius(),
            patrol_speed: default_patrol_speed(),
            follow_speed: default_follow_speed(),
            chase_speed: default_chase_speed(),
            return_speed: default_return_speed(),
            stop_distance: default_stop_distance(),
            detection_radius: default_detection_radius(),
            threat_radius: None,
            loss_delay: default_loss_delay(),
            give_up_multiplier: default_give_up_multiplier(),
            idle_time: default_idle_time(),
            patrol_distance: default_patrol_distance(),
            follow_offset: default_follow_offset(),
            hurt_duration: default_hurt_duration(),
            death_duration: default_death_duration(),
            hide_frames: default_hide_frames(),
            off_stage_position: default_off_stage_position(),
            selection: None,
            global_cooldown: None,
            suspend_physics_during_attack: None,
            attack_animation_duration: default_attack_animation_duration(),
            battle_start_objective: None,
            boss: false,
            hurt_cue: default_hurt_cue(),
            death_cue: default_death_cue(),
            death_audio_cue: None,
            attacks: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_attack(mut self, attack: AttackDefinition) -> Self {
        self.attacks.push(attack);
        self
    }

    pub fn with_detection(mut self, radius: f32, loss_delay: f32) -> Self {
        self.detection_radius = radius;
        self.loss_delay = loss_delay;
        self
    }

    pub fn with_max_health(mut self, max_health: f32) -> Self {
        self.max_health = max_health;
        self
    }

    pub fn as_boss(mut self) -> Self {
        self.boss = true;
        self
    }

    /// Parse and validate a profile
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let profile: Self = toml::from_str(source)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Faction after overrides
    pub fn faction(&self) -> Faction {
        self.faction.unwrap_or_else(|| self.variant.default_faction())
    }

    /// Selection policy after overrides
    pub fn selection(&self) -> AttackSelection {
        self.selection.unwrap_or_else(|| self.variant.default_selection())
    }

    /// Whether attacking makes the body kinematic
    pub fn suspends_physics_during_attack(&self) -> bool {
        self.suspend_physics_during_attack
            .unwrap_or(self.variant == ActorVariant::RangedCaster)
    }

    /// Distance beyond which a chase is abandoned
    pub fn give_up_distance(&self) -> f32 {
        self.detection_radius * self.give_up_multiplier
    }

    /// Validate everything except attacks
    pub fn validate_tuning(&self) -> Result<()> {
        let positive = [
            ("max_health", self.max_health),
            ("body_radius", self.body_radius),
            ("detection_radius", self.detection_radius),
            ("give_up_multiplier", self.give_up_multiplier),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(AiError::InvalidProfile(format!(
                    "{} must be positive, got {}",
                    field, value
                )));
            }
        }

        let non_negative = [
            ("patrol_speed", self.patrol_speed),
            ("follow_speed", self.follow_speed),
            ("chase_speed", self.chase_speed),
            ("return_speed", self.return_speed),
            ("stop_distance", self.stop_distance),
            ("loss_delay", self.loss_delay),
            ("idle_time", self.idle_time),
            ("patrol_distance", self.patrol_distance),
            ("follow_offset", self.follow_offset),
            ("hurt_duration", self.hurt_duration),
            ("death_duration", self.death_duration),
            ("attack_animation_duration", self.attack_animation_duration),
            ("global_cooldown", self.global_cooldown.unwrap_or(0.0)),
            ("threat_radius", self.threat_radius.unwrap_or(0.0)),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(AiError::InvalidProfile(format!(
                    "{} must not be negative, got {}",
                    field, value
                )));
            }
        }
        Ok(())
    }

    /// Validate tuning and every attack
    pub fn validate(&self) -> Result<()> {
        self.validate_tuning()?;
        let mut seen = HashSet::new();
        for attack in &self.attacks {
            attack.validate()?;
            if !seen.insert(attack.id.as_str()) {
                return Err(CombatError::DuplicateAttack(attack.id.clone()).into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUARDIAN: &str = r#"
        name = "gate warden"
        variant = "guardian"
        max_health = 400.0
        detection_radius = 10.0
        boss = true
        battle_start_objective = "Defeat the Warden"
        off_stage_position = { x = 0.0, y = -500.0 }

        [[attacks]]
        id = "slam"
        damage = 25.0
        range = 3.0
        cooldown = 2.5
        pre_activation_delay = 0.4
        active_duration = 0.2
        placement = { forward_offset = 1.5, radius = 1.0 }

        [[attacks]]
        id = "sweep"
        damage = 15.0
        range = 4.0
    "#;

    #[test]
    fn test_parse_profile() {
        let profile = ActorProfile::from_toml_str(GUARDIAN).unwrap();
        assert_eq!(profile.variant, ActorVariant::Guardian);
        assert_eq!(profile.faction(), Faction::Hostile);
        assert_eq!(profile.selection(), AttackSelection::BestFit);
        assert!(profile.boss);
        assert_eq!(profile.attacks.len(), 2);
        assert_eq!(profile.attacks[0].placement.radius, 1.0);
        assert_eq!(profile.off_stage_position, Vec2::new(0.0, -500.0));
        // Defaults
        assert_eq!(profile.give_up_multiplier, 1.5);
        assert_eq!(profile.give_up_distance(), 15.0);
        assert_eq!(profile.attacks[1].active_duration, 0.2);
    }

    #[test]
    fn test_variant_defaults() {
        let caster = ActorProfile::new(ActorVariant::RangedCaster);
        assert!(caster.suspends_physics_during_attack());
        assert_eq!(caster.selection(), AttackSelection::Random);

        let ally = ActorProfile::new(ActorVariant::AllyFollower);
        assert_eq!(ally.faction(), Faction::Ally);
        assert_eq!(ally.variant.pursuit_state(), CombatState::Approach);
        assert_eq!(ally.variant.home_state(), CombatState::FollowAnchor);
    }

    #[test]
    fn test_invalid_profiles() {
        let err = ActorProfile::from_toml_str("max_health = 0.0").unwrap_err();
        assert!(matches!(err, AiError::InvalidProfile(_)));

        let err = ActorProfile::from_toml_str("loss_delay = -1.0").unwrap_err();
        assert!(matches!(err, AiError::InvalidProfile(_)));

        let err = ActorProfile::from_toml_str("max_health = \"lots\"").unwrap_err();
        assert!(matches!(err, AiError::Config(_)));

        let bad_attack = r#"
            [[attacks]]
            id = "poke"
            damage = 1.0
            range = 0.0
        "#;
        let err = ActorProfile::from_toml_str(bad_attack).unwrap_err();
        assert!(matches!(err, AiError::Combat(CombatError::InvalidAttack { .. })));
    }
}
