//! Attack definitions, cooldowns and selection

use crate::error::{CombatError, Result};
use crate::hit_volume::HitPlacement;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One configured attack. Read-only at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackDefinition {
    /// Identifier, also the animation cue that plays it
    pub id: String,
    /// Damage applied by the hit volume
    pub damage: f32,
    /// Seconds from execution start until the attack may run again
    #[serde(default = "default_cooldown")]
    pub cooldown: f32,
    /// Maximum distance at which this attack is selected
    pub range: f32,
    /// Wind-up before the hit volume turns on
    #[serde(default)]
    pub pre_activation_delay: f32,
    /// How long the hit volume stays on
    #[serde(default = "default_active_duration")]
    pub active_duration: f32,
    /// Hit volume placement
    #[serde(default)]
    pub placement: HitPlacement,
    /// Time until the actor may act again; the actor's default when absent
    #[serde(default)]
    pub total_duration: Option<f32>,
    /// Sound played when the attack starts
    #[serde(default)]
    pub audio_cue: Option<String>,
}

fn default_cooldown() -> f32 {
    1.0
}

fn default_active_duration() -> f32 {
    0.2
}

impl AttackDefinition {
    /// Create an attack with default timings
    pub fn new(id: impl Into<String>, damage: f32, range: f32) -> Self {
        Self {
            id: id.into(),
            damage,
            cooldown: default_cooldown(),
            range,
            pre_activation_delay: 0.0,
            active_duration: default_active_duration(),
            placement: HitPlacement::default(),
            total_duration: None,
            audio_cue: None,
        }
    }

    pub fn with_cooldown(mut self, cooldown: f32) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Set wind-up and active window
    pub fn with_timing(mut self, pre_activation_delay: f32, active_duration: f32) -> Self {
        self.pre_activation_delay = pre_activation_delay;
        self.active_duration = active_duration;
        self
    }

    pub fn with_placement(mut self, placement: HitPlacement) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_total_duration(mut self, total: f32) -> Self {
        self.total_duration = Some(total);
        self
    }

    pub fn with_audio_cue(mut self, cue: impl Into<String>) -> Self {
        self.audio_cue = Some(cue.into());
        self
    }

    /// Time at which the hit volume turns off
    pub fn hit_end(&self) -> f32 {
        self.pre_activation_delay + self.active_duration
    }

    /// Time until the attack releases the actor, never before the hit window ends
    pub fn release_time(&self, default_total: f32) -> f32 {
        self.total_duration.unwrap_or(default_total).max(self.hit_end())
    }

    /// Check invariants
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| CombatError::InvalidAttack {
            id: self.id.clone(),
            reason: reason.to_string(),
        };

        if self.id.is_empty() {
            return Err(invalid("empty id"));
        }
        if !(self.range > 0.0) {
            return Err(invalid("range must be positive"));
        }
        if !(self.active_duration > 0.0) {
            return Err(invalid("active duration must be positive"));
        }
        if self.pre_activation_delay < 0.0 || self.cooldown < 0.0 {
            return Err(invalid("timers must not be negative"));
        }
        if matches!(self.total_duration, Some(total) if total < 0.0) {
            return Err(invalid("total duration must not be negative"));
        }
        if !(self.placement.radius > 0.0) {
            return Err(invalid("hit radius must be positive"));
        }
        Ok(())
    }
}

/// How an actor with several attacks picks one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackSelection {
    /// Tightest range that still reaches the target
    #[default]
    BestFit,
    /// Uniformly among ready attacks that reach the target
    Random,
}

/// Index of the attack whose range fits `distance` most tightly.
///
/// Among attacks with `range >= distance` the smallest `range - distance`
/// wins; if none reach, the attack with the largest range is returned.
pub fn select_best_attack_for_distance(
    attacks: &[AttackDefinition],
    distance: f32,
) -> Option<usize> {
    let reaching = attacks
        .iter()
        .enumerate()
        .filter(|(_, attack)| attack.range >= distance)
        .min_by(|(_, a), (_, b)| {
            (a.range - distance)
                .partial_cmp(&(b.range - distance))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(index, _)| index);

    reaching.or_else(|| {
        attacks
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| {
                a.range
                    .partial_cmp(&b.range)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(index, _)| index)
    })
}

/// Uniform choice among candidates
pub fn choose_among<T: Copy, R: Rng + ?Sized>(candidates: &[T], rng: &mut R) -> Option<T> {
    candidates.choose(rng).copied()
}

/// An attack and its cooldown timer
#[derive(Debug, Clone)]
pub struct AttackSlot {
    pub definition: AttackDefinition,
    cooldown_remaining: f32,
}

impl AttackSlot {
    pub fn new(definition: AttackDefinition) -> Self {
        Self {
            definition,
            cooldown_remaining: 0.0,
        }
    }

    /// Ready when the cooldown has elapsed
    pub fn is_ready(&self) -> bool {
        self.cooldown_remaining <= 0.0
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown_remaining
    }

    /// Restart the cooldown
    pub fn start_cooldown(&mut self) {
        self.cooldown_remaining = self.definition.cooldown;
    }

    /// Count the cooldown down
    pub fn tick(&mut self, delta_time: f32) {
        if self.cooldown_remaining > 0.0 {
            self.cooldown_remaining -= delta_time;
        }
    }

    /// Whether the attack reaches `distance`
    pub fn reaches(&self, distance: f32) -> bool {
        self.definition.range >= distance
    }
}

/// All attacks of one actor, with an optional shared cooldown
#[derive(Debug, Clone, Default)]
pub struct AttackSet {
    slots: Vec<AttackSlot>,
    global_cooldown: Option<f32>,
    global_remaining: f32,
}

impl AttackSet {
    /// Build a set from definitions, validating each one
    pub fn new(definitions: Vec<AttackDefinition>) -> Result<Self> {
        let mut seen = HashSet::new();
        for definition in &definitions {
            definition.validate()?;
            if !seen.insert(definition.id.clone()) {
                return Err(CombatError::DuplicateAttack(definition.id.clone()));
            }
        }
        Ok(Self {
            slots: definitions.into_iter().map(AttackSlot::new).collect(),
            global_cooldown: None,
            global_remaining: 0.0,
        })
    }

    /// Build a set, dropping (and logging) definitions that fail validation
    pub fn lenient(definitions: Vec<AttackDefinition>) -> Self {
        let mut set = Self::default();
        for definition in definitions {
            if let Err(err) = set.push(definition) {
                log::warn!("attack disabled: {}", err);
            }
        }
        set
    }

    /// Add a validated attack
    pub fn push(&mut self, definition: AttackDefinition) -> Result<()> {
        definition.validate()?;
        if self.slots.iter().any(|slot| slot.definition.id == definition.id) {
            return Err(CombatError::DuplicateAttack(definition.id));
        }
        self.slots.push(AttackSlot::new(definition));
        Ok(())
    }

    /// Share one cooldown across all attacks
    pub fn with_global_cooldown(mut self, cooldown: Option<f32>) -> Self {
        self.global_cooldown = cooldown;
        self
    }

    /// Remove an attack by id, returning it
    pub fn disable(&mut self, id: &str) -> Option<AttackDefinition> {
        let index = self.slots.iter().position(|slot| slot.definition.id == id)?;
        Some(self.slots.remove(index).definition)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&AttackSlot> {
        self.slots.get(index)
    }

    pub fn slots(&self) -> &[AttackSlot] {
        &self.slots
    }

    /// Whether the shared cooldown has elapsed
    pub fn global_ready(&self) -> bool {
        self.global_remaining <= 0.0
    }

    /// Whether any attack reaches `distance`
    pub fn any_in_range(&self, distance: f32) -> bool {
        self.slots.iter().any(|slot| slot.reaches(distance))
    }

    /// Largest configured range
    pub fn max_range(&self) -> f32 {
        self.slots
            .iter()
            .map(|slot| slot.definition.range)
            .fold(0.0, f32::max)
    }

    /// Best-fit attack for `distance`, or none if that attack is cooling down
    pub fn select_best_ready(&self, distance: f32) -> Option<usize> {
        if !self.global_ready() {
            return None;
        }
        let index = if self.slots.len() == 1 {
            // Single attack: just its own range
            self.slots[0].reaches(distance).then_some(0)?
        } else {
            let definitions: Vec<AttackDefinition> =
                self.slots.iter().map(|slot| slot.definition.clone()).collect();
            select_best_attack_for_distance(&definitions, distance)?
        };
        self.slots[index].is_ready().then_some(index)
    }

    /// Indices of attacks that are ready and reach `distance`
    pub fn ready_in_range(&self, distance: f32) -> Vec<usize> {
        if !self.global_ready() {
            return Vec::new();
        }
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_ready() && slot.reaches(distance))
            .map(|(index, _)| index)
            .collect()
    }

    /// Pick an attack for `distance` with the given policy
    pub fn select<R: Rng + ?Sized>(
        &self,
        policy: AttackSelection,
        distance: f32,
        rng: &mut R,
    ) -> Option<usize> {
        match policy {
            AttackSelection::BestFit => self.select_best_ready(distance),
            AttackSelection::Random => choose_among(&self.ready_in_range(distance), rng),
        }
    }

    /// Start the cooldown of `index` and the shared cooldown
    pub fn start_cooldown(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.start_cooldown();
        }
        if let Some(global) = self.global_cooldown {
            self.global_remaining = global;
        }
    }

    /// Count every cooldown down
    pub fn tick(&mut self, delta_time: f32) {
        for slot in &mut self.slots {
            slot.tick(delta_time);
        }
        if self.global_remaining > 0.0 {
            self.global_remaining -= delta_time;
        }
    }
}
