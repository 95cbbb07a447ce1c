//! Hit volumes: the damaging part of a swing

use crate::damage::{DamageInfo, DamageOutcome, Damageable};
use serde::{Deserialize, Serialize};
use void_math::{facing_sign, Vec2};
use void_triggers::{Collider, TriggerVolume, VolumeTag};

/// Where a hit volume sits relative to its owner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitPlacement {
    /// Offset along the facing direction (mirrored when facing left)
    #[serde(default = "default_forward_offset")]
    pub forward_offset: f32,
    /// Vertical offset
    #[serde(default)]
    pub vertical_offset: f32,
    /// Radius of the volume
    #[serde(default = "default_radius")]
    pub radius: f32,
}

fn default_forward_offset() -> f32 {
    1.0
}

fn default_radius() -> f32 {
    0.5
}

impl HitPlacement {
    pub fn new(forward_offset: f32, radius: f32) -> Self {
        Self {
            forward_offset,
            vertical_offset: 0.0,
            radius,
        }
    }

    /// Offset from the owner for the given facing
    pub fn offset(&self, facing: f32) -> Vec2 {
        Vec2::new(self.forward_offset * facing_sign(facing), self.vertical_offset)
    }
}

impl Default for HitPlacement {
    fn default() -> Self {
        Self::new(default_forward_offset(), default_radius())
    }
}

/// Result of offering a target to a hit volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitResult {
    /// Nothing happened
    Ignored,
    /// Damage was applied
    Hit(DamageOutcome),
}

impl HitResult {
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }
}

/// A single-use damaging volume owned by an actor.
///
/// Each activation window applies damage to at most one target.
#[derive(Debug, Clone)]
pub struct HitVolume {
    owner: u64,
    placement: HitPlacement,
    damage: f32,
    active: bool,
    consumed: bool,
}

impl HitVolume {
    /// Create an inactive hit volume
    pub fn new(owner: u64, placement: HitPlacement) -> Self {
        Self {
            owner,
            placement,
            damage: 0.0,
            active: false,
            consumed: false,
        }
    }

    /// Enable the volume for a new swing
    pub fn activate(&mut self, damage: f32) {
        self.damage = damage;
        self.active = true;
        self.consumed = false;
    }

    /// Disable the volume (idempotent)
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Move the volume for the next swing
    pub fn set_placement(&mut self, placement: HitPlacement) {
        self.placement = placement;
    }

    pub fn owner(&self) -> u64 {
        self.owner
    }

    pub fn placement(&self) -> HitPlacement {
        self.placement
    }

    pub fn damage(&self) -> f32 {
        self.damage
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Whether the volume can still hit something this window
    pub fn is_armed(&self) -> bool {
        self.active && !self.consumed
    }

    /// World-space center and radius
    pub fn world_shape(&self, owner_position: Vec2, facing: f32) -> (Vec2, f32) {
        (owner_position + self.placement.offset(facing), self.placement.radius)
    }

    /// A disabled collider for registering the volume in a collider set
    pub fn collider(&self, facing: f32) -> Collider {
        Collider::new(self.owner, VolumeTag::Hit, TriggerVolume::circle(self.placement.radius))
            .with_offset(self.placement.offset(facing))
            .disabled()
    }

    /// Offer a target to the volume
    pub fn try_apply<D: Damageable + ?Sized>(
        &mut self,
        target_id: u64,
        target: &mut D,
    ) -> HitResult {
        if !self.is_armed() || target_id == self.owner || !target.is_alive() {
            return HitResult::Ignored;
        }

        let info = DamageInfo::new(self.damage).with_source(self.owner);
        let outcome = target.apply_damage(&info);
        self.consumed = true;
        target.react_to_hit(Some(self.owner));

        log::debug!(
            "hit volume of {} hit {} for {} (died: {})",
            self.owner,
            target_id,
            outcome.dealt,
            outcome.died
        );
        HitResult::Hit(outcome)
    }
}
