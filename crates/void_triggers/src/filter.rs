//! Overlap filtering

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What a collider is for. Hit volumes and detection zones may share space
/// with bodies; the tag, not the geometry, decides what a contact means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolumeTag {
    /// Hurtbox of a character; the only tag that can receive damage
    Body,
    /// Damage-carrying volume of an attack
    Hit,
    /// Zone used to notice a target
    Detection,
    /// Zone used by allies to notice threats to their anchor
    Threat,
}

impl VolumeTag {
    /// Whether this tag is a sensing zone
    pub fn is_zone(self) -> bool {
        matches!(self, Self::Detection | Self::Threat)
    }
}

/// Filter for which colliders count as an overlap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerFilter {
    /// Accepted tags (empty = any)
    pub tags: HashSet<VolumeTag>,
    /// Required layers (other collider must share at least one)
    pub required_layers: u32,
    /// Excluded layers (other collider must not have any)
    pub excluded_layers: u32,
    /// Owners that never pass
    pub blocked_owners: HashSet<u64>,
    /// Whether colliders of the same owner may pass
    pub allow_self: bool,
}

impl TriggerFilter {
    /// Create a new filter that accepts everything except the owner itself
    pub fn new() -> Self {
        Self {
            tags: HashSet::new(),
            required_layers: u32::MAX,
            excluded_layers: 0,
            blocked_owners: HashSet::new(),
            allow_self: false,
        }
    }

    /// Filter accepting only body colliders
    pub fn bodies() -> Self {
        Self::new().with_tag(VolumeTag::Body)
    }

    /// Accept a tag
    pub fn with_tag(mut self, tag: VolumeTag) -> Self {
        self.tags.insert(tag);
        self
    }

    /// Set required layers (bitmask)
    pub fn with_layers(mut self, layers: u32) -> Self {
        self.required_layers = layers;
        self
    }

    /// Set excluded layers (bitmask)
    pub fn without_layers(mut self, layers: u32) -> Self {
        self.excluded_layers = layers;
        self
    }

    /// Block specific owners
    pub fn block_owners<I: IntoIterator<Item = u64>>(mut self, owners: I) -> Self {
        self.blocked_owners.extend(owners);
        self
    }

    /// Allow colliders of the querying owner to pass
    pub fn allow_self_overlap(mut self) -> Self {
        self.allow_self = true;
        self
    }

    /// Check if a collider passes this filter
    pub fn passes(
        &self,
        other_owner: u64,
        other_tag: VolumeTag,
        other_layers: u32,
        querying_owner: u64,
    ) -> bool {
        if other_owner == querying_owner && !self.allow_self {
            return false;
        }
        if self.blocked_owners.contains(&other_owner) {
            return false;
        }
        if !self.tags.is_empty() && !self.tags.contains(&other_tag) {
            return false;
        }
        if other_layers & self.required_layers == 0 {
            return false;
        }
        other_layers & self.excluded_layers == 0
    }
}

impl Default for TriggerFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_tags() {
        let filter = TriggerFilter::bodies();

        assert!(filter.passes(2, VolumeTag::Body, u32::MAX, 1));
        assert!(!filter.passes(2, VolumeTag::Detection, u32::MAX, 1));
        assert!(!filter.passes(2, VolumeTag::Hit, u32::MAX, 1));
    }

    #[test]
    fn test_filter_self() {
        let filter = TriggerFilter::new();
        assert!(!filter.passes(5, VolumeTag::Body, u32::MAX, 5));

        let filter_self = TriggerFilter::new().allow_self_overlap();
        assert!(filter_self.passes(5, VolumeTag::Body, u32::MAX, 5));
    }

    #[test]
    fn test_filter_layers() {
        let filter = TriggerFilter::new().with_layers(0b0011);

        assert!(filter.passes(1, VolumeTag::Body, 0b0001, 0));
        assert!(filter.passes(2, VolumeTag::Body, 0b0010, 0));
        assert!(!filter.passes(3, VolumeTag::Body, 0b0100, 0));

        let excluding = TriggerFilter::new().without_layers(0b0100);
        assert!(!excluding.passes(3, VolumeTag::Body, 0b0110, 0));
    }

    #[test]
    fn test_filter_blocked() {
        let filter = TriggerFilter::new().block_owners([100, 200]);

        assert!(filter.passes(50, VolumeTag::Body, u32::MAX, 0));
        assert!(!filter.passes(100, VolumeTag::Body, u32::MAX, 0));
        assert!(!filter.passes(200, VolumeTag::Body, u32::MAX, 0));
    }

    #[test]
    fn test_zone_tags() {
        assert!(VolumeTag::Detection.is_zone());
        assert!(VolumeTag::Threat.is_zone());
        assert!(!VolumeTag::Hit.is_zone());
    }
}
