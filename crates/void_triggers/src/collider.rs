//! Collider set and overlap queries

use crate::filter::{TriggerFilter, VolumeTag};
use crate::volume::TriggerVolume;
use std::collections::BTreeMap;
use void_math::Vec2;

/// Handle to a collider in a [`ColliderSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColliderHandle(u32);

impl ColliderHandle {
    /// Raw index
    pub fn index(&self) -> u32 {
        self.0
    }
}

/// A volume attached to an owner
#[derive(Debug, Clone)]
pub struct Collider {
    /// Owning entity
    pub owner: u64,
    /// What the volume is for
    pub tag: VolumeTag,
    /// Shape
    pub volume: TriggerVolume,
    /// Offset from the owner's position
    pub offset: Vec2,
    /// Layer bits
    pub layers: u32,
    /// Disabled colliders never overlap anything
    pub enabled: bool,
    /// Owner position, synced by [`ColliderSet::set_owner_position`]
    origin: Vec2,
}

impl Collider {
    /// Create a collider centered on its owner
    pub fn new(owner: u64, tag: VolumeTag, volume: TriggerVolume) -> Self {
        Self {
            owner,
            tag,
            volume,
            offset: Vec2::ZERO,
            layers: u32::MAX,
            enabled: true,
            origin: Vec2::ZERO,
        }
    }

    /// Set the offset from the owner
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Set layer bits
    pub fn with_layers(mut self, layers: u32) -> Self {
        self.layers = layers;
        self
    }

    /// Start disabled
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// World-space center of the volume
    pub fn center(&self) -> Vec2 {
        self.origin + self.offset
    }
}

/// One result of an overlap query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    /// Collider that was hit
    pub handle: ColliderHandle,
    /// Its owner
    pub owner: u64,
    /// Its tag
    pub tag: VolumeTag,
    /// Distance between volume centers
    pub distance: f32,
}

/// All colliders of a simulation
#[derive(Debug, Default)]
pub struct ColliderSet {
    colliders: BTreeMap<ColliderHandle, Collider>,
    next_index: u32,
}

impl ColliderSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a collider
    pub fn insert(&mut self, collider: Collider) -> ColliderHandle {
        let handle = ColliderHandle(self.next_index);
        self.next_index += 1;
        self.colliders.insert(handle, collider);
        handle
    }

    /// Remove a collider
    pub fn remove(&mut self, handle: ColliderHandle) -> Option<Collider> {
        self.colliders.remove(&handle)
    }

    /// Get a collider
    pub fn get(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.colliders.get(&handle)
    }

    /// Get a mutable collider
    pub fn get_mut(&mut self, handle: ColliderHandle) -> Option<&mut Collider> {
        self.colliders.get_mut(&handle)
    }

    /// Number of colliders
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Move every collider of `owner` with it
    pub fn set_owner_position(&mut self, owner: u64, position: Vec2) {
        for collider in self.colliders.values_mut().filter(|c| c.owner == owner) {
            collider.origin = position;
        }
    }

    /// Change a collider's offset from its owner
    pub fn set_offset(&mut self, handle: ColliderHandle, offset: Vec2) {
        if let Some(collider) = self.colliders.get_mut(&handle) {
            collider.offset = offset;
        }
    }

    /// Enable or disable one collider
    pub fn set_enabled(&mut self, handle: ColliderHandle, enabled: bool) {
        if let Some(collider) = self.colliders.get_mut(&handle) {
            collider.enabled = enabled;
        }
    }

    /// Whether a collider exists and is enabled
    pub fn is_enabled(&self, handle: ColliderHandle) -> bool {
        self.colliders.get(&handle).is_some_and(|c| c.enabled)
    }

    /// Disable every collider of `owner`, returning how many were switched off
    pub fn disable_owner(&mut self, owner: u64) -> usize {
        let mut count = 0;
        for collider in self.colliders.values_mut().filter(|c| c.owner == owner) {
            if collider.enabled {
                collider.enabled = false;
                count += 1;
            }
        }
        count
    }

    /// Handles of all colliders belonging to `owner`
    pub fn handles_of(&self, owner: u64) -> Vec<ColliderHandle> {
        self.colliders
            .iter()
            .filter(|(_, c)| c.owner == owner)
            .map(|(h, _)| *h)
            .collect()
    }

    /// Enabled colliders overlapping `handle` that pass `filter`, nearest first.
    /// A disabled or unknown query collider overlaps nothing.
    pub fn overlapping(&self, handle: ColliderHandle, filter: &TriggerFilter) -> Vec<Overlap> {
        let Some(query) = self.colliders.get(&handle) else {
            return Vec::new();
        };
        if !query.enabled {
            return Vec::new();
        }

        let center = query.center();
        let mut results: Vec<Overlap> = self
            .colliders
            .iter()
            .filter(|(other_handle, _)| **other_handle != handle)
            .filter(|(_, other)| other.enabled)
            .filter(|(_, other)| filter.passes(other.owner, other.tag, other.layers, query.owner))
            .filter(|(_, other)| query.volume.overlaps(center, &other.volume, other.center()))
            .map(|(other_handle, other)| Overlap {
                handle: *other_handle,
                owner: other.owner,
                tag: other.tag,
                distance: center.distance(other.center()),
            })
            .collect();

        results.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.handle.cmp(&b.handle))
        });
        results
    }

    /// Distinct owners overlapping `handle`, nearest first
    pub fn overlapping_owners(&self, handle: ColliderHandle, filter: &TriggerFilter) -> Vec<u64> {
        let mut owners = Vec::new();
        for overlap in self.overlapping(handle, filter) {
            if !owners.contains(&overlap.owner) {
                owners.push(overlap.owner);
            }
        }
        owners
    }
}
