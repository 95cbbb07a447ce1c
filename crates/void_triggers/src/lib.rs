//! Void Triggers - 2D Overlap Volumes
//!
//! This crate provides the overlap volumes combat actors are built from.
//!
//! # Features
//!
//! - Circle and box volume shapes
//! - Volume tags that separate bodies, hit volumes, and detection zones
//! - Owner and faction filtering
//! - Collider set with per-owner enable/disable
//! - Enter/Exit/Stay tracking for detection zones
//!
//! # Example
//!
//! ```ignore
//! use void_triggers::prelude::*;
//!
//! let mut colliders = ColliderSet::new();
//! let body = colliders.insert(Collider::new(7, VolumeTag::Body, TriggerVolume::circle(0.5)));
//! let sight = colliders.insert(Collider::new(
//!     7,
//!     VolumeTag::Detection,
//!     TriggerVolume::circle(10.0),
//! ));
//!
//! // Only bodies of other owners are candidates for a detection zone
//! let seen = colliders.overlapping(sight, &TriggerFilter::bodies());
//! ```

pub mod collider;
pub mod events;
pub mod filter;
pub mod volume;
pub mod zone;

pub mod prelude {
    pub use crate::collider::{Collider, ColliderHandle, ColliderSet, Overlap};
    pub use crate::events::{OverlapEvent, OverlapEventType};
    pub use crate::filter::{TriggerFilter, VolumeTag};
    pub use crate::volume::TriggerVolume;
    pub use crate::zone::ZoneTracker;
}

pub use prelude::*;
