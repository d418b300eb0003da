//! Scene-side collision data model
//!
//! The engine never owns entity or mesh lifetime: the terrain subsystem
//! builds `Area`s out of pre-transformed collision objects once per load,
//! and everything in here is read-only for the duration of a tick.

pub mod collision_object;
pub mod area;

pub use collision_object::{CollisionMeshTemplate, CollisionObject};
pub use area::{Area, AreaId};

use crate::geometry::OrientedBox;
use crate::terrain::CollisionProperty;

slotmap::new_key_type! {
    /// Stable key of a collision object within its area
    pub struct CollisionObjectKey;
}

/// A dynamic interaction volume: door, water body, zone trigger.
///
/// Tested against the moving entity each resolver sub-step via the SAT
/// box-box solver. Solid volumes resolve movement like terrain; non-solid
/// volumes only report their property.
#[derive(Debug, Clone, Copy)]
pub struct InteractionVolume {
    /// Oriented world-space bounds of the volume
    pub bounds: OrientedBox,
    /// Collision metadata reported on contact
    pub property: CollisionProperty,
    /// Whether the volume blocks movement (doors) or merely reports (water)
    pub solid: bool,
}

/// Errors raised while building scene collision data
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    /// The object's local-to-world matrix is not invertible
    #[error("collision object transform is degenerate (non-invertible)")]
    DegenerateTransform,
}
