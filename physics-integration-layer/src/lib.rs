//! # Physics Integration Layer for bevy-strider
//!
//! Crates that implement a physics backend for bevy-strider depend on this crate instead of on
//! the main crate. It holds the [`StriderSpatialExt`](spatial_ext::StriderSpatialExt) trait the
//! movement logic sweeps through, and the system sets the backend plugins hook into.
use bevy::prelude::*;

pub mod data_for_backends;
pub mod spatial_ext;

/// Umbrella system set for [`StriderPipelineStages`].
///
/// The physics backends' plugins are responsible for preventing this entire system set from
/// running when the physics backend itself is paused.
#[derive(SystemSet, Clone, PartialEq, Eq, Debug, Hash)]
pub struct StriderSystemSet;

/// The various stages of the Strider pipeline.
#[derive(SystemSet, Clone, PartialEq, Eq, Debug, Hash)]
pub enum StriderPipelineStages {
    /// Walk and dash input is resolved against the physics world and written to the `Transform`.
    Movement,
    /// Smooth rotations are advanced toward their targets.
    Rotation,
}
