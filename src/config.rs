use bevy::prelude::*;
use bevy_strider_physics_integration_layer::data_for_backends::StriderLayers;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::dash::StriderDashInput;
use crate::mover::StriderMove;

/// Per-character settings.
///
/// [`StriderController`](crate::StriderController) requires this component, so characters that
/// don't insert one get the defaults.
#[derive(Component, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct StriderConfig {
    /// Colliders on these layers block walking and dashing.
    pub obstacle_layers: StriderLayers,

    /// The radius of the disc swept ahead of the character when checking for obstacles.
    ///
    /// This is usually the radius of the character's own collider.
    pub check_radius: f32,

    /// Whether walking slides along walls when the direct path is blocked.
    ///
    /// Dashes never slide.
    pub allow_sliding: bool,

    /// A suggested speed for smooth rotations. See
    /// [`StriderRotationIntent::speed`](crate::rotation::StriderRotationIntent::speed).
    pub rotate_speed: f32,

    /// A smooth rotation that gets this close (in radians) to its target snaps onto it and
    /// finishes.
    ///
    /// Values below `1e-3` may never be reached by a rotation slower than one frame, since f32
    /// quaternion angles bottom out around `7e-4`.
    pub rotation_snap_angle: f32,
}

impl Default for StriderConfig {
    fn default() -> Self {
        Self {
            obstacle_layers: StriderLayers::ALL,
            check_radius: 0.3,
            allow_sliding: false,
            rotate_speed: 5.0,
            rotation_snap_angle: 1e-3,
        }
    }
}

impl StriderConfig {
    /// Build a single frame of walking with this configuration's obstacle settings.
    pub fn walk(&self, direction: Vec2, speed: f32) -> StriderMove {
        StriderMove {
            direction,
            speed,
            obstacle_layers: self.obstacle_layers,
            check_radius: self.check_radius,
            allow_sliding: self.allow_sliding,
        }
    }

    /// Build a dash with this configuration's obstacle settings.
    pub fn dash(&self, distance: f32, direction: Vec2, speed: f32) -> StriderDashInput {
        StriderDashInput {
            distance,
            direction,
            speed,
            obstacle_layers: self.obstacle_layers,
            check_radius: self.check_radius,
        }
    }
}
