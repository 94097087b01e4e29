//! # avian2d Integration for bevy-strider
//!
//! In addition to the instruction in bevy-strider's documentation:
//!
//! * Add [`StriderAvian2dPlugin`] to the app.
//! * Use [`StriderSpatialExtAvian2d`] as the parameter of `StriderControllerPlugin`.
//! * Give the character a collider, and put obstacles on the [`CollisionLayers`] that
//!   `StriderConfig::obstacle_layers` refers to.
mod spatial_ext;

use avian2d::prelude::*;
use bevy::ecs::schedule::{InternedScheduleLabel, ScheduleLabel};
use bevy::prelude::*;
use bevy_strider_physics_integration_layer::StriderSystemSet;

pub use spatial_ext::StriderSpatialExtAvian2d;

/// Add this plugin to use avian2d as a physics backend.
///
/// This plugin should be used in addition to `StriderControllerPlugin`.
pub struct StriderAvian2dPlugin {
    schedule: InternedScheduleLabel,
}

impl StriderAvian2dPlugin {
    pub fn new(schedule: impl ScheduleLabel) -> Self {
        Self {
            schedule: schedule.intern(),
        }
    }
}

impl Default for StriderAvian2dPlugin {
    fn default() -> Self {
        Self::new(Update)
    }
}

impl Plugin for StriderAvian2dPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            self.schedule,
            StriderSystemSet.run_if(|physics_time: Res<Time<Physics>>| !physics_time.is_paused()),
        );
    }
}
