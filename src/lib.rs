//! # Strider - A Swept-Disc 2D Character Mover for Bevy
//!
//! Strider moves 2D characters by sweeping a disc along the desired path and refusing to step
//! into obstacles. Blocked diagonal moves can slide along walls, dashes carry a character over
//! several frames until they cover their distance or hit something, and characters can turn
//! toward a heading either instantly or smoothly.
//!
//! Strider does not use forces or velocities - it writes the character's `Transform` directly.
//! It does, however, need a physics backend to answer spatial queries. Currently
//! [bevy-strider-avian2d](https://crates.io/crates/bevy-strider-avian2d) is provided. Other
//! backends only need to implement [`StriderSpatialExt`](spatial_ext::StriderSpatialExt).
//!
//! ## Usage
//!
//! Add the backend's plugin and [`StriderControllerPlugin`], parametrized with the backend's
//! spatial query parameter:
//!
//! ```no_run
//! # use bevy::prelude::*;
//! # use bevy_strider::prelude::*;
//! # use bevy_strider::spatial_ext::StriderSpatialExt;
//! # use bevy_strider::{StriderLayers, StriderObstacleHit};
//! # use bevy::ecs::system::SystemParam;
//! # #[derive(SystemParam)]
//! # struct StriderSpatialExtAvian2d<'w, 's> { _query: Query<'w, 's, &'static Transform> }
//! # impl StriderSpatialExt for StriderSpatialExtAvian2d<'_, '_> {
//! #     fn cast_disc(&self, _: Vec2, _: f32, _: Vec2, _: f32, _: StriderLayers, _: Entity)
//! #         -> Option<StriderObstacleHit> { None }
//! #     fn overlap_disc(&self, _: Vec2, _: f32, _: StriderLayers, _: Entity)
//! #         -> Option<Entity> { None }
//! # }
//! # let mut app = App::new();
//! app.add_plugins(StriderControllerPlugin::<StriderSpatialExtAvian2d>::default());
//! ```
//!
//! Spawn the character with a [`StriderController`] (and optionally a [`StriderConfig`]), and
//! feed it from a system in [`StriderUserControlsSystemSet`]:
//!
//! ```no_run
//! # use bevy::prelude::*;
//! # use bevy_strider::prelude::*;
//! # #[derive(Component)]
//! # struct PlayerInput { direction: Vec2, dash_pressed: bool }
//! fn player_control_system(
//!     mut query: Query<(&mut StriderController, &StriderConfig, &PlayerInput)>,
//! ) {
//!     for (mut controller, config, input) in query.iter_mut() {
//!         let direction = input.direction.normalize_or_zero();
//!
//!         if input.dash_pressed && direction != Vec2::ZERO {
//!             if let Err(err) = controller.dash(config.dash(5.0, direction, 20.0)) {
//!                 warn!("Cannot dash: {err}");
//!             }
//!         }
//!         controller.walk(config.walk(direction, 4.0));
//!         if direction != Vec2::ZERO {
//!             controller.smooth_rotate_to_direction(direction, config.rotate_speed);
//!         }
//!     }
//! }
//! ```
//!
//! The individual pieces - [`try_move`](mover::try_move),
//! [`StriderDashController`](dash::StriderDashController) and
//! [`StriderRotator`](rotation::StriderRotator) - do not need the ECS and can be driven
//! manually with any [`StriderSpatialExt`](spatial_ext::StriderSpatialExt) and `Transform`.
pub mod config;
mod controller;
pub mod dash;
pub mod mover;
pub mod rotation;
#[cfg(test)]
mod test_util;

pub mod prelude {
    pub use crate::config::StriderConfig;
    pub use crate::dash::{StriderDashEnd, StriderDashError, StriderDashInput};
    pub use crate::mover::{try_move, StriderMove, StriderMoveOutcome};
    pub use crate::rotation::{rotate_to_angle, rotate_to_direction};
    pub use crate::{StriderController, StriderControllerPlugin, StriderUserControlsSystemSet};
    pub use crate::{StriderDashFinished, StriderRotationReached};
}

pub use bevy_strider_physics_integration_layer::data_for_backends::*;
pub use bevy_strider_physics_integration_layer::spatial_ext;
pub use bevy_strider_physics_integration_layer::{StriderPipelineStages, StriderSystemSet};
pub use controller::{
    StriderController, StriderControllerPlugin, StriderDashFinished, StriderRotationReached,
};

use bevy::prelude::*;

/// The user controls should use this system set.
///
/// Systems that feed walk, dash and rotation input to a [`StriderController`] should run in
/// this set, so that the input is consumed in the same frame it was given.
#[derive(SystemSet, Clone, PartialEq, Eq, Debug, Hash)]
pub struct StriderUserControlsSystemSet;
