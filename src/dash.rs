use std::fmt;

use bevy::prelude::*;
use bevy_strider_physics_integration_layer::data_for_backends::StriderLayers;
use bevy_strider_physics_integration_layer::spatial_ext::StriderSpatialExt;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::mover::{try_move, StriderMove, StriderMoveOutcome};

/// A dash: moving in a fixed direction over several frames until a distance is covered.
///
/// The dash never slides along walls - the first frame that runs into an obstacle ends it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct StriderDashInput {
    /// The dash ends on the first frame the accumulated movement reaches this distance.
    ///
    /// The last frame is not shortened, so the dash may overshoot by up to one frame's worth of
    /// movement. A distance of zero still moves the character for a single frame.
    pub distance: f32,

    /// The direction of the dash. Like [`StriderMove::direction`], its length scales the speed.
    pub direction: Vec2,

    /// Units per second (for a unit [`direction`](Self::direction)).
    pub speed: f32,

    /// Colliders on these layers stop the dash.
    pub obstacle_layers: StriderLayers,

    /// The radius of the disc swept ahead of the character.
    pub check_radius: f32,
}

impl StriderDashInput {
    fn validate(&self) -> Result<(), StriderDashError> {
        if !self.distance.is_finite() || self.distance < 0.0 {
            return Err(StriderDashError::InvalidDistance(self.distance));
        }
        if !self.direction.is_finite() || self.direction == Vec2::ZERO {
            return Err(StriderDashError::InvalidDirection(self.direction));
        }
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(StriderDashError::InvalidSpeed(self.speed));
        }
        Ok(())
    }

    fn frame_move(&self) -> StriderMove {
        StriderMove {
            direction: self.direction,
            speed: self.speed,
            obstacle_layers: self.obstacle_layers,
            check_radius: self.check_radius,
            allow_sliding: false,
        }
    }
}

/// Reasons for refusing to start a dash.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum StriderDashError {
    #[error("a dash is already running - cancel it before starting a new one")]
    AlreadyDashing,
    #[error("dash distance must be finite and non-negative, got {0}")]
    InvalidDistance(f32),
    #[error("dash direction must be finite and non-zero, got {0}")]
    InvalidDirection(Vec2),
    #[error("dash speed must be finite and positive, got {0}")]
    InvalidSpeed(f32),
}

/// How a dash ended on its own.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StriderDashEnd {
    DistanceCovered,
    Blocked { obstacle: Entity },
}

/// Invoked once when a dash ends on its own. Never invoked for cancelled dashes.
pub type StriderDashCallback = Box<dyn FnOnce(StriderDashEnd) + Send + Sync>;

/// A dash that is currently running.
pub struct StriderDash {
    input: StriderDashInput,
    travelled: f32,
    frames: u32,
    on_complete: Option<StriderDashCallback>,
}

impl StriderDash {
    pub fn input(&self) -> &StriderDashInput {
        &self.input
    }

    /// The distance covered so far.
    pub fn travelled(&self) -> f32 {
        self.travelled
    }

    /// The number of movement steps taken so far.
    pub fn frames(&self) -> u32 {
        self.frames
    }
}

impl fmt::Debug for StriderDash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StriderDash")
            .field("input", &self.input)
            .field("travelled", &self.travelled)
            .field("frames", &self.frames)
            .field("has_on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// The result of advancing a [`StriderDashController`] by one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StriderDashStatus {
    /// No dash is running. Nothing was moved.
    Idle,
    /// The dash moved the character and will continue next frame.
    Ongoing,
    /// The dash moved the character (unless blocked) and is now over.
    Finished(StriderDashEnd),
}

/// Runs at most one dash at a time.
///
/// Call [`step`](Self::step) once per frame. [`StriderController`](crate::StriderController)
/// does this automatically when the plugin is installed.
#[derive(Default, Debug)]
pub struct StriderDashController {
    current: Option<StriderDash>,
}

impl StriderDashController {
    /// Start a dash.
    ///
    /// Starting a dash while another one is running is refused with
    /// [`StriderDashError::AlreadyDashing`] - the running dash is left as is.
    pub fn start(&mut self, input: StriderDashInput) -> Result<(), StriderDashError> {
        self.start_inner(input, None)
    }

    /// Like [`start`](Self::start), but calls `on_complete` once the dash ends by covering its
    /// distance or by running into an obstacle.
    pub fn start_with_callback(
        &mut self,
        input: StriderDashInput,
        on_complete: impl 'static + FnOnce(StriderDashEnd) + Send + Sync,
    ) -> Result<(), StriderDashError> {
        self.start_inner(input, Some(Box::new(on_complete)))
    }

    fn start_inner(
        &mut self,
        input: StriderDashInput,
        on_complete: Option<StriderDashCallback>,
    ) -> Result<(), StriderDashError> {
        if self.current.is_some() {
            return Err(StriderDashError::AlreadyDashing);
        }
        input.validate()?;
        self.current = Some(StriderDash {
            input,
            travelled: 0.0,
            frames: 0,
            on_complete,
        });
        Ok(())
    }

    /// Stop the running dash without invoking its callback.
    ///
    /// Returns the dash that was stopped, if there was one.
    pub fn cancel(&mut self) -> Option<StriderDash> {
        self.current.take()
    }

    pub fn is_dashing(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&StriderDash> {
        self.current.as_ref()
    }

    /// Move the character by one frame of the running dash.
    pub fn step<X: StriderSpatialExt + ?Sized>(
        &mut self,
        spatial_ext: &X,
        owner: Entity,
        transform: &mut Transform,
        frame_duration: f32,
    ) -> StriderDashStatus {
        let Some(dash) = self.current.as_mut() else {
            return StriderDashStatus::Idle;
        };

        let outcome = try_move(
            spatial_ext,
            owner,
            transform,
            &dash.input.frame_move(),
            frame_duration,
        );
        dash.travelled += outcome.distance_moved();
        dash.frames += 1;

        let end = match outcome {
            StriderMoveOutcome::Blocked { obstacle } => StriderDashEnd::Blocked { obstacle },
            StriderMoveOutcome::Moved { .. } if dash.travelled < dash.input.distance => {
                return StriderDashStatus::Ongoing;
            }
            StriderMoveOutcome::Moved { .. } => StriderDashEnd::DistanceCovered,
        };

        if let Some(on_complete) = dash.on_complete.take() {
            on_complete(end);
        }
        self.current = None;
        StriderDashStatus::Finished(end)
    }
}
