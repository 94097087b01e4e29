use std::marker::PhantomData;

use bevy::ecs::schedule::{InternedScheduleLabel, ScheduleLabel};
use bevy::ecs::system::{StaticSystemParam, SystemParam};
use bevy::prelude::*;
use bevy_strider_physics_integration_layer::data_for_backends::StriderToggle;
use bevy_strider_physics_integration_layer::spatial_ext::StriderSpatialExt;
use bevy_strider_physics_integration_layer::{StriderPipelineStages, StriderSystemSet};

use crate::config::StriderConfig;
use crate::dash::{
    StriderDashController, StriderDashEnd, StriderDashError, StriderDashInput, StriderDashStatus,
};
use crate::mover::{try_move, StriderMove, StriderMoveOutcome};
use crate::rotation::StriderRotator;
use crate::StriderUserControlsSystemSet;

/// The main plugin for Strider.
///
/// `X` is the spatial query parameter of the physics backend, e.g. `StriderSpatialExtAvian2d`.
/// The backend's own plugin must be added as well.
pub struct StriderControllerPlugin<X> {
    schedule: InternedScheduleLabel,
    _phantom: PhantomData<fn() -> X>,
}

impl<X> StriderControllerPlugin<X> {
    pub fn new(schedule: impl ScheduleLabel) -> Self {
        Self {
            schedule: schedule.intern(),
            _phantom: PhantomData,
        }
    }
}

impl<X> Default for StriderControllerPlugin<X> {
    fn default() -> Self {
        Self::new(Update)
    }
}

impl<X> Plugin for StriderControllerPlugin<X>
where
    X: 'static + SystemParam,
    for<'w, 's> X::Item<'w, 's>: StriderSpatialExt,
{
    fn build(&self, app: &mut App) {
        app.configure_sets(
            self.schedule,
            (
                StriderUserControlsSystemSet,
                StriderPipelineStages::Movement,
                StriderPipelineStages::Rotation,
            )
                .chain()
                .in_set(StriderSystemSet),
        );
        app.add_event::<StriderDashFinished>();
        app.add_event::<StriderRotationReached>();
        app.add_systems(
            self.schedule,
            apply_movement_system::<X>.in_set(StriderPipelineStages::Movement),
        );
        app.add_systems(
            self.schedule,
            apply_rotation_system.in_set(StriderPipelineStages::Rotation),
        );
    }
}

/// The main component used for interaction with the controls and animation code.
///
/// Every frame, the game code may feed input to the controller by calling its methods. This
/// should be done in a system that runs in [`StriderUserControlsSystemSet`].
///
/// Walk input is only good for a single frame - if it is not fed again the character stands
/// still. Dashes and smooth rotations, once started, carry on by themselves over the following
/// frames.
#[derive(Component, Default, Debug)]
#[require(StriderConfig, Transform)]
pub struct StriderController {
    walk: Option<StriderMove>,
    dash: StriderDashController,
    rotator: StriderRotator,
    last_outcome: Option<StriderMoveOutcome>,
}

impl StriderController {
    /// Walk this frame.
    ///
    /// Ignored while a dash is running.
    pub fn walk(&mut self, input: StriderMove) -> &mut Self {
        self.walk = Some(input);
        self
    }

    /// Start a dash. See [`StriderDashController::start`].
    pub fn dash(&mut self, input: StriderDashInput) -> Result<(), StriderDashError> {
        log_dash_start(self.dash.start(input))
    }

    /// Start a dash with a completion callback. See
    /// [`StriderDashController::start_with_callback`].
    ///
    /// A [`StriderDashFinished`] event is sent regardless of the callback.
    pub fn dash_with_callback(
        &mut self,
        input: StriderDashInput,
        on_complete: impl 'static + FnOnce(StriderDashEnd) + Send + Sync,
    ) -> Result<(), StriderDashError> {
        log_dash_start(self.dash.start_with_callback(input, on_complete))
    }

    /// Stop the running dash. Returns `true` if there was one.
    ///
    /// No callback is invoked and no [`StriderDashFinished`] is sent for a cancelled dash.
    pub fn cancel_dash(&mut self) -> bool {
        if let Some(dash) = self.dash.cancel() {
            debug!(
                "Dash cancelled after {} frames and {} units",
                dash.frames(),
                dash.travelled()
            );
            true
        } else {
            false
        }
    }

    pub fn is_dashing(&self) -> bool {
        self.dash.is_dashing()
    }

    pub fn dash_controller(&self) -> &StriderDashController {
        &self.dash
    }

    pub fn smooth_rotate_to_direction(&mut self, direction: Vec2, speed: f32) -> &mut Self {
        self.rotator.smooth_rotate_to_direction(direction, speed);
        self
    }

    pub fn smooth_rotate_to_angle(&mut self, angle: f32, speed: f32) -> &mut Self {
        self.rotator.smooth_rotate_to_angle(angle, speed);
        self
    }

    pub fn stop_rotate(&mut self) -> &mut Self {
        self.rotator.stop_rotate();
        self
    }

    pub fn is_rotating(&self) -> bool {
        self.rotator.is_rotating()
    }

    pub fn rotator(&self) -> &StriderRotator {
        &self.rotator
    }

    pub fn rotator_mut(&mut self) -> &mut StriderRotator {
        &mut self.rotator
    }

    /// The result of this frame's walk.
    ///
    /// `None` on frames without walk input and while dashing - dash steps report through
    /// [`StriderDashFinished`] instead. Frames where the character is disabled leave it as is.
    pub fn last_outcome(&self) -> Option<StriderMoveOutcome> {
        self.last_outcome
    }
}

fn log_dash_start(result: Result<(), StriderDashError>) -> Result<(), StriderDashError> {
    match &result {
        Ok(()) => debug!("Dash started"),
        Err(err) => warn!("Dash refused: {err}"),
    }
    result
}

/// Sent when a dash ends on its own - by covering its distance or by running into an obstacle.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct StriderDashFinished {
    pub entity: Entity,
    pub end: StriderDashEnd,
}

/// Sent when a smooth rotation lands on its target.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StriderRotationReached {
    pub entity: Entity,
}

#[allow(clippy::type_complexity)]
fn apply_movement_system<X>(
    time: Res<Time>,
    spatial_ext: StaticSystemParam<X>,
    mut query: Query<(
        Entity,
        &mut StriderController,
        &mut Transform,
        Option<&StriderToggle>,
    )>,
    mut dash_finished_writer: EventWriter<StriderDashFinished>,
) where
    X: 'static + SystemParam,
    for<'w, 's> X::Item<'w, 's>: StriderSpatialExt,
{
    let frame_duration = time.delta_secs();
    if frame_duration == 0.0 {
        return;
    }
    let spatial_ext = &*spatial_ext;
    for (entity, mut controller, mut transform, strider_toggle) in query.iter_mut() {
        let controller = controller.as_mut();
        let walk = controller.walk.take();
        match strider_toggle.copied().unwrap_or_default() {
            StriderToggle::Disabled => continue,
            StriderToggle::Enabled => {}
        }
        controller.last_outcome = None;

        match controller
            .dash
            .step(spatial_ext, entity, &mut transform, frame_duration)
        {
            StriderDashStatus::Idle => {
                if let Some(walk) = walk {
                    controller.last_outcome = Some(try_move(
                        spatial_ext,
                        entity,
                        &mut transform,
                        &walk,
                        frame_duration,
                    ));
                }
            }
            StriderDashStatus::Ongoing => {
                if walk.is_some() {
                    debug!("Discarding walk input for {entity} because it is dashing");
                }
            }
            StriderDashStatus::Finished(end) => {
                debug!("Dash of {entity} finished: {end:?}");
                dash_finished_writer.write(StriderDashFinished { entity, end });
            }
        }
    }
}

fn apply_rotation_system(
    time: Res<Time>,
    mut query: Query<(
        Entity,
        &mut StriderController,
        &StriderConfig,
        &mut Transform,
        Option<&StriderToggle>,
    )>,
    mut rotation_reached_writer: EventWriter<StriderRotationReached>,
) {
    let frame_duration = time.delta_secs();
    if frame_duration == 0.0 {
        return;
    }
    for (entity, mut controller, config, mut transform, strider_toggle) in query.iter_mut() {
        if strider_toggle.copied().unwrap_or_default() == StriderToggle::Disabled {
            continue;
        }
        if !controller.rotator.is_rotating() {
            continue;
        }
        if controller.rotator.apply(
            &mut transform.rotation,
            frame_duration,
            config.rotation_snap_angle,
        ) {
            debug!("Rotation of {entity} reached its target");
            rotation_reached_writer.write(StriderRotationReached { entity });
        }
    }
}
