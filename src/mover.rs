use bevy::prelude::*;
use bevy_strider_physics_integration_layer::data_for_backends::StriderLayers;
use bevy_strider_physics_integration_layer::spatial_ext::StriderSpatialExt;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// A single frame of movement, to be resolved with [`try_move`].
///
/// [`StriderConfig::walk`](crate::config::StriderConfig::walk) builds one from the character's
/// configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct StriderMove {
    /// The heading of the movement.
    ///
    /// This is not normalized - its length scales the displacement, so passing a unit vector
    /// makes [`speed`](Self::speed) the actual speed in units per second.
    pub direction: Vec2,

    /// Units per second (for a unit [`direction`](Self::direction)).
    pub speed: f32,

    /// Colliders on these layers block the movement.
    pub obstacle_layers: StriderLayers,

    /// The radius of the disc swept ahead of the character.
    pub check_radius: f32,

    /// When the direct movement is blocked, try moving only vertically and then only
    /// horizontally.
    ///
    /// Both components of the displacement must be non-zero for this to kick in - a move that is
    /// already axis-aligned has nothing to slide along.
    pub allow_sliding: bool,
}

/// The axis a blocked movement slid along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StriderSlideAxis {
    /// The horizontal component was dropped and the character moved only along Y.
    Vertical,
    /// The vertical component was dropped and the character moved only along X.
    Horizontal,
}

/// The result of [`try_move`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StriderMoveOutcome {
    /// The character was moved.
    Moved {
        /// The length of the displacement that was applied.
        distance: f32,
        /// Set if the direct movement was blocked and only one of its components was applied.
        slid: Option<StriderSlideAxis>,
    },
    /// The character could not move and its position was not touched.
    Blocked {
        /// The obstacle that blocked the direct movement.
        obstacle: Entity,
    },
}

impl StriderMoveOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }

    /// How far the character moved. Zero when blocked.
    pub fn distance_moved(&self) -> f32 {
        match self {
            Self::Moved { distance, .. } => *distance,
            Self::Blocked { .. } => 0.0,
        }
    }
}

/// Move the character for one frame, unless an obstacle is in the way.
///
/// The displacement is `direction * speed * frame_duration`. A disc of
/// [`check_radius`](StriderMove::check_radius) is swept from the character's current position
/// for the length of the displacement. If nothing blocks it, the whole displacement is added to
/// `transform.translation` (the `z` coordinate is never touched).
///
/// If the sweep is blocked and [`allow_sliding`](StriderMove::allow_sliding) is set, the
/// vertical component alone is tried, and then the horizontal component alone. Both attempts
/// start from the position the character had before the call, so whatever gets applied is the
/// entire net displacement.
///
/// A zero displacement always succeeds without querying the physics backend.
///
/// ```
/// # use bevy::prelude::*;
/// # use bevy_strider::prelude::*;
/// # use bevy_strider::spatial_ext::StriderSpatialExt;
/// # use bevy_strider::{StriderLayers, StriderObstacleHit};
/// struct EmptyWorld;
///
/// impl StriderSpatialExt for EmptyWorld {
///     fn cast_disc(&self, _: Vec2, _: f32, _: Vec2, _: f32, _: StriderLayers, _: Entity)
///         -> Option<StriderObstacleHit> { None }
///     fn overlap_disc(&self, _: Vec2, _: f32, _: StriderLayers, _: Entity)
///         -> Option<Entity> { None }
/// }
///
/// let mut transform = Transform::default();
/// let outcome = try_move(
///     &EmptyWorld,
///     Entity::PLACEHOLDER,
///     &mut transform,
///     &StriderConfig::default().walk(Vec2::X, 3.0),
///     0.5,
/// );
/// assert_eq!(outcome.distance_moved(), 1.5);
/// assert_eq!(transform.translation, Vec3::new(1.5, 0.0, 0.0));
/// ```
pub fn try_move<X: StriderSpatialExt + ?Sized>(
    spatial_ext: &X,
    owner: Entity,
    transform: &mut Transform,
    input: &StriderMove,
    frame_duration: f32,
) -> StriderMoveOutcome {
    let origin = transform.translation.truncate();
    let displacement_for = |direction: Vec2| direction * input.speed * frame_duration;
    let sweep = |direction: Vec2, displacement: Vec2| {
        spatial_ext.cast_disc(
            origin,
            input.check_radius,
            direction,
            displacement.length(),
            input.obstacle_layers,
            owner,
        )
    };

    let displacement = displacement_for(input.direction);
    if displacement == Vec2::ZERO {
        return StriderMoveOutcome::Moved {
            distance: 0.0,
            slid: None,
        };
    }

    let Some(hit) = sweep(input.direction, displacement) else {
        transform.translation += displacement.extend(0.0);
        return StriderMoveOutcome::Moved {
            distance: displacement.length(),
            slid: None,
        };
    };

    if !input.allow_sliding || displacement.x == 0.0 || displacement.y == 0.0 {
        return StriderMoveOutcome::Blocked {
            obstacle: hit.entity,
        };
    }

    for (axis, direction) in [
        (StriderSlideAxis::Vertical, input.direction.with_x(0.0)),
        (StriderSlideAxis::Horizontal, input.direction.with_y(0.0)),
    ] {
        let partial = displacement_for(direction);
        if sweep(direction, partial).is_none() {
            transform.translation += partial.extend(0.0);
            return StriderMoveOutcome::Moved {
                distance: partial.length(),
                slid: Some(axis),
            };
        }
    }

    StriderMoveOutcome::Blocked {
        obstacle: hit.entity,
    }
}

/// Find an obstacle overlapping a disc of `radius` around the character's current position.
///
/// Useful for checking whether a character was placed (or teleported) into a wall.
pub fn find_overlapping_obstacle<X: StriderSpatialExt + ?Sized>(
    spatial_ext: &X,
    owner: Entity,
    transform: &Transform,
    radius: f32,
    obstacle_layers: StriderLayers,
) -> Option<Entity> {
    spatial_ext.overlap_disc(
        transform.translation.truncate(),
        radius,
        obstacle_layers,
        owner,
    )
}
