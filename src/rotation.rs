use bevy::prelude::*;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// The orientation of a character facing `direction`.
///
/// The character's local Z axis stays on the world Z axis, and its local Y axis is pointed
/// *away* from `direction` - so a sprite drawn with its back along +Y looks toward `direction`.
///
/// The result for a zero `direction` is unspecified.
///
/// ```
/// # use bevy::prelude::*;
/// # use bevy_strider::rotation::rotation_facing_direction;
/// let rotation = rotation_facing_direction(Vec2::X);
/// assert!((rotation * Vec3::Y).abs_diff_eq(Vec3::NEG_X, 1e-6));
/// assert!((rotation * Vec3::Z).abs_diff_eq(Vec3::Z, 1e-6));
/// ```
pub fn rotation_facing_direction(direction: Vec2) -> Quat {
    Quat::from_rotation_z(direction.x.atan2(-direction.y))
}

/// The orientation after turning `angle` radians (counterclockwise) around the Z axis.
pub fn rotation_at_angle(angle: f32) -> Quat {
    Quat::from_rotation_z(angle)
}

/// Immediately turn the character to face `direction`. See [`rotation_facing_direction`].
///
/// This does not stop a smooth rotation that is still in progress.
pub fn rotate_to_direction(transform: &mut Transform, direction: Vec2) {
    transform.rotation = rotation_facing_direction(direction);
}

/// Immediately set the character's orientation to `angle` radians around the Z axis.
///
/// This does not stop a smooth rotation that is still in progress.
pub fn rotate_to_angle(transform: &mut Transform, angle: f32) {
    transform.rotation = rotation_at_angle(angle);
}

/// An in-progress smooth rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct StriderRotationIntent {
    pub target: Quat,

    /// The fraction of the remaining angle covered per second.
    ///
    /// Each frame the orientation is interpolated `speed * frame_duration` of the way toward
    /// the target (capped at the full way).
    pub speed: f32,
}

/// Turns a character toward a target orientation over several frames.
#[derive(Default, Clone, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct StriderRotator {
    intent: Option<StriderRotationIntent>,
}

impl StriderRotator {
    pub fn smooth_rotate_to(&mut self, target: Quat, speed: f32) -> &mut Self {
        self.intent = Some(StriderRotationIntent { target, speed });
        self
    }

    pub fn smooth_rotate_to_direction(&mut self, direction: Vec2, speed: f32) -> &mut Self {
        self.smooth_rotate_to(rotation_facing_direction(direction), speed)
    }

    pub fn smooth_rotate_to_angle(&mut self, angle: f32, speed: f32) -> &mut Self {
        self.smooth_rotate_to(rotation_at_angle(angle), speed)
    }

    /// Abandon the current smooth rotation, leaving the orientation wherever it got to.
    pub fn stop_rotate(&mut self) {
        self.intent = None;
    }

    pub fn is_rotating(&self) -> bool {
        self.intent.is_some()
    }

    pub fn intent(&self) -> Option<&StriderRotationIntent> {
        self.intent.as_ref()
    }

    /// Advance the rotation by one frame.
    ///
    /// Once the remaining angle is within `snap_angle` radians, `rotation` is set exactly to the
    /// target and the rotator goes idle. Returns `true` on that frame.
    pub fn apply(&mut self, rotation: &mut Quat, frame_duration: f32, snap_angle: f32) -> bool {
        let Some(StriderRotationIntent { target, speed }) = self.intent else {
            return false;
        };
        let factor = (speed * frame_duration).clamp(0.0, 1.0);
        let interpolated = rotation.slerp(target, factor).normalize();
        if factor == 1.0 || interpolated.angle_between(target) <= snap_angle {
            *rotation = target;
            self.intent = None;
            true
        } else {
            *rotation = interpolated;
            false
        }
    }
}
