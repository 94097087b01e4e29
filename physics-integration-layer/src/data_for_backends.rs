use std::ops::{BitAnd, BitOr};

use bevy::prelude::*;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Allows disabling Strider for a specific entity.
///
/// This can be used to let some other system temporarily take control over a character's pose.
///
/// This component is not mandatory - if omitted, Strider will just assume it is enabled for that
/// entity.
#[derive(Component, Default, Debug, PartialEq, Eq, Clone, Copy)]
pub enum StriderToggle {
    /// Do not move or rotate the character.
    ///
    /// A running dash and a running smooth rotation are frozen and resume once the toggle goes
    /// back to `Enabled`. Walk input fed while disabled is discarded.
    Disabled,
    #[default]
    /// Strider behaves normally.
    Enabled,
}

/// A bitmask of collision layers, used to pick which colliders count as obstacles.
///
/// Bit `n` stands for layer `n`. Backends translate this to the physics engine's own layer mask
/// type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct StriderLayers(pub u32);

impl StriderLayers {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(u32::MAX);

    /// A mask with only the given layer set.
    ///
    /// Panics if `layer` is not below 32.
    pub const fn layer(layer: u32) -> Self {
        assert!(layer < 32, "collision layer out of range");
        Self(1 << layer)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl Default for StriderLayers {
    fn default() -> Self {
        Self::ALL
    }
}

impl BitOr for StriderLayers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for StriderLayers {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl From<u32> for StriderLayers {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

/// The first obstacle found by [`cast_disc`](crate::spatial_ext::StriderSpatialExt::cast_disc).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StriderObstacleHit {
    /// The entity of the collider that blocked the sweep.
    pub entity: Entity,
    /// How far along the sweep direction the disc traveled before touching the obstacle.
    pub distance: f32,
}
