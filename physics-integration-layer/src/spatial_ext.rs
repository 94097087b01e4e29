use bevy::prelude::*;

use crate::data_for_backends::{StriderLayers, StriderObstacleHit};

/// Spatial queries the movement logic needs from the physics backend.
///
/// Implementations are usually a [`SystemParam`](bevy::ecs::system::SystemParam) wrapping the
/// physics engine's query pipeline, but anything that can answer the two queries will do.
pub trait StriderSpatialExt {
    /// Sweep a disc of `radius` from `origin` along `direction` for up to `max_distance`.
    ///
    /// `direction` does not have to be normalized - only its heading matters. Only colliders in
    /// `layers` are considered, and `owner` (along with any collider attached to it) never is.
    /// Returns the closest blocking obstacle, if any. Colliders already overlapping the disc at
    /// `origin` count as blocking at distance zero.
    fn cast_disc(
        &self,
        origin: Vec2,
        radius: f32,
        direction: Vec2,
        max_distance: f32,
        layers: StriderLayers,
        owner: Entity,
    ) -> Option<StriderObstacleHit>;

    /// Find any collider in `layers` that overlaps a disc of `radius` centered at `point`.
    ///
    /// Like [`cast_disc`](Self::cast_disc), `owner` and its colliders are excluded.
    fn overlap_disc(
        &self,
        point: Vec2,
        radius: f32,
        layers: StriderLayers,
        owner: Entity,
    ) -> Option<Entity>;
}
