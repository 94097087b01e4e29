use avian2d::prelude::*;
use bevy::{ecs::system::SystemParam, prelude::*};
use bevy_strider_physics_integration_layer::{
    data_for_backends::{StriderLayers, StriderObstacleHit},
    spatial_ext::StriderSpatialExt,
};

/// Shape casts hitting more colliders than that only consider the first ones found.
const MAX_SWEEP_HITS: u32 = 16;

#[derive(SystemParam)]
pub struct StriderSpatialExtAvian2d<'w, 's> {
    spatial_query: SpatialQuery<'w, 's>,
    collider_of_query: Query<'w, 's, &'static ColliderOf>,
}

impl StriderSpatialExtAvian2d<'_, '_> {
    fn filter(layers: StriderLayers, owner: Entity) -> SpatialQueryFilter {
        SpatialQueryFilter::from_mask(LayerMask(layers.bits())).with_excluded_entities([owner])
    }

    /// Colliders that are children of the character still belong to it.
    fn belongs_to_owner(&self, collider: Entity, owner: Entity) -> bool {
        collider == owner
            || self
                .collider_of_query
                .get(collider)
                .is_ok_and(|collider_of| collider_of.body == owner)
    }
}

impl StriderSpatialExt for StriderSpatialExtAvian2d<'_, '_> {
    fn cast_disc(
        &self,
        origin: Vec2,
        radius: f32,
        direction: Vec2,
        max_distance: f32,
        layers: StriderLayers,
        owner: Entity,
    ) -> Option<StriderObstacleHit> {
        let Ok(direction) = Dir2::new(direction) else {
            return None;
        };
        let hits = self.spatial_query.shape_hits(
            &Collider::circle(radius),
            origin,
            0.0,
            direction,
            MAX_SWEEP_HITS,
            &ShapeCastConfig::from_max_distance(max_distance),
            &Self::filter(layers, owner),
        );
        hits.into_iter()
            .filter(|hit| !self.belongs_to_owner(hit.entity, owner))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
            .map(|hit| StriderObstacleHit {
                entity: hit.entity,
                distance: hit.distance,
            })
    }

    fn overlap_disc(
        &self,
        point: Vec2,
        radius: f32,
        layers: StriderLayers,
        owner: Entity,
    ) -> Option<Entity> {
        self.spatial_query
            .shape_intersections(
                &Collider::circle(radius),
                point,
                0.0,
                &Self::filter(layers, owner),
            )
            .into_iter()
            .find(|entity| !self.belongs_to_owner(*entity, owner))
    }
}
