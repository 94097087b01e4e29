use std::cell::Cell;

use bevy::prelude::*;
use bevy_strider_physics_integration_layer::data_for_backends::{
    StriderLayers, StriderObstacleHit,
};
use bevy_strider_physics_integration_layer::spatial_ext::StriderSpatialExt;

pub const OWNER: Entity = Entity::from_raw(1000);

/// Axis-aligned boxes standing in for a physics world.
///
/// Disc sweeps are approximated by casting a ray against each box inflated by the radius, so
/// corners are square instead of rounded. Good enough as long as tests stay clear of corners.
#[derive(Default)]
pub struct BoxWorld {
    obstacles: Vec<(Entity, StriderLayers, Rect)>,
    cast_count: Cell<usize>,
}

impl BoxWorld {
    pub fn add_box(&mut self, layers: StriderLayers, rect: Rect) -> Entity {
        let entity = Entity::from_raw(self.obstacles.len() as u32 + 1);
        self.add_box_for(entity, layers, rect)
    }

    pub fn add_box_for(&mut self, entity: Entity, layers: StriderLayers, rect: Rect) -> Entity {
        self.obstacles.push((entity, layers, rect));
        entity
    }

    pub fn cast_count(&self) -> usize {
        self.cast_count.get()
    }

    fn candidates(
        &self,
        layers: StriderLayers,
        owner: Entity,
    ) -> impl '_ + Iterator<Item = (Entity, Rect)> {
        self.obstacles
            .iter()
            .filter(move |(entity, obstacle_layers, _)| {
                *entity != owner && obstacle_layers.intersects(layers)
            })
            .map(|(entity, _, rect)| (*entity, *rect))
    }
}

fn ray_entry(origin: Vec2, direction: Vec2, max_distance: f32, rect: Rect) -> Option<f32> {
    let mut entry = 0.0f32;
    let mut exit = max_distance;
    for axis in 0..2 {
        let (o, d, lo, hi) = (origin[axis], direction[axis], rect.min[axis], rect.max[axis]);
        if d == 0.0 {
            if o < lo || hi < o {
                return None;
            }
            continue;
        }
        let (mut t1, mut t2) = ((lo - o) / d, (hi - o) / d);
        if t2 < t1 {
            std::mem::swap(&mut t1, &mut t2);
        }
        entry = entry.max(t1);
        exit = exit.min(t2);
        if exit < entry {
            return None;
        }
    }
    Some(entry)
}

impl StriderSpatialExt for BoxWorld {
    fn cast_disc(
        &self,
        origin: Vec2,
        radius: f32,
        direction: Vec2,
        max_distance: f32,
        layers: StriderLayers,
        owner: Entity,
    ) -> Option<StriderObstacleHit> {
        self.cast_count.set(self.cast_count.get() + 1);
        let direction = direction.normalize_or_zero();
        self.candidates(layers, owner)
            .filter_map(|(entity, rect)| {
                let distance = ray_entry(origin, direction, max_distance, rect.inflate(radius))?;
                Some(StriderObstacleHit { entity, distance })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn overlap_disc(
        &self,
        point: Vec2,
        radius: f32,
        layers: StriderLayers,
        owner: Entity,
    ) -> Option<Entity> {
        self.candidates(layers, owner)
            .find(|(_, rect)| rect.inflate(radius).contains(point))
            .map(|(entity, _)| entity)
    }
}
