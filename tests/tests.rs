use std::time::Duration;

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_strider::dash::StriderDashEnd;
use bevy_strider::mover::StriderSlideAxis;
use bevy_strider::prelude::*;
use bevy_strider::rotation::rotation_facing_direction;
use bevy_strider::spatial_ext::StriderSpatialExt;
use bevy_strider::{StriderLayers, StriderObstacleHit, StriderSystemSet, StriderToggle};

const FRAME: f32 = 1.0 / 60.0;

#[derive(Resource, Default)]
struct Walls(Vec<(Entity, Rect)>);

/// A backend that knows nothing but axis-aligned walls on every layer.
#[derive(SystemParam)]
struct WallsExt<'w> {
    walls: Res<'w, Walls>,
}

impl StriderSpatialExt for WallsExt<'_> {
    fn cast_disc(
        &self,
        origin: Vec2,
        radius: f32,
        direction: Vec2,
        max_distance: f32,
        layers: StriderLayers,
        owner: Entity,
    ) -> Option<StriderObstacleHit> {
        if layers.is_empty() {
            return None;
        }
        let direction = direction.normalize_or_zero();
        // Sample along the sweep - coarse, but the walls in these tests are thick.
        let steps = (max_distance / 0.01).ceil().max(1.0) as usize;
        (0..=steps).find_map(|step| {
            let distance = max_distance * step as f32 / steps as f32;
            let center = origin + direction * distance;
            self.walls
                .0
                .iter()
                .find(|(entity, rect)| *entity != owner && rect.inflate(radius).contains(center))
                .map(|(entity, _)| StriderObstacleHit {
                    entity: *entity,
                    distance,
                })
        })
    }

    fn overlap_disc(
        &self,
        point: Vec2,
        radius: f32,
        _layers: StriderLayers,
        owner: Entity,
    ) -> Option<Entity> {
        self.walls
            .0
            .iter()
            .find(|(entity, rect)| *entity != owner && rect.inflate(radius).contains(point))
            .map(|(entity, _)| *entity)
    }
}

#[derive(Resource, Default)]
struct Collected {
    dashes: Vec<StriderDashFinished>,
    rotations: Vec<StriderRotationReached>,
}

fn collect_events(
    mut dash_finished_reader: EventReader<StriderDashFinished>,
    mut rotation_reached_reader: EventReader<StriderRotationReached>,
    mut collected: ResMut<Collected>,
) {
    collected
        .dashes
        .extend(dash_finished_reader.read().copied());
    collected
        .rotations
        .extend(rotation_reached_reader.read().copied());
}

fn make_app(walls: &[Rect], config: StriderConfig) -> (App, Entity) {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
        FRAME,
    )));
    app.insert_resource(Walls(
        walls
            .iter()
            .enumerate()
            .map(|(i, rect)| (Entity::from_raw(500 + i as u32), *rect))
            .collect(),
    ));
    app.add_plugins(StriderControllerPlugin::<WallsExt>::default());
    app.init_resource::<Collected>();
    app.add_systems(Update, collect_events.after(StriderSystemSet));

    let character = app
        .world_mut()
        .spawn((StriderController::default(), config))
        .id();
    // The first frame has no delta, so Strider skips it.
    app.update();
    (app, character)
}

fn controller(app: &mut App, entity: Entity) -> Mut<StriderController> {
    app.world_mut()
        .get_mut::<StriderController>(entity)
        .expect("character has a controller")
}

fn translation(app: &App, entity: Entity) -> Vec3 {
    app.world()
        .get::<Transform>(entity)
        .expect("character has a transform")
        .translation
}

#[test]
fn controller_requires_config_and_transform() {
    let mut app = App::new();
    let entity = app.world_mut().spawn(StriderController::default()).id();
    assert_eq!(
        app.world().get::<StriderConfig>(entity),
        Some(&StriderConfig::default())
    );
    assert!(app.world().get::<Transform>(entity).is_some());
}

#[test]
fn walk_input_lasts_a_single_frame() {
    let (mut app, character) = make_app(&[], StriderConfig::default());

    let walk = app
        .world()
        .get::<StriderConfig>(character)
        .unwrap()
        .walk(Vec2::X, 6.0);
    controller(&mut app, character).walk(walk);
    app.update();

    let after_walk = translation(&app, character);
    assert!((after_walk.x - 0.1).abs() < 1e-4);
    assert_eq!(after_walk.y, 0.0);
    let outcome = controller(&mut app, character).last_outcome().unwrap();
    assert!(outcome.succeeded());

    app.update();
    assert_eq!(translation(&app, character), after_walk);
    assert_eq!(controller(&mut app, character).last_outcome(), None);
}

#[test]
fn blocked_outcome_clears_once_walking_stops() {
    let (mut app, character) =
        make_app(&[Rect::new(0.35, -1.0, 2.0, 1.0)], StriderConfig::default());

    controller(&mut app, character).walk(StriderConfig::default().walk(Vec2::X, 6.0));
    app.update();
    assert_eq!(
        controller(&mut app, character).last_outcome(),
        Some(StriderMoveOutcome::Blocked {
            obstacle: Entity::from_raw(500),
        })
    );

    app.update();
    assert_eq!(controller(&mut app, character).last_outcome(), None);

    controller(&mut app, character).walk(StriderConfig::default().walk(Vec2::X, 6.0));
    controller(&mut app, character)
        .dash(StriderConfig::default().dash(5.0, Vec2::NEG_X, 6.0))
        .unwrap();
    app.update();
    assert_eq!(controller(&mut app, character).last_outcome(), None);
}

#[test]
fn walking_into_a_wall_slides_when_configured() {
    let config = StriderConfig {
        allow_sliding: true,
        check_radius: 0.5,
        ..Default::default()
    };
    let (mut app, character) = make_app(&[Rect::new(0.55, -10.0, 2.0, 10.0)], config.clone());

    controller(&mut app, character).walk(config.walk(Vec2::new(6.0, 6.0), 1.0));
    app.update();

    let outcome = controller(&mut app, character).last_outcome();
    assert!(matches!(
        outcome,
        Some(StriderMoveOutcome::Moved {
            distance,
            slid: Some(StriderSlideAxis::Vertical),
        }) if (distance - 6.0 * FRAME).abs() < 1e-4
    ));
    let position = translation(&app, character);
    assert_eq!(position.x, 0.0);
    assert!((position.y - 0.1).abs() < 1e-4);
}

#[test]
fn dash_runs_over_several_frames_and_reports_once() {
    let (mut app, character) = make_app(&[], StriderConfig::default());
    let dash = StriderConfig::default().dash(5.0, Vec2::Y, 20.0);
    controller(&mut app, character).dash(dash).unwrap();

    let mut frames = 0;
    while controller(&mut app, character).is_dashing() {
        frames += 1;
        assert!(frames <= 20, "dash did not end");
        // Walking is ignored while dashing.
        controller(&mut app, character).walk(StriderConfig::default().walk(Vec2::X, 100.0));
        app.update();
        if controller(&mut app, character).is_dashing() {
            assert!(app.world().resource::<Collected>().dashes.is_empty());
        }
    }

    assert!((15..=16).contains(&frames), "took {frames} frames");
    let position = translation(&app, character);
    assert_eq!(position.x, 0.0);
    assert!((5.0..5.4).contains(&position.y));
    assert_eq!(
        app.world().resource::<Collected>().dashes,
        vec![StriderDashFinished {
            entity: character,
            end: StriderDashEnd::DistanceCovered,
        }]
    );

    app.update();
    app.update();
    assert_eq!(app.world().resource::<Collected>().dashes.len(), 1);
}

#[test]
fn dash_into_a_wall_reports_the_wall() {
    let (mut app, character) =
        make_app(&[Rect::new(-5.0, 1.0, 5.0, 2.0)], StriderConfig::default());
    controller(&mut app, character)
        .dash(StriderConfig::default().dash(10.0, Vec2::Y, 30.0))
        .unwrap();

    for _ in 0..20 {
        app.update();
    }

    assert!(!controller(&mut app, character).is_dashing());
    let dashes = &app.world().resource::<Collected>().dashes;
    assert_eq!(dashes.len(), 1);
    assert!(matches!(
        dashes[0].end,
        StriderDashEnd::Blocked { obstacle } if obstacle == Entity::from_raw(500)
    ));
    assert!(translation(&app, character).y < 0.7);
}

#[test]
fn cancelled_dash_sends_nothing() {
    let (mut app, character) = make_app(&[], StriderConfig::default());
    controller(&mut app, character)
        .dash(StriderConfig::default().dash(5.0, Vec2::X, 1.0))
        .unwrap();
    app.update();
    let stopped_at = translation(&app, character);

    assert!(controller(&mut app, character).cancel_dash());
    for _ in 0..5 {
        app.update();
    }

    assert_eq!(translation(&app, character), stopped_at);
    assert!(app.world().resource::<Collected>().dashes.is_empty());
    assert!(!controller(&mut app, character).cancel_dash());
}

#[test]
fn second_dash_is_refused_while_the_first_runs() {
    let (mut app, character) = make_app(&[], StriderConfig::default());
    let mut strider = controller(&mut app, character);
    strider
        .dash(StriderConfig::default().dash(5.0, Vec2::X, 1.0))
        .unwrap();
    assert_eq!(
        strider.dash(StriderConfig::default().dash(5.0, Vec2::Y, 1.0)),
        Err(StriderDashError::AlreadyDashing)
    );
}

#[test]
fn smooth_rotation_lands_and_reports() {
    let (mut app, character) = make_app(&[], StriderConfig::default());
    controller(&mut app, character).smooth_rotate_to_direction(Vec2::X, 10.0);

    for _ in 0..300 {
        if !controller(&mut app, character).is_rotating() {
            break;
        }
        app.update();
    }

    assert!(!controller(&mut app, character).is_rotating());
    assert_eq!(
        app.world().get::<Transform>(character).unwrap().rotation,
        rotation_facing_direction(Vec2::X)
    );
    assert_eq!(
        app.world().resource::<Collected>().rotations,
        vec![StriderRotationReached { entity: character }]
    );
}

#[test]
fn disabled_characters_are_frozen() {
    let (mut app, character) = make_app(&[], StriderConfig::default());
    app.world_mut()
        .entity_mut(character)
        .insert(StriderToggle::Disabled);
    controller(&mut app, character)
        .dash(StriderConfig::default().dash(1.0, Vec2::X, 6.0))
        .unwrap();
    controller(&mut app, character).smooth_rotate_to_angle(1.0, 5.0);

    for _ in 0..10 {
        app.update();
    }
    assert_eq!(translation(&app, character), Vec3::ZERO);
    assert!(controller(&mut app, character).is_dashing());
    assert!(controller(&mut app, character).is_rotating());

    app.world_mut()
        .entity_mut(character)
        .insert(StriderToggle::Enabled);
    app.update();
    assert!((translation(&app, character).x - 0.1).abs() < 1e-4);
}

#[cfg(feature = "serialize")]
#[test]
fn config_survives_ron() {
    let config = StriderConfig {
        obstacle_layers: StriderLayers::layer(2) | StriderLayers::layer(4),
        check_radius: 0.75,
        allow_sliding: true,
        ..Default::default()
    };

    let serialized = ron::to_string(&config).expect("Unable to serialize the configuration");
    let deserialized: StriderConfig =
        ron::from_str(&serialized).expect("Unable to deserialize the configuration");

    assert_eq!(deserialized, config);
}
