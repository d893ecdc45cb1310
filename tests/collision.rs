use bevy_ecs::{event::Events, system::RunSystemOnce, world::World};
use forager::{
    events::{GameEvent, SolidCollision},
    map::{build_tiles, TileGrid, TileSet},
    systems::{collision_system, solid_collision_system, Position, PreviousPosition, Visibility},
};
use glam::{IVec2, Vec2};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

/// A 3x3 map with a single wall in the middle.
fn walled_world(visible: bool) -> World {
    let mut world = common::create_test_world();
    let tile_set = TileSet::from_flags(["grass", "wall"], &[false, true]);
    let mut grid = TileGrid::load("0 0 0\n0 1 0\n0 0 0", tile_set.len());
    build_tiles(&mut world, &mut grid, &tile_set).unwrap();
    if visible {
        for (_, entity) in grid.instances() {
            world.get_mut::<Visibility>(entity).unwrap().0 = true;
        }
    }
    world.insert_resource(grid);
    world
}

fn step_into_wall(world: &mut World) -> bevy_ecs::entity::Entity {
    let player = common::spawn_test_player(world, Vec2::new(0.0, -1.0));
    world.get_mut::<PreviousPosition>(player).unwrap().0 = Vec2::new(0.0, -1.0);
    world.get_mut::<Position>(player).unwrap().0 = Vec2::new(0.3, -1.0);
    player
}

fn collision_events(world: &mut World) -> Vec<GameEvent> {
    world.resource_mut::<Events<GameEvent>>().drain().collect()
}

#[test]
fn test_visible_solid_blocks_and_reports() {
    let mut world = walled_world(true);
    let player = step_into_wall(&mut world);
    let wall = world.resource::<TileGrid>().instance(IVec2::new(1, 1)).unwrap();

    world.run_system_once(solid_collision_system).expect("System should run successfully");

    assert_that(&world.get::<Position>(player).unwrap().0).is_equal_to(Vec2::new(0.0, -1.0));
    let events: Vec<SolidCollision> = world.resource_mut::<Events<SolidCollision>>().drain().collect();
    assert_eq!(events, vec![SolidCollision { entity: player, tile: wall }]);
}

#[test]
fn test_hidden_solid_does_not_block() {
    let mut world = walled_world(false);
    let player = step_into_wall(&mut world);

    world.run_system_once(solid_collision_system).expect("System should run successfully");

    assert_that(&world.get::<Position>(player).unwrap().0).is_equal_to(Vec2::new(0.3, -1.0));
    assert_that(&world.resource::<Events<SolidCollision>>().is_empty()).is_true();
}

#[test]
fn test_clear_of_wall_is_not_blocked() {
    let mut world = walled_world(true);
    // Player half width 0.4 plus wall half width 0.5: the wall starts at x = 0.1.
    let player = common::spawn_test_player(&mut world, Vec2::new(0.05, -1.0));

    world.run_system_once(solid_collision_system).expect("System should run successfully");

    assert_that(&world.get::<Position>(player).unwrap().0).is_equal_to(Vec2::new(0.05, -1.0));
}

#[test]
fn test_far_away_mover_is_not_blocked() {
    let mut world = walled_world(true);
    let far = Vec2::new(3.0e9, -3.0e9);
    let player = common::spawn_test_player(&mut world, far);

    world.run_system_once(solid_collision_system).expect("System should run successfully");

    assert_that(&world.get::<Position>(player).unwrap().0).is_equal_to(far);
    assert_that(&world.resource::<Events<SolidCollision>>().is_empty()).is_true();
}

#[test]
fn test_contact_reported_once_while_touching() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, Vec2::ZERO);
    let snake = common::spawn_test_snake(&mut world, Vec2::new(0.5, 0.0));

    world.run_system_once(collision_system).expect("System should run successfully");
    assert_eq!(collision_events(&mut world), vec![GameEvent::Collision(player, snake)]);

    world.run_system_once(collision_system).expect("System should run successfully");
    assert_that(&collision_events(&mut world).is_empty()).is_true();
}

#[test]
fn test_contact_reported_again_after_separating() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, Vec2::ZERO);
    let plant = common::spawn_test_plant(&mut world, 0, Vec2::new(0.5, 0.0));

    world.run_system_once(collision_system).expect("System should run successfully");
    collision_events(&mut world);

    world.get_mut::<Position>(player).unwrap().0 = Vec2::new(-2.0, 0.0);
    world.run_system_once(collision_system).expect("System should run successfully");
    assert_that(&collision_events(&mut world).is_empty()).is_true();

    world.get_mut::<Position>(player).unwrap().0 = Vec2::ZERO;
    world.run_system_once(collision_system).expect("System should run successfully");
    assert_eq!(collision_events(&mut world), vec![GameEvent::Collision(player, plant)]);
}

#[test]
fn test_distant_entities_do_not_collide() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world, Vec2::ZERO);
    common::spawn_test_snake(&mut world, Vec2::new(1.0, 0.0));

    world.run_system_once(collision_system).expect("System should run successfully");

    assert_that(&collision_events(&mut world).is_empty()).is_true();
}
