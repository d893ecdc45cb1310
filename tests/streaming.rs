use bevy_ecs::{system::RunSystemOnce, world::World};
use forager::{
    map::{build_tiles, TileGrid, TileSet},
    systems::{is_within_view, tile_visibility_system, PlayerControlled, Position, TileStreamer, Visibility},
};
use glam::{IVec2, Vec2};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

/// A `rows x cols` grid of non-solid tiles, built and inserted into a fresh world.
fn streaming_world(rows: usize, cols: usize, view: (u32, u32)) -> World {
    let mut world = common::create_test_world();
    let text = vec![vec!["0"; cols].join(" "); rows].join("\n");
    let tile_set = TileSet::from_flags(["grass"], &[]);
    let mut grid = TileGrid::load(&text, tile_set.len());
    build_tiles(&mut world, &mut grid, &tile_set).unwrap();
    world.insert_resource(grid);
    world.insert_resource(TileStreamer::new(view.0, view.1));
    world
}

fn visible_coords(world: &mut World) -> Vec<IVec2> {
    let grid = world.resource::<TileGrid>().clone();
    grid.instances()
        .filter(|(_, entity)| world.get::<Visibility>(*entity).unwrap().is_visible())
        .map(|(coord, _)| coord)
        .collect()
}

fn expected_coords(world: &World, center: IVec2, view: (u32, u32)) -> Vec<IVec2> {
    world
        .resource::<TileGrid>()
        .instances()
        .map(|(coord, _)| coord)
        .filter(|coord| is_within_view(*coord, center, view.0, view.1))
        .collect()
}

fn move_player(world: &mut World, position: Vec2) {
    let mut query = world.query_filtered::<&mut Position, bevy_ecs::query::With<PlayerControlled>>();
    query.single_mut(world).unwrap().0 = position;
}

#[test]
fn test_single_tile_view_at_origin() {
    let mut world = streaming_world(3, 3, (1, 1));
    common::spawn_test_player(&mut world, Vec2::ZERO);

    world.run_system_once(tile_visibility_system).expect("System should run successfully");

    assert_eq!(visible_coords(&mut world), vec![IVec2::new(0, 0)]);
}

#[test]
fn test_view_boundary_uses_integer_half() {
    let mut world = streaming_world(1, 12, (4, 1));
    common::spawn_test_player(&mut world, Vec2::new(5.0, 0.0));

    world.run_system_once(tile_visibility_system).expect("System should run successfully");

    let visible = visible_coords(&mut world);
    assert_that(&visible.contains(&IVec2::new(3, 0))).is_true();
    assert_that(&visible.contains(&IVec2::new(7, 0))).is_true();
    assert_that(&visible.contains(&IVec2::new(2, 0))).is_false();
    assert_that(&visible.contains(&IVec2::new(8, 0))).is_false();
    assert_that(&visible.len()).is_equal_to(5);
}

#[test]
fn test_odd_view_rounds_down() {
    let mut world = streaming_world(5, 5, (3, 3));
    common::spawn_test_player(&mut world, Vec2::new(2.0, -2.0));

    world.run_system_once(tile_visibility_system).expect("System should run successfully");

    assert_that(&visible_coords(&mut world).len()).is_equal_to(9);
}

#[test]
fn test_center_rounds_half_to_even() {
    let mut world = streaming_world(1, 8, (1, 1));
    common::spawn_test_player(&mut world, Vec2::new(2.5, 0.0));

    world.run_system_once(tile_visibility_system).expect("System should run successfully");

    assert_eq!(visible_coords(&mut world), vec![IVec2::new(2, 0)]);
}

#[test]
fn test_no_tracked_entity_changes_nothing() {
    let mut world = streaming_world(3, 3, (10, 6));

    world.run_system_once(tile_visibility_system).expect("System should run successfully");

    assert_that(&visible_coords(&mut world).is_empty()).is_true();
    assert_that(&world.resource::<TileStreamer>().active_window()).is_none();
}

#[test]
fn test_sliding_window_matches_full_scan() {
    let view = (4, 3);
    let mut world = streaming_world(12, 16, view);
    common::spawn_test_player(&mut world, Vec2::ZERO);

    let path = [
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, -1.0),
        Vec2::new(1.4, -1.2),
        Vec2::new(6.0, -2.0),
        Vec2::new(15.0, -11.0),
        Vec2::new(-3.0, 2.0),
        Vec2::new(7.5, -6.5),
        Vec2::new(30.0, -30.0),
        Vec2::new(4.0, -4.0),
    ];

    for position in path {
        move_player(&mut world, position);
        world.run_system_once(tile_visibility_system).expect("System should run successfully");

        let center = world.resource::<TileGrid>().tile_coord(position);
        assert_eq!(visible_coords(&mut world), expected_coords(&world, center, view), "at {position}");
    }
}

#[test]
fn test_repeated_updates_keep_instance_count() {
    let mut world = streaming_world(4, 4, (2, 2));
    common::spawn_test_player(&mut world, Vec2::new(1.0, -1.0));
    let before = world.resource::<TileGrid>().instances().count();

    for _ in 0..5 {
        world.run_system_once(tile_visibility_system).expect("System should run successfully");
    }

    assert_that(&world.resource::<TileGrid>().instances().count()).is_equal_to(before);
    assert_that(&world.query::<&Visibility>().iter(&world).count()).is_equal_to(before);
}

#[test]
fn test_far_away_player_hides_every_tile() {
    let mut world = streaming_world(2, 2, (10, 6));
    let player = common::spawn_test_player(&mut world, Vec2::new(3.0e9, 0.0));

    world.run_system_once(tile_visibility_system).expect("System should run successfully");
    assert_that(&visible_coords(&mut world)).is_empty();

    world.get_mut::<Position>(player).unwrap().0 = Vec2::new(-3.0e9, 3.0e9);
    world.run_system_once(tile_visibility_system).expect("System should run successfully");
    assert_that(&visible_coords(&mut world)).is_empty();

    move_player(&mut world, Vec2::ZERO);
    world.run_system_once(tile_visibility_system).expect("System should run successfully");
    assert_that(&visible_coords(&mut world).len()).is_equal_to(4);
}

#[test]
fn test_view_predicate_at_coordinate_limits() {
    assert_that(&is_within_view(IVec2::new(0, 0), IVec2::new(i32::MAX, 0), 10, 6)).is_false();
    assert_that(&is_within_view(IVec2::new(i32::MIN, 0), IVec2::new(i32::MAX, 0), 10, 6)).is_false();
    assert_that(&is_within_view(IVec2::new(i32::MAX - 5, 0), IVec2::new(i32::MAX, 0), 10, 6)).is_true();
}
