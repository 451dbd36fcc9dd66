use bevy_ecs::{entity::Entity, query::With, world::World};
use glam::Vec2;
use pacman_lite::constants::{PELLET_OFFSET, TILE_SIZE};
use pacman_lite::map::direction::Direction;
use pacman_lite::systems::components::{GameRng, Ghost, ItemCollider, LevelEntity, PlayerLives, ScoreResource, WallCollider};
use pacman_lite::systems::movement::{BufferedDirection, Position, Velocity};
use pacman_lite::platform;
use pacman_lite::systems::state::{load_map, reset_positions, restart, round_system, GameStage};
use speculoos::prelude::*;

mod common;

fn level_entity_count(world: &mut World) -> usize {
    world.query_filtered::<(), With<LevelEntity>>().iter(world).count()
}

#[test]
fn test_load_map_builds_every_tile() {
    let mut world = common::create_test_world();

    load_map(&mut world);

    let walls = common::count_board_chars(|c| c == 'X');
    let pellets = common::count_board_chars(|c| c == ' ');
    let wall_count = world.query_filtered::<(), With<WallCollider>>().iter(&world).count();
    assert_that(&wall_count).is_equal_to(walls);
    assert_that(&common::pellet_count(&mut world)).is_equal_to(pellets);
    assert_that(&common::ghost_entities(&mut world).len()).is_equal_to(4);
    assert_that(&level_entity_count(&mut world)).is_equal_to(walls + pellets + 4 + 1);
}

#[test]
fn test_load_map_places_entities() {
    let mut world = common::create_test_world();

    load_map(&mut world);

    let player = common::player_entity(&mut world);
    assert_that(&common::position_of(&world, player)).is_equal_to(Vec2::new(288.0, 480.0));
    assert_that(&common::velocity_of(&world, player)).is_equal_to(Velocity::stopped(Direction::Right));

    let ghosts: Vec<(Ghost, Vec2)> = world
        .query::<(&Ghost, &Position)>()
        .iter(&world)
        .map(|(ghost, position)| (*ghost, position.0))
        .collect();
    assert_that(&ghosts).is_equal_to(vec![
        (Ghost::Blinky, Vec2::new(288.0, 256.0)),
        (Ghost::Inky, Vec2::new(256.0, 288.0)),
        (Ghost::Pinky, Vec2::new(288.0, 288.0)),
        (Ghost::Clyde, Vec2::new(320.0, 288.0)),
    ]);

    // The first pellet on the board sits centred in cell (1, 1)
    let tile = TILE_SIZE as f32;
    let first_pellet = Vec2::splat(tile + PELLET_OFFSET);
    let has_first_pellet = world
        .query_filtered::<&Position, With<ItemCollider>>()
        .iter(&world)
        .any(|position| position.0 == first_pellet);
    assert_that(&has_first_pellet).is_true();
}

#[test]
fn test_load_map_replaces_previous_level() {
    let mut world = common::create_test_world();
    load_map(&mut world);
    let count = level_entity_count(&mut world);

    load_map(&mut world);

    assert_that(&level_entity_count(&mut world)).is_equal_to(count);
}

#[test]
fn test_reset_positions_returns_player_to_spawn() {
    let mut world = common::create_test_world();
    load_map(&mut world);
    let player = common::player_entity(&mut world);
    world.get_mut::<Position>(player).unwrap().0 = Vec2::new(32.0, 32.0);
    *world.get_mut::<Velocity>(player).unwrap() = Velocity::moving(Direction::Up);
    *world.get_mut::<BufferedDirection>(player).unwrap() = BufferedDirection::Some {
        direction: Direction::Left,
    };

    reset_positions(&mut world);

    assert_that(&common::position_of(&world, player)).is_equal_to(Vec2::new(288.0, 480.0));
    assert_that(&common::velocity_of(&world, player)).is_equal_to(Velocity::stopped(Direction::Up));
    assert_that(world.get::<BufferedDirection>(player).unwrap()).is_equal_to(&BufferedDirection::None);
}

#[test]
fn test_reset_positions_moves_ghosts_at_most_one_step() {
    let mut world = common::create_test_world();
    load_map(&mut world);
    let spawns: Vec<Vec2> = common::ghost_entities(&mut world)
        .into_iter()
        .map(|ghost| common::position_of(&world, ghost))
        .collect();

    reset_positions(&mut world);

    for (ghost, spawn) in common::ghost_entities(&mut world).into_iter().zip(spawns) {
        let distance = common::position_of(&world, ghost).distance(spawn);
        assert_that(&(distance == 0.0 || distance == 8.0)).is_true();
    }
}

#[test]
fn test_round_system_waits_for_last_pellet() {
    let mut world = common::create_test_world();
    load_map(&mut world);
    let player = common::player_entity(&mut world);
    let moved = Vec2::new(64.0, 32.0);
    world.get_mut::<Position>(player).unwrap().0 = moved;

    round_system(&mut world);

    assert_that(&common::position_of(&world, player)).is_equal_to(moved);
}

#[test]
fn test_round_system_rebuilds_when_cleared() {
    let mut world = common::create_test_world();
    load_map(&mut world);
    let pellets = common::pellet_count(&mut world);
    let stale: Vec<_> = world
        .query_filtered::<Entity, With<ItemCollider>>()
        .iter(&world)
        .collect();
    for entity in stale {
        world.despawn(entity);
    }
    world.insert_resource(ScoreResource(120));

    round_system(&mut world);

    assert_that(&common::pellet_count(&mut world)).is_equal_to(pellets);
    assert_that(&world.resource::<ScoreResource>().0).is_equal_to(120);
    let player = common::player_entity(&mut world);
    assert_that(&common::position_of(&world, player)).is_equal_to(Vec2::new(288.0, 480.0));
}

#[test]
fn test_restart_resets_counters() {
    let mut world = common::create_test_world();
    load_map(&mut world);
    world.insert_resource(ScoreResource(990));
    world.insert_resource(PlayerLives(0));
    world.insert_resource(GameStage::GameOver);

    restart(&mut world);

    assert_that(&world.resource::<ScoreResource>().0).is_equal_to(0);
    assert_that(&world.resource::<PlayerLives>().0).is_equal_to(3);
    assert_that(world.resource::<GameStage>()).is_equal_to(&GameStage::Playing);
}

#[test]
fn test_seeded_rng_is_reproducible() {
    let mut first = GameRng(platform::rng(Some(common::SEED)));
    let mut second = GameRng(platform::rng(Some(common::SEED)));

    let a: Vec<Direction> = (0..32).map(|_| first.random_direction()).collect();
    let b: Vec<Direction> = (0..32).map(|_| second.random_direction()).collect();

    assert_that(&a).is_equal_to(b);
}
