#![allow(dead_code)]

use bevy_ecs::{entity::Entity, query::With, world::World};
use glam::Vec2;
use pacman_lite::{
    config::GameConfig,
    constants::{RAW_BOARD, TILE_SIZE, TUNNEL_ROW},
    game::Game,
    map::builder::Map,
    platform,
    systems::{
        components::{
            EntityType, GameRng, Ghost, ItemCollider, PlayerControlled, PlayerLives, Renderable, ScoreResource, WallCollider,
        },
        movement::{BufferedDirection, Collider, Position, SpawnPoint, Velocity},
        state::GameStage,
    },
    texture::sprites::GameSprite,
};

pub const SEED: u64 = 0x5EED;

pub fn tile() -> Vec2 {
    Vec2::splat(TILE_SIZE as f32)
}

pub fn seeded_config() -> GameConfig {
    GameConfig {
        seed: Some(SEED),
        ..GameConfig::default()
    }
}

/// A full game on the shipped level with a fixed seed.
pub fn create_game() -> Game {
    Game::new(&seeded_config()).expect("Failed to create game")
}

/// Creates a test map using the default RAW_BOARD
pub fn create_test_map() -> Map {
    Map::new(&RAW_BOARD, TUNNEL_ROW).expect("Failed to create test map")
}

/// A world with every resource the simulation systems read, but no entities.
pub fn create_test_world() -> World {
    let mut world = World::new();
    world.insert_resource(create_test_map());
    world.insert_resource(GameRng(platform::rng(Some(SEED))));
    world.insert_resource(ScoreResource(0));
    world.insert_resource(PlayerLives::default());
    world.insert_resource(GameStage::Playing);
    world
}

pub fn spawn_wall(world: &mut World, at: Vec2) -> Entity {
    world
        .spawn((
            Position(at),
            Collider { size: tile() },
            Renderable { sprite: GameSprite::Wall },
            EntityType::Wall,
            WallCollider,
        ))
        .id()
}

pub fn spawn_player(world: &mut World, at: Vec2, velocity: Velocity) -> Entity {
    spawn_player_with_spawn(world, at, at, velocity)
}

pub fn spawn_player_with_spawn(world: &mut World, at: Vec2, spawn: Vec2, velocity: Velocity) -> Entity {
    world
        .spawn((
            PlayerControlled,
            Position(at),
            SpawnPoint(spawn),
            velocity,
            BufferedDirection::None,
            Collider { size: tile() },
            Renderable {
                sprite: GameSprite::Pacman(velocity.direction),
            },
            EntityType::Player,
        ))
        .id()
}

pub fn spawn_ghost(world: &mut World, ghost: Ghost, at: Vec2, spawn: Vec2, velocity: Velocity) -> Entity {
    world
        .spawn((
            ghost,
            Position(at),
            SpawnPoint(spawn),
            velocity,
            Collider { size: tile() },
            Renderable {
                sprite: GameSprite::Ghost(ghost),
            },
            EntityType::Ghost,
        ))
        .id()
}

pub fn spawn_pellet(world: &mut World, at: Vec2) -> Entity {
    world
        .spawn((
            Position(at),
            Collider { size: Vec2::splat(4.0) },
            EntityType::Pellet,
            ItemCollider,
        ))
        .id()
}

pub fn pellet_count(world: &mut World) -> usize {
    world.query_filtered::<(), With<ItemCollider>>().iter(world).count()
}

pub fn player_entity(world: &mut World) -> Entity {
    world
        .query_filtered::<Entity, With<PlayerControlled>>()
        .single(world)
        .expect("Expected exactly one player")
}

pub fn position_of(world: &World, entity: Entity) -> Vec2 {
    world.get::<Position>(entity).expect("Entity has no position").0
}

pub fn velocity_of(world: &World, entity: Entity) -> Velocity {
    *world.get::<Velocity>(entity).expect("Entity has no velocity")
}

/// Ghost entities in the order the simulation processes them.
pub fn ghost_entities(world: &mut World) -> Vec<Entity> {
    world.query_filtered::<Entity, With<Ghost>>().iter(world).collect()
}

/// Number of characters in the shipped board that satisfy `predicate`.
pub fn count_board_chars(predicate: impl Fn(char) -> bool) -> usize {
    RAW_BOARD.iter().flat_map(|row| row.chars()).filter(|&c| predicate(c)).count()
}
