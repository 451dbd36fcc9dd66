//! Level construction and the round/game lifecycle.

use bevy_ecs::{
    entity::Entity,
    query::With,
    resource::Resource,
    system::Res,
    world::{Mut, World},
};
use glam::Vec2;
use tracing::{debug, info};

use crate::{
    constants::{MapTile, PELLET_OFFSET, PELLET_SIZE, STARTING_LIVES, TILE_SIZE},
    map::{builder::Map, direction::Direction},
    systems::{
        components::{
            EntityType, GameRng, Ghost, GhostBundle, ItemCollider, LevelEntity, PelletBundle, PlayerBundle, PlayerControlled,
            PlayerLives, Renderable, ScoreResource, WallBundle, WallCollider,
        },
        movement::{try_turn, Aabb, BufferedDirection, Collider, Position, SpawnPoint, Velocity},
    },
    texture::sprites::GameSprite,
};

/// A resource to track the overall stage of the game from a high-level perspective.
#[derive(Resource, Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum GameStage {
    /// The simulation is running.
    #[default]
    Playing,
    /// The last life was lost. Nothing moves until a restart.
    GameOver,
}

/// Run condition for every simulation system.
pub fn is_playing(stage: Res<GameStage>) -> bool {
    *stage == GameStage::Playing
}

/// Despawns every entity built from the map and builds a fresh level from the `Map` resource.
pub fn load_map(world: &mut World) {
    let stale: Vec<Entity> = world
        .query_filtered::<Entity, With<LevelEntity>>()
        .iter(world)
        .collect();
    for entity in stale {
        world.despawn(entity);
    }

    let tile = Vec2::splat(TILE_SIZE as f32);
    let mut walls = Vec::new();
    let mut pellets = Vec::new();
    let mut ghosts = Vec::new();
    let mut player = None;

    {
        let map = world.resource::<Map>();
        for (cell, map_tile) in map.tiles() {
            let origin = Map::cell_to_pixel(cell);
            match map_tile {
                MapTile::Wall => walls.push(WallBundle {
                    position: Position(origin),
                    sprite: Renderable { sprite: GameSprite::Wall },
                    entity_type: EntityType::Wall,
                    collider: Collider { size: tile },
                    wall_collider: WallCollider,
                    level: LevelEntity,
                }),
                MapTile::Pellet => pellets.push(PelletBundle {
                    position: Position(origin + Vec2::splat(PELLET_OFFSET)),
                    entity_type: EntityType::Pellet,
                    collider: Collider {
                        size: Vec2::splat(PELLET_SIZE),
                    },
                    item_collider: ItemCollider,
                    level: LevelEntity,
                }),
                MapTile::GhostSpawn(ghost) => ghosts.push(GhostBundle {
                    ghost,
                    position: Position(origin),
                    spawn: SpawnPoint(origin),
                    velocity: Velocity::stopped(Direction::Right),
                    sprite: Renderable {
                        sprite: GameSprite::Ghost(ghost),
                    },
                    entity_type: EntityType::Ghost,
                    collider: Collider { size: tile },
                    level: LevelEntity,
                }),
                MapTile::PlayerSpawn => {
                    player = Some(PlayerBundle {
                        player: PlayerControlled,
                        position: Position(origin),
                        spawn: SpawnPoint(origin),
                        velocity: Velocity::stopped(Direction::Right),
                        buffered_direction: BufferedDirection::None,
                        sprite: Renderable {
                            sprite: GameSprite::Pacman(Direction::Right),
                        },
                        entity_type: EntityType::Player,
                        collider: Collider { size: tile },
                        level: LevelEntity,
                    })
                }
                MapTile::Empty => {}
            }
        }
    }

    debug!(
        walls = walls.len(),
        pellets = pellets.len(),
        ghosts = ghosts.len(),
        "Level built"
    );

    world.spawn_batch(walls);
    world.spawn_batch(pellets);
    world.spawn_batch(ghosts);
    if let Some(player) = player {
        world.spawn(player);
    }
}

/// Returns the player to its spawn, standing still with nothing buffered. Facing is kept.
pub fn reset_player(spawn: &SpawnPoint, position: &mut Position, velocity: &mut Velocity, buffered: &mut BufferedDirection) {
    position.0 = spawn.0;
    velocity.stop();
    *buffered = BufferedDirection::None;
}

/// Returns a ghost to its spawn and points it somewhere random, if that way is open.
pub fn reset_ghost(
    spawn: &SpawnPoint,
    collider: &Collider,
    position: &mut Position,
    velocity: &mut Velocity,
    rng: &mut GameRng,
    walls: &[Aabb],
) {
    position.0 = spawn.0;
    try_turn(position, velocity, collider, rng.random_direction(), walls);
}

/// Round-local reset: the player and every ghost go back to their spawns.
pub fn reset_positions(world: &mut World) {
    let walls: Vec<Aabb> = world
        .query_filtered::<(&Position, &Collider), With<WallCollider>>()
        .iter(world)
        .map(|(position, collider)| Aabb::of(position, collider))
        .collect();

    let mut players =
        world.query_filtered::<(&SpawnPoint, &mut Position, &mut Velocity, &mut BufferedDirection), With<PlayerControlled>>();
    for (spawn, mut position, mut velocity, mut buffered) in players.iter_mut(world) {
        reset_player(spawn, &mut position, &mut velocity, &mut buffered);
    }

    world.resource_scope(|world, mut rng: Mut<GameRng>| {
        let mut ghosts = world.query_filtered::<(&SpawnPoint, &Collider, &mut Position, &mut Velocity), With<Ghost>>();
        for (spawn, collider, mut position, mut velocity) in ghosts.iter_mut(world) {
            reset_ghost(spawn, collider, &mut position, &mut velocity, &mut rng, &walls);
        }
    });
}

/// Rebuilds the level once every pellet has been eaten. Score and lives carry over.
pub fn round_system(world: &mut World) {
    let remaining = world.query_filtered::<(), With<ItemCollider>>().iter(world).count();
    if remaining > 0 {
        return;
    }

    info!(score = world.resource::<ScoreResource>().0, "Round cleared");
    load_map(world);
    reset_positions(world);
}

/// Starts a new game from scratch after a game over.
pub fn restart(world: &mut World) {
    load_map(world);
    reset_positions(world);
    world.insert_resource(ScoreResource(0));
    world.insert_resource(PlayerLives(STARTING_LIVES));
    world.insert_resource(GameStage::Playing);
    info!("Game restarted");
}
