use bevy_ecs::{
    entity::Entity,
    query::{With, Without},
    system::{Query, Res, ResMut},
};
use smallvec::SmallVec;
use tracing::{info, trace, warn};

use crate::{
    map::{builder::Map, direction::Direction},
    systems::{
        components::{GameRng, Ghost, PlayerControlled, PlayerLives, WallCollider},
        movement::{collect_walls, step, try_turn, Aabb, BufferedDirection, Collider, Position, SpawnPoint, StepOutcome, Velocity, WallQuery},
        state::{reset_ghost, reset_player, GameStage},
    },
};

type GhostQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static Ghost,
        &'static SpawnPoint,
        &'static Collider,
        &'static mut Position,
        &'static mut Velocity,
    ),
    (Without<PlayerControlled>, Without<WallCollider>),
>;

type PlayerQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static SpawnPoint,
        &'static Collider,
        &'static mut Position,
        &'static mut Velocity,
        &'static mut BufferedDirection,
    ),
    (With<PlayerControlled>, Without<Ghost>, Without<WallCollider>),
>;

/// Moves every ghost and resolves ghost/player contact.
///
/// Ghosts are processed one at a time in a stable order. Touching the player costs a life
/// and sends everyone back to their spawns; losing the last life ends the game on the spot,
/// leaving every remaining ghost where it is.
#[allow(clippy::too_many_arguments)]
pub fn ghost_system(
    map: Res<Map>,
    mut rng: ResMut<GameRng>,
    mut lives: ResMut<PlayerLives>,
    mut stage: ResMut<GameStage>,
    walls: WallQuery,
    mut players: PlayerQuery,
    mut ghosts: GhostQuery,
) {
    let walls = collect_walls(&walls);
    let tunnel_y = map.tunnel_y();

    let Ok((player_spawn, player_collider, mut player_position, mut player_velocity, mut player_buffered)) =
        players.single_mut()
    else {
        warn!("Ghost update skipped: expected exactly one player");
        return;
    };

    let order: SmallVec<[Entity; 4]> = ghosts.iter().map(|(entity, ..)| entity).collect();

    for entity in order {
        let Ok((_, ghost, _, collider, position, _)) = ghosts.get(entity) else {
            continue;
        };
        let ghost = *ghost;

        if Aabb::of(position, collider).overlaps(&Aabb::of(&player_position, player_collider)) {
            lives.0 = lives.0.saturating_sub(1);
            if lives.0 == 0 {
                info!(ghost = ghost.as_str(), "Last life lost, game over");
                *stage = GameStage::GameOver;
                return;
            }

            info!(ghost = ghost.as_str(), lives = lives.0, "Life lost");
            reset_player(
                player_spawn,
                &mut player_position,
                &mut player_velocity,
                &mut player_buffered,
            );
            for (_, _, spawn, collider, mut position, mut velocity) in ghosts.iter_mut() {
                reset_ghost(spawn, collider, &mut position, &mut velocity, &mut rng, &walls);
            }
        }

        let Ok((_, _, _, collider, mut position, mut velocity)) = ghosts.get_mut(entity) else {
            continue;
        };

        if position.0.y == tunnel_y && velocity.direction.is_horizontal() {
            try_turn(&mut position, &mut velocity, collider, Direction::Up, &walls);
        }

        let outcome = step(&mut position, &velocity, collider, &walls);
        if outcome != StepOutcome::Moved {
            let direction = rng.random_direction();
            let turned = try_turn(&mut position, &mut velocity, collider, direction, &walls);
            trace!(ghost = ghost.as_str(), ?outcome, ?direction, turned, "Ghost re-routed");
        }
    }
}
