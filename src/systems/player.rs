use bevy_ecs::{
    query::{With, Without},
    system::Query,
};
use tracing::trace;

use crate::{
    systems::{
        components::{PlayerControlled, Renderable, WallCollider},
        movement::{collect_walls, step, try_turn, Aabb, BufferedDirection, Collider, Position, StepOutcome, Velocity, WallQuery},
    },
    texture::sprites::GameSprite,
};

type PlayerQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static Collider,
        &'static mut Position,
        &'static mut Velocity,
        &'static mut BufferedDirection,
        &'static mut Renderable,
    ),
    (With<PlayerControlled>, Without<WallCollider>),
>;

/// Applies the player's buffered direction once the way is open.
///
/// The buffer survives until a tick where one step in that direction would not hit a wall.
pub fn player_turn_system(walls: WallQuery, mut players: PlayerQuery) {
    let walls = collect_walls(&walls);

    for (collider, mut position, mut velocity, mut buffered, mut renderable) in players.iter_mut() {
        let Some(direction) = buffered.direction() else {
            continue;
        };

        let probe = Aabb::of(&position, collider).translated(direction.velocity());
        if walls.iter().any(|wall| probe.overlaps(wall)) {
            continue;
        }

        if try_turn(&mut position, &mut velocity, collider, direction, &walls) {
            trace!(direction = ?direction, position = %position.0, "Buffered turn accepted");
            *buffered = BufferedDirection::None;
            renderable.sprite = GameSprite::Pacman(direction);
        }
    }
}

/// Moves the player one step, stopping at walls and wrapping through the side tunnels.
pub fn player_movement_system(
    walls: WallQuery,
    mut players: Query<(&Collider, &Velocity, &mut Position), (With<PlayerControlled>, Without<WallCollider>)>,
) {
    let walls = collect_walls(&walls);

    for (collider, velocity, mut position) in players.iter_mut() {
        if step(&mut position, velocity, collider, &walls) == StepOutcome::Wrapped {
            trace!(x = position.0.x, "Player wrapped");
        }
    }
}
