use bevy_ecs::{
    entity::Entity,
    query::{With, Without},
    system::{Commands, Query, ResMut},
};
use tracing::trace;

use crate::{
    constants::PELLET_SCORE,
    systems::{
        components::{ItemCollider, PlayerControlled, ScoreResource},
        movement::{Aabb, Collider, Position},
    },
};

/// Eats at most one pellet per tick: the first, in query order, that the player overlaps.
pub fn item_system(
    mut commands: Commands,
    mut score: ResMut<ScoreResource>,
    players: Query<(&Position, &Collider), (With<PlayerControlled>, Without<ItemCollider>)>,
    pellets: Query<(Entity, &Position, &Collider), With<ItemCollider>>,
) {
    for (player_position, player_collider) in players.iter() {
        let player_box = Aabb::of(player_position, player_collider);

        let eaten = pellets
            .iter()
            .find(|(_, position, collider)| Aabb::of(position, collider).overlaps(&player_box));

        if let Some((entity, position, _)) = eaten {
            commands.entity(entity).despawn();
            score.0 += PELLET_SCORE;
            trace!(at = %position.0, score = score.0, "Pellet eaten");
        }
    }
}
