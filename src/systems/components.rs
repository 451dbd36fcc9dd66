use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use strum_macros::EnumIter;

use crate::constants::STARTING_LIVES;
use crate::map::direction::Direction;
use crate::systems::movement::{BufferedDirection, Collider, Position, SpawnPoint, Velocity};
use crate::texture::sprites::GameSprite;

/// A tag component for entities that are controlled by the player.
#[derive(Default, Component)]
pub struct PlayerControlled;

/// The four ghosts, identified by the map character that spawns them.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Ghost {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

impl Ghost {
    /// Maps a board character to the ghost it spawns, if any.
    pub fn from_spawn_char(c: char) -> Option<Ghost> {
        match c {
            'r' => Some(Ghost::Blinky),
            'p' => Some(Ghost::Pinky),
            'b' => Some(Ghost::Inky),
            'o' => Some(Ghost::Clyde),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Ghost::Blinky => "blinky",
            Ghost::Pinky => "pinky",
            Ghost::Inky => "inky",
            Ghost::Clyde => "clyde",
        }
    }
}

/// A tag component denoting the type of entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Player,
    Ghost,
    Wall,
    Pellet,
}

/// A component for entities drawn with a sprite.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderable {
    pub sprite: GameSprite,
}

/// Marker components for collision filtering
#[derive(Component)]
pub struct WallCollider;

#[derive(Component)]
pub struct ItemCollider;

/// Marks every entity built from the map, so a rebuild can find and despawn them.
#[derive(Component)]
pub struct LevelEntity;

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: PlayerControlled,
    pub position: Position,
    pub spawn: SpawnPoint,
    pub velocity: Velocity,
    pub buffered_direction: BufferedDirection,
    pub sprite: Renderable,
    pub entity_type: EntityType,
    pub collider: Collider,
    pub level: LevelEntity,
}

#[derive(Bundle)]
pub struct GhostBundle {
    pub ghost: Ghost,
    pub position: Position,
    pub spawn: SpawnPoint,
    pub velocity: Velocity,
    pub sprite: Renderable,
    pub entity_type: EntityType,
    pub collider: Collider,
    pub level: LevelEntity,
}

#[derive(Bundle)]
pub struct WallBundle {
    pub position: Position,
    pub sprite: Renderable,
    pub entity_type: EntityType,
    pub collider: Collider,
    pub wall_collider: WallCollider,
    pub level: LevelEntity,
}

#[derive(Bundle)]
pub struct PelletBundle {
    pub position: Position,
    pub entity_type: EntityType,
    pub collider: Collider,
    pub item_collider: ItemCollider,
    pub level: LevelEntity,
}

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScoreResource(pub u32);

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerLives(pub u8);

impl Default for PlayerLives {
    fn default() -> Self {
        Self(STARTING_LIVES)
    }
}

/// The random source behind every ghost decision.
#[derive(Resource)]
pub struct GameRng(pub SmallRng);

impl GameRng {
    /// Picks one of the four cardinal directions uniformly.
    pub fn random_direction(&mut self) -> Direction {
        *Direction::DIRECTIONS.choose(&mut self.0).unwrap_or(&Direction::Right)
    }
}
