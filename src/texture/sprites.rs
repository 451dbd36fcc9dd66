//! A structured representation of all sprite assets in the game.
//!
//! Every sprite is a variant of `GameSprite`, so asset paths are generated in one
//! place instead of being passed around as raw strings.

use strum::IntoEnumIterator;

use crate::map::direction::Direction;
use crate::systems::components::Ghost;

/// A top-level enum that encompasses all game sprites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSprite {
    /// Pac-Man facing a given direction.
    Pacman(Direction),
    /// A ghost's body, coloured by kind.
    Ghost(Ghost),
    /// A single wall tile.
    Wall,
}

impl GameSprite {
    /// Generates the asset path for the sprite, relative to the assets directory.
    pub fn to_path(self) -> String {
        match self {
            GameSprite::Pacman(dir) => format!("pacman/{}.png", dir.as_ref()),
            GameSprite::Ghost(ghost) => format!("ghost/{}.png", ghost.as_str()),
            GameSprite::Wall => "maze/wall.png".to_string(),
        }
    }

    /// Every sprite the game can draw, for preloading.
    pub fn all() -> impl Iterator<Item = GameSprite> {
        Direction::DIRECTIONS
            .into_iter()
            .map(GameSprite::Pacman)
            .chain(Ghost::iter().map(GameSprite::Ghost))
            .chain(std::iter::once(GameSprite::Wall))
    }
}
