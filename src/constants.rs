//! This module contains all the constants used in the game.

use std::time::Duration;

use glam::UVec2;

use crate::systems::components::Ghost;

/// The default simulation period (20 ticks per second).
pub const LOOP_TIME: Duration = Duration::from_millis(50);

/// The size of each tile, in pixels.
pub const TILE_SIZE: u32 = 32;
/// The size of the game board, in tiles.
pub const BOARD_CELL_SIZE: UVec2 = UVec2::new(19, 21);
/// The size of the game board, in pixels. This is also the canvas size.
pub const BOARD_PIXEL_SIZE: UVec2 = UVec2::new(BOARD_CELL_SIZE.x * TILE_SIZE, BOARD_CELL_SIZE.y * TILE_SIZE);

/// Distance travelled by a moving entity in one tick, in pixels.
pub const SPEED: f32 = TILE_SIZE as f32 / 4.0;

/// Pellets are small squares centred within their tile.
pub const PELLET_SIZE: f32 = 4.0;
pub const PELLET_OFFSET: f32 = (TILE_SIZE as f32 - PELLET_SIZE) / 2.0;
pub const PELLET_SCORE: u32 = 10;

pub const STARTING_LIVES: u8 = 3;

/// The row in which ghosts are pushed upward out of the side corridors.
pub const TUNNEL_ROW: usize = 9;

/// Where the HUD line is drawn, in pixels.
pub const HUD_ORIGIN: UVec2 = UVec2::new(TILE_SIZE / 2, TILE_SIZE / 2);

/// An enum representing the different types of tiles on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapTile {
    /// A corridor tile without a pellet.
    Empty,
    /// A wall tile.
    Wall,
    /// A corridor tile holding a pellet.
    Pellet,
    /// Where the player starts each round.
    PlayerSpawn,
    /// Where a particular ghost starts each round.
    GhostSpawn(Ghost),
}

/// The raw layout of the game board, as a 2D array of characters.
pub const RAW_BOARD: [&str; BOARD_CELL_SIZE.y as usize] = [
    "XXXXXXXXXXXXXXXXXXX",
    "X        X        X",
    "X XX XXX X XXX XX X",
    "X                 X",
    "X XX X XXXXX X XX X",
    "X    X       X    X",
    "XXXX XXXX XXXX XXXX",
    "OOOX X       X XOOO",
    "XXXX X XXrXX X XXXX",
    "O       bpo       O",
    "XXXX X XXXXX X XXXX",
    "OOOX X       X XOOO",
    "XXXX X XXXXX X XXXX",
    "X        X        X",
    "X XX XXX X XXX XX X",
    "X  X     P     X  X",
    "XX X X XXXXX X X XX",
    "X    X   X   X    X",
    "X XXXXXX X XXXXXX X",
    "X                 X",
    "XXXXXXXXXXXXXXXXXXX",
];
