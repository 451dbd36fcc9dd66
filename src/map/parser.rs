//! Map parsing functionality for converting raw board layouts into structured data.

use glam::UVec2;
use smallvec::SmallVec;

use crate::constants::{MapTile, BOARD_CELL_SIZE};
use crate::error::ParseError;
use crate::systems::components::Ghost;

/// Width and height of a board in tiles, as `usize` for indexing.
const WIDTH: usize = BOARD_CELL_SIZE.x as usize;
const HEIGHT: usize = BOARD_CELL_SIZE.y as usize;

/// Represents the parsed data from a raw board layout.
#[derive(Debug)]
pub struct ParsedMap {
    /// The parsed tile layout, indexed as `tiles[x][y]`.
    pub tiles: [[MapTile; HEIGHT]; WIDTH],
    /// The player's starting cell.
    pub player_spawn: UVec2,
    /// Each ghost's starting cell, in board (row-major) order.
    pub ghost_spawns: SmallVec<[(Ghost, UVec2); 4]>,
    /// The row that forces horizontally-moving ghosts upward.
    pub tunnel_row: usize,
}

/// Parser for converting raw board layouts into structured map data.
pub struct MapTileParser;

impl MapTileParser {
    /// Parses a single character into a map tile.
    ///
    /// # Returns
    ///
    /// The parsed map tile, or an error if the character is unknown.
    pub fn parse_character(c: char) -> Result<MapTile, ParseError> {
        match c {
            'X' => Ok(MapTile::Wall),
            ' ' => Ok(MapTile::Pellet),
            'O' => Ok(MapTile::Empty),
            'P' => Ok(MapTile::PlayerSpawn),
            _ => Ghost::from_spawn_char(c)
                .map(MapTile::GhostSpawn)
                .ok_or(ParseError::UnknownCharacter(c)),
        }
    }

    /// Parses a raw board layout into structured map data.
    ///
    /// # Errors
    ///
    /// Returns an error if the board has the wrong dimensions, contains unknown
    /// characters, does not have exactly one player spawn, has no ghost spawns,
    /// or names a tunnel row outside the board.
    pub fn parse_board(raw_board: &[&str], tunnel_row: usize) -> Result<ParsedMap, ParseError> {
        if raw_board.len() != HEIGHT {
            return Err(ParseError::InvalidRowCount {
                expected: HEIGHT,
                found: raw_board.len(),
            });
        }
        if tunnel_row >= HEIGHT {
            return Err(ParseError::TunnelRowOutOfRange {
                row: tunnel_row,
                rows: HEIGHT,
            });
        }

        let mut tiles = [[MapTile::Empty; HEIGHT]; WIDTH];
        let mut player_spawns: SmallVec<[UVec2; 1]> = SmallVec::new();
        let mut ghost_spawns = SmallVec::new();

        for (y, line) in raw_board.iter().enumerate() {
            let width = line.chars().count();
            if width != WIDTH {
                return Err(ParseError::InvalidRowWidth {
                    row: y,
                    expected: WIDTH,
                    found: width,
                });
            }

            for (x, character) in line.chars().enumerate() {
                let tile = Self::parse_character(character)?;
                let cell = UVec2::new(x as u32, y as u32);

                match tile {
                    MapTile::PlayerSpawn => player_spawns.push(cell),
                    MapTile::GhostSpawn(ghost) => ghost_spawns.push((ghost, cell)),
                    _ => {}
                }

                tiles[x][y] = tile;
            }
        }

        let player_spawn = match player_spawns.as_slice() {
            [spawn] => *spawn,
            spawns => return Err(ParseError::InvalidPlayerSpawnCount(spawns.len())),
        };

        if ghost_spawns.is_empty() {
            return Err(ParseError::NoGhostSpawns);
        }

        Ok(ParsedMap {
            tiles,
            player_spawn,
            ghost_spawns,
            tunnel_row,
        })
    }
}
