//! Map construction and building functionality.

use bevy_ecs::resource::Resource;
use glam::{UVec2, Vec2};
use smallvec::SmallVec;
use tracing::debug;

use crate::constants::{MapTile, BOARD_CELL_SIZE, TILE_SIZE};
use crate::error::{GameResult, MapError};
use crate::map::parser::MapTileParser;
use crate::systems::components::Ghost;

/// The main map structure: the immutable level layout every round is built from.
#[derive(Resource, Debug)]
pub struct Map {
    /// The raw tile data for the map, indexed as `tiles[x][y]`.
    tiles: [[MapTile; BOARD_CELL_SIZE.y as usize]; BOARD_CELL_SIZE.x as usize],
    player_spawn: UVec2,
    ghost_spawns: SmallVec<[(Ghost, UVec2); 4]>,
    tunnel_row: usize,
}

impl Map {
    /// Creates a new `Map` instance from a raw board layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the board fails to parse, or if a spawn sits on the
    /// outermost ring of the board where nothing could ever move.
    pub fn new(raw_board: &[&str], tunnel_row: usize) -> GameResult<Map> {
        let parsed = MapTileParser::parse_board(raw_board, tunnel_row)?;

        let on_edge = |cell: UVec2| cell.y == 0 || cell.y == BOARD_CELL_SIZE.y - 1;
        if on_edge(parsed.player_spawn) {
            return Err(MapError::InvalidConfig(format!("player spawn {} lies on the board edge", parsed.player_spawn)).into());
        }
        if let Some((ghost, cell)) = parsed.ghost_spawns.iter().find(|(_, cell)| on_edge(*cell)) {
            return Err(MapError::InvalidConfig(format!("{} spawn {} lies on the board edge", ghost.as_str(), cell)).into());
        }

        debug!(
            player = %parsed.player_spawn,
            ghosts = parsed.ghost_spawns.len(),
            tunnel_row,
            "Map parsed"
        );

        Ok(Map {
            tiles: parsed.tiles,
            player_spawn: parsed.player_spawn,
            ghost_spawns: parsed.ghost_spawns,
            tunnel_row: parsed.tunnel_row,
        })
    }

    /// Converts a cell coordinate into the pixel position of its top-left corner.
    pub fn cell_to_pixel(cell: UVec2) -> Vec2 {
        (cell * TILE_SIZE).as_vec2()
    }

    /// Returns the tile at a cell, or `None` outside the board.
    pub fn tile(&self, cell: UVec2) -> Option<MapTile> {
        self.tiles.get(cell.x as usize)?.get(cell.y as usize).copied()
    }

    /// Iterates every tile in row-major order together with its cell coordinate.
    pub fn tiles(&self) -> impl Iterator<Item = (UVec2, MapTile)> + '_ {
        (0..BOARD_CELL_SIZE.y).flat_map(move |y| {
            (0..BOARD_CELL_SIZE.x).map(move |x| (UVec2::new(x, y), self.tiles[x as usize][y as usize]))
        })
    }

    pub fn player_spawn(&self) -> UVec2 {
        self.player_spawn
    }

    pub fn ghost_spawns(&self) -> &[(Ghost, UVec2)] {
        &self.ghost_spawns
    }

    pub fn tunnel_row(&self) -> usize {
        self.tunnel_row
    }

    /// The pixel y coordinate at which a ghost sits exactly inside the tunnel row.
    pub fn tunnel_y(&self) -> f32 {
        (self.tunnel_row as u32 * TILE_SIZE) as f32
    }

    /// Number of pellets a freshly built round contains.
    pub fn pellet_count(&self) -> usize {
        self.tiles().filter(|(_, tile)| *tile == MapTile::Pellet).count()
    }
}
