use glam::{I8Vec2, Vec2};
use strum_macros::AsRefStr;

use crate::constants::SPEED;

/// The four cardinal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    /// The four cardinal directions.
    /// This is just a convenience constant for iterating over the directions.
    pub const DIRECTIONS: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Returns the opposite direction. Constant time.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns the direction as an I8Vec2.
    pub fn as_ivec2(self) -> I8Vec2 {
        self.into()
    }

    /// The per-tick displacement of an entity moving in this direction.
    pub fn velocity(self) -> Vec2 {
        self.as_ivec2().as_vec2() * SPEED
    }

    pub const fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    pub const fn is_horizontal(self) -> bool {
        !self.is_vertical()
    }
}

impl From<Direction> for I8Vec2 {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => -I8Vec2::Y,
            Direction::Down => I8Vec2::Y,
            Direction::Left => -I8Vec2::X,
            Direction::Right => I8Vec2::X,
        }
    }
}
