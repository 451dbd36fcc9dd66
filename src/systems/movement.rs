//! Pixel-space movement: positions, velocities, and axis-aligned collision against walls.

use bevy_ecs::component::Component;
use bevy_ecs::query::With;
use bevy_ecs::system::Query;
use glam::Vec2;

use crate::constants::BOARD_PIXEL_SIZE;
use crate::map::direction::Direction;
use crate::systems::components::WallCollider;

/// The top-left corner of an entity, in pixels.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// Where an entity returns to whenever positions are reset. Never changes after spawning.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint(pub Vec2);

/// The rectangular extent of an entity, in pixels.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub size: Vec2,
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// The box an entity occupies at its current position.
    pub fn of(position: &Position, collider: &Collider) -> Self {
        Self::new(position.0, collider.size)
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// The same box moved by `offset`.
    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.min + offset, self.size)
    }

    /// Strict overlap test; boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

/// Returns true if `aabb` overlaps any box in `others`.
pub fn collides_with_any(aabb: &Aabb, others: &[Aabb]) -> bool {
    others.iter().any(|other| aabb.overlaps(other))
}

/// Facing plus the per-tick displacement derived from it.
///
/// The displacement is either zero or `SPEED` along the facing's axis.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Velocity {
    pub direction: Direction,
    pub delta: Vec2,
}

impl Velocity {
    pub fn moving(direction: Direction) -> Self {
        Self {
            direction,
            delta: direction.velocity(),
        }
    }

    pub fn stopped(direction: Direction) -> Self {
        Self {
            direction,
            delta: Vec2::ZERO,
        }
    }

    /// Zeroes the displacement while keeping the facing.
    pub fn stop(&mut self) {
        self.delta = Vec2::ZERO;
    }

    pub fn is_moving(&self) -> bool {
        self.delta != Vec2::ZERO
    }
}

/// A direction the player asked for that could not be taken yet.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BufferedDirection {
    #[default]
    None,
    Some {
        direction: Direction,
    },
}

impl BufferedDirection {
    pub fn direction(&self) -> Option<Direction> {
        match self {
            BufferedDirection::None => None,
            BufferedDirection::Some { direction } => Some(*direction),
        }
    }
}

/// What happened when an entity was advanced by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    /// A wall was in the way; the step was undone.
    Blocked,
    /// The entity crossed a horizontal board edge and was teleported to the other side.
    Wrapped,
}

/// Query over every static wall.
pub type WallQuery<'w, 's> = Query<'w, 's, (&'static Position, &'static Collider), With<WallCollider>>;

/// Snapshots the wall boxes for one system run.
pub fn collect_walls(walls: &WallQuery) -> Vec<Aabb> {
    walls.iter().map(|(position, collider)| Aabb::of(position, collider)).collect()
}

/// Changes an entity's facing, but only if one step in the new direction is free of walls.
///
/// On success the entity has already moved that one step. On failure position and
/// velocity are exactly as they were.
pub fn try_turn(
    position: &mut Position,
    velocity: &mut Velocity,
    collider: &Collider,
    direction: Direction,
    walls: &[Aabb],
) -> bool {
    let (previous_position, previous_velocity) = (*position, *velocity);

    *velocity = Velocity::moving(direction);
    position.0 += velocity.delta;

    if collides_with_any(&Aabb::of(position, collider), walls) {
        *position = previous_position;
        *velocity = previous_velocity;
        return false;
    }

    true
}

/// Advances an entity by its velocity, undoing the step on a wall hit and wrapping
/// horizontally at the board edges.
pub fn step(position: &mut Position, velocity: &Velocity, collider: &Collider, walls: &[Aabb]) -> StepOutcome {
    let board_width = BOARD_PIXEL_SIZE.x as f32;
    position.0 += velocity.delta;

    if collides_with_any(&Aabb::of(position, collider), walls) {
        position.0 -= velocity.delta;
        return StepOutcome::Blocked;
    }

    if position.0.x <= 0.0 {
        position.0.x = board_width - collider.size.x;
    } else if position.0.x + collider.size.x >= board_width {
        position.0.x = 0.0;
    } else {
        return StepOutcome::Moved;
    }

    position.0.y -= velocity.delta.y;
    StepOutcome::Wrapped
}
