//! Frame composition against an abstract drawing surface.

use bevy_ecs::{query::With, world::World};
use glam::Vec2;

use crate::{
    constants::HUD_ORIGIN,
    error::GameResult,
    systems::{
        components::{Ghost, ItemCollider, PlayerControlled, PlayerLives, Renderable, ScoreResource, WallCollider},
        movement::{Aabb, Collider, Position},
        state::GameStage,
    },
    texture::sprites::GameSprite,
};

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The drawing primitives a rendering backend provides.
pub trait Surface {
    /// Clears the whole canvas to the background colour.
    fn clear(&mut self) -> GameResult<()>;
    /// Draws a sprite stretched over `rect`.
    fn blit(&mut self, sprite: GameSprite, rect: Aabb) -> GameResult<()>;
    fn fill_rect(&mut self, rect: Aabb, color: Color) -> GameResult<()>;
    /// Draws one line of text with its top-left corner at `origin`.
    fn draw_text(&mut self, text: &str, origin: Vec2) -> GameResult<()>;
}

/// The single HUD line: remaining lives and score, or the final score once the game is over.
pub fn hud_text(lives: u8, score: u32, stage: GameStage) -> String {
    match stage {
        GameStage::GameOver => format!("Game Over: {score}"),
        GameStage::Playing => format!("x {lives} {score}"),
    }
}

/// Draws the current world state: player, ghosts, walls, pellets, then the HUD.
pub fn render_frame(world: &mut World, surface: &mut impl Surface) -> GameResult<()> {
    surface.clear()?;

    let mut players = world.query_filtered::<(&Position, &Collider, &Renderable), With<PlayerControlled>>();
    for (position, collider, renderable) in players.iter(world) {
        surface.blit(renderable.sprite, Aabb::of(position, collider))?;
    }

    let mut ghosts = world.query_filtered::<(&Position, &Collider, &Renderable), With<Ghost>>();
    for (position, collider, renderable) in ghosts.iter(world) {
        surface.blit(renderable.sprite, Aabb::of(position, collider))?;
    }

    let mut walls = world.query_filtered::<(&Position, &Collider, &Renderable), With<WallCollider>>();
    for (position, collider, renderable) in walls.iter(world) {
        surface.blit(renderable.sprite, Aabb::of(position, collider))?;
    }

    let mut pellets = world.query_filtered::<(&Position, &Collider), With<ItemCollider>>();
    for (position, collider) in pellets.iter(world) {
        surface.fill_rect(Aabb::of(position, collider), Color::WHITE)?;
    }

    let text = hud_text(
        world.resource::<PlayerLives>().0,
        world.resource::<ScoreResource>().0,
        *world.resource::<GameStage>(),
    );
    surface.draw_text(&text, HUD_ORIGIN.as_vec2())
}
