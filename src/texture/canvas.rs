//! SDL2 implementation of [`Surface`].

use std::collections::HashMap;
use std::path::Path;

use glam::Vec2;
use sdl2::image::LoadTexture;
use sdl2::pixels::Color as SdlColor;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::ttf::{Font, Sdl2TtfContext};
use sdl2::video::{Window, WindowContext};
use tracing::{debug, warn};

use crate::error::{GameError, GameResult, TextureError};
use crate::systems::components::Ghost;
use crate::systems::movement::Aabb;
use crate::systems::render::{Color, Surface};
use crate::texture::sprites::GameSprite;

/// Point size of the HUD font.
const HUD_FONT_SIZE: u16 = 14;

impl From<Color> for SdlColor {
    fn from(color: Color) -> Self {
        SdlColor::RGB(color.r, color.g, color.b)
    }
}

/// The solid colour drawn in place of a sprite whose image could not be loaded.
fn fallback_color(sprite: GameSprite) -> Color {
    match sprite {
        GameSprite::Wall => Color::rgb(33, 33, 222),
        GameSprite::Pacman(_) => Color::rgb(255, 255, 0),
        GameSprite::Ghost(Ghost::Blinky) => Color::rgb(255, 0, 0),
        GameSprite::Ghost(Ghost::Pinky) => Color::rgb(255, 184, 255),
        GameSprite::Ghost(Ghost::Inky) => Color::rgb(0, 255, 255),
        GameSprite::Ghost(Ghost::Clyde) => Color::rgb(255, 184, 82),
    }
}

fn to_rect(aabb: Aabb) -> Rect {
    Rect::new(
        aabb.min.x.round() as i32,
        aabb.min.y.round() as i32,
        aabb.size.x.round() as u32,
        aabb.size.y.round() as u32,
    )
}

fn sdl_error(error: impl ToString) -> GameError {
    GameError::Sdl(error.to_string())
}

/// A window canvas with every sprite preloaded.
pub struct CanvasSurface {
    canvas: Canvas<Window>,
    texture_creator: TextureCreator<WindowContext>,
    textures: HashMap<GameSprite, Texture>,
    font: Option<Font<'static, 'static>>,
}

impl CanvasSurface {
    /// Wraps `canvas`, loading sprites from `assets_dir` and the HUD font from `font_path`.
    ///
    /// Missing images and fonts are not fatal: each is reported once here, then sprites fall
    /// back to coloured rectangles and the HUD is skipped.
    pub fn new(
        canvas: Canvas<Window>,
        ttf_context: &'static Sdl2TtfContext,
        assets_dir: &Path,
        font_path: Option<&Path>,
    ) -> Self {
        let texture_creator = canvas.texture_creator();

        let mut textures = HashMap::new();
        for sprite in GameSprite::all() {
            let path = assets_dir.join(sprite.to_path());
            match texture_creator.load_texture(&path) {
                Ok(texture) => {
                    textures.insert(sprite, texture);
                }
                Err(error) => {
                    let error = TextureError::LoadFailed(format!("{}: {error}", path.display()));
                    warn!(%error, "Sprite unavailable, drawing a solid rectangle instead");
                }
            }
        }
        debug!(loaded = textures.len(), "Sprites loaded");

        let font = font_path.and_then(|path| match ttf_context.load_font(path, HUD_FONT_SIZE) {
            Ok(font) => Some(font),
            Err(error) => {
                let error = TextureError::FontLoadFailed(format!("{}: {error}", path.display()));
                warn!(%error, "HUD text disabled");
                None
            }
        });
        if font.is_none() && font_path.is_none() {
            warn!("No font configured, HUD text disabled");
        }

        Self {
            canvas,
            texture_creator,
            textures,
            font,
        }
    }

    /// Shows the finished frame.
    pub fn present(&mut self) {
        self.canvas.present();
    }

    fn set_color(&mut self, color: Color) {
        self.canvas.set_draw_color(SdlColor::from(color));
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) -> GameResult<()> {
        self.set_color(Color::BLACK);
        self.canvas.clear();
        Ok(())
    }

    fn blit(&mut self, sprite: GameSprite, rect: Aabb) -> GameResult<()> {
        match self.textures.get(&sprite) {
            Some(texture) => self.canvas.copy(texture, None, to_rect(rect)).map_err(sdl_error),
            None => self.fill_rect(rect, fallback_color(sprite)),
        }
    }

    fn fill_rect(&mut self, rect: Aabb, color: Color) -> GameResult<()> {
        self.set_color(color);
        self.canvas.fill_rect(to_rect(rect)).map_err(sdl_error)
    }

    fn draw_text(&mut self, text: &str, origin: Vec2) -> GameResult<()> {
        let Some(font) = &self.font else {
            return Ok(());
        };

        let surface = font
            .render(text)
            .blended(SdlColor::from(Color::WHITE))
            .map_err(|e| TextureError::RenderFailed(e.to_string()))?;
        let texture = self
            .texture_creator
            .create_texture_from_surface(&surface)
            .map_err(|e| TextureError::RenderFailed(e.to_string()))?;

        let query = texture.query();
        let target = Rect::new(origin.x as i32, origin.y as i32, query.width, query.height);
        let result = self.canvas.copy(&texture, None, target).map_err(sdl_error);

        // Textures are not freed on drop with `unsafe_textures`.
        unsafe { texture.destroy() };
        result
    }
}
