//! Sprite identities, and (with the `sdl` feature) the SDL2 surface that draws them.

#[cfg(feature = "sdl")]
pub mod canvas;
pub mod sprites;
