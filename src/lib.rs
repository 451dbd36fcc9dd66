//! A small tile-grid Pac-Man: the simulation library behind the `pacman-lite` binary.

#[cfg(feature = "sdl")]
pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod formatter;
pub mod game;
pub mod logging;
pub mod map;
pub mod platform;
pub mod systems;
pub mod texture;
pub mod timing;
