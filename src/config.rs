use std::path::PathBuf;
use std::time::Duration;

use figment::{providers::Env, Figment, Provider};
use serde::Deserialize;

use crate::constants::LOOP_TIME;
use crate::error::ConfigError;

/// Runtime settings, read from `PACMAN_`-prefixed environment variables.
///
/// | Variable                   | Default  |
/// |----------------------------|----------|
/// | `PACMAN_SEED`              | (random) |
/// | `PACMAN_TICK_INTERVAL_MS`  | `50`     |
/// | `PACMAN_ASSETS_DIR`        | `assets` |
/// | `PACMAN_FONT_PATH`         | (none)   |
/// | `PACMAN_SCALE`             | `1.0`    |
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GameConfig {
    /// Seed for ghost decisions. Runs with the same seed and input replay identically.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Simulation period in milliseconds.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Directory sprite images are loaded from.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,
    /// TrueType font for the HUD; without one the HUD is not drawn.
    #[serde(default)]
    pub font_path: Option<PathBuf>,
    /// Window size multiplier.
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_tick_interval_ms() -> u64 {
    LOOP_TIME.as_millis() as u64
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

fn default_scale() -> f32 {
    1.0
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            tick_interval_ms: default_tick_interval_ms(),
            assets_dir: default_assets_dir(),
            font_path: None,
            scale: default_scale(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_provider(Env::prefixed("PACMAN_"))
    }

    /// Loads configuration from any figment provider, then validates it.
    pub fn from_provider(provider: impl Provider) -> Result<Self, ConfigError> {
        let config: GameConfig = Figment::new().merge(provider).extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "tick_interval_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ConfigError::Invalid {
                field: "scale",
                reason: format!("must be a positive number, got {}", self.scale),
            });
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
