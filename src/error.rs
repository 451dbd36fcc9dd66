//! Centralized error types for the game.
//!
//! Gameplay outcomes such as losing a life are state transitions, never errors;
//! everything here describes setup or backend failures.

/// Main error type for the game.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Map parsing error: {0}")]
    MapParse(#[from] ParseError),

    #[error("Map error: {0}")]
    Map(#[from] MapError),

    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Error type for map parsing operations.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown character in board: {0:?}")]
    UnknownCharacter(char),
    #[error("Board must have {expected} rows, found {found}")]
    InvalidRowCount { expected: usize, found: usize },
    #[error("Row {row} must be {expected} characters wide, found {found}")]
    InvalidRowWidth { row: usize, expected: usize, found: usize },
    #[error("Board must have exactly 1 player spawn, found {0}")]
    InvalidPlayerSpawnCount(usize),
    #[error("Board must have at least 1 ghost spawn")]
    NoGhostSpawns,
    #[error("Tunnel row {row} is outside the board ({rows} rows)")]
    TunnelRowOutOfRange { row: usize, rows: usize },
}

/// Errors related to texture operations.
#[derive(thiserror::Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture: {0}")]
    LoadFailed(String),

    #[error("Failed to load font: {0}")]
    FontLoadFailed(String),

    #[error("Rendering failed: {0}")]
    RenderFailed(String),
}

/// Errors related to map operations.
#[derive(thiserror::Error, Debug)]
pub enum MapError {
    #[error("Invalid map configuration: {0}")]
    InvalidConfig(String),
}

/// Errors raised while loading or validating configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to extract configuration: {0}")]
    Extract(#[from] Box<figment::Error>),

    #[error("Invalid configuration value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::Extract(Box::new(error))
    }
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
