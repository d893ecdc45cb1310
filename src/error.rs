//! Centralized error types for the game.
//!
//! Only configuration and setup problems surface as errors. Malformed map tokens,
//! missing optional references and repeated terminal transitions are handled in place.

/// Main error type for the game.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Map error: {0}")]
    Map(#[from] MapError),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Rejected configuration values.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Plant catalog needs at least 2 entries to pick a distinct pair, found {0}")]
    CatalogTooSmall(usize),

    #[error("Invalid {name} range: min {min} is greater than max {max}")]
    InvalidRange { name: &'static str, min: f32, max: f32 },

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("View window must be at least 1x1 tiles, got {width}x{height}")]
    EmptyView { width: u32, height: u32 },

    #[error("Max lives must be at least 1")]
    NoLives,
}

/// Errors related to tile map construction.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MapError {
    #[error("Tile instances have already been built for this grid")]
    AlreadyBuilt,
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
