//! Error types
//!
//! Steady-state play never fails. Only configuration loading, starting an
//! unknown level and record storage surface errors.

use thiserror::Error;

/// Level/tuning configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown level `{0}`")]
    UnknownLevel(String),
    #[error("invalid level `{level}`: {reason}")]
    InvalidLevel { level: String, reason: &'static str },
    #[error("invalid tuning: {0}")]
    InvalidTuning(&'static str),
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Record storage errors (always swallowed by the game, see `Game::finish_win`)
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("record encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}
