//! Error types
//!
//! Game-flow conditions (a lost life, game over) are reported as
//! [`GameEvent`](crate::sim::GameEvent)s, not errors. Only configuration
//! and host I/O can fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("unknown difficulty '{0}' (expected easy, normal or hard)")]
    UnknownDifficulty(String),

    #[error("unknown layout '{0}' (expected classic or compact)")]
    UnknownLayout(String),

    #[error("unknown option '{0}' (expected --difficulty or --layout)")]
    UnknownOption(String),

    #[error("option '{0}' needs a value")]
    MissingValue(String),

    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
