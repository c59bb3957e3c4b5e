use std::path::PathBuf;

use crate::game::{MoveError, Player};

/// Errors an agent can raise while choosing a move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgentError {
    #[error("no legal move: every column is full")]
    NoLegalMove,

    #[error("speculative drop in column {column} was not taken back")]
    UnbalancedSpeculation { column: usize },
}

/// Errors that can occur while running matches.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("{player} chose illegal column {column}: {source}")]
    IllegalMove {
        player: Player,
        column: usize,
        source: MoveError,
    },

    #[error("agent error: {0}")]
    Agent(#[from] AgentError),

    #[error("simulation worker thread panicked")]
    WorkerPanicked,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
