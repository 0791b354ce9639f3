use std::path::PathBuf;

use crate::game::Mark;

/// Errors returned when a move cannot be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is out of range (expected 0..=6)")]
    InvalidColumn(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("the game is already over")]
    GameOver,
}

/// Errors that can occur while setting up players.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("'{0}' is an invalid name")]
    InvalidName(String),

    #[error("both players chose mark {0}")]
    SameMark(Mark),
}

/// Errors that can end a driven game loop early.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("move rejected: {0}")]
    Move(#[from] MoveError),

    #[error("input error: {0}")]
    Input(#[from] std::io::Error),
}

/// Errors produced when parsing a board diagram.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardParseError {
    #[error("expected 6 rows, found {0}")]
    RowCount(usize),

    #[error("row {row} has {len} cells, expected 7")]
    RowLength { row: usize, len: usize },

    #[error("unexpected character '{ch}' in row {row}")]
    BadCell { row: usize, ch: char },
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
