use std::path::PathBuf;

use crate::game::{Player, Position};

/// Errors raised when asking for or applying moves.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("square {0} is off the board")]
    OffBoard(Position),

    #[error("square {0} is a light square")]
    LightSquare(Position),

    #[error("no {turn} piece at {position}")]
    NotOwnedByMover { position: Position, turn: Player },

    #[error("no legal move from {from} to {to}")]
    NoSuchMove { from: Position, to: Position },

    #[error("state is not a legal successor of the current position")]
    NotASuccessor,
}

/// Errors raised when reading a board diagram.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiagramError {
    #[error("diagram has {0} rows, expected 8")]
    RowCount(usize),

    #[error("row {row} has {len} squares, expected 8")]
    RowLength { row: usize, len: usize },

    #[error("unknown symbol '{symbol}' at ({row}, {col})")]
    UnknownSymbol { row: usize, col: usize, symbol: char },

    #[error("piece on light square ({row}, {col})")]
    LightSquare { row: usize, col: usize },
}

/// Errors raised by move selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("no candidate moves to choose from")]
    EmptyChoice,
}

/// Errors raised by the game session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("the game is over")]
    GameOver,

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("illegal move: {0}")]
    Move(#[from] MoveError),

    #[error("move selection failed: {0}")]
    Search(#[from] SearchError),
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

    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
