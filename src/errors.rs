//! Error types shared by the board, the engines and the notation helpers.
//!
//! Structural board errors are caller bugs and are surfaced immediately;
//! search timeouts never show up here because the search absorbs them.

use thiserror::Error;

use crate::game_state::board_types::BOARD_WIDTH;

/// Rejected drop on a [`Board`](crate::game_state::board::Board).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    /// Column index outside `0..BOARD_WIDTH`.
    #[error("column {column} is outside 0..{}", BOARD_WIDTH)]
    InvalidColumn { column: usize },
    /// Column has no free row left.
    #[error("column {column} is full")]
    ColumnFull { column: usize },
    /// The game already ended in a victory or a draw.
    #[error("the game is over, no further moves are legal")]
    GameOver,
}

/// Failure while parsing a digit move sequence such as `"4453"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("unexpected character '{found}' at position {position}, expected 1-7")]
    InvalidCharacter { position: usize, found: char },
    #[error("illegal move at position {position}: {source}")]
    IllegalMove {
        position: usize,
        #[source]
        source: BoardError,
    },
}

/// Errors an [`Engine`](crate::engines::engine_trait::Engine) can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Board(#[from] BoardError),
    /// Asked for a move on a board without any legal column.
    #[error("no legal move is available")]
    NoLegalMove,
    /// An engine produced a column that is not legal on the current board.
    #[error("engine chose illegal column {column}")]
    IllegalEngineMove { column: usize },
    #[error("invalid value '{value}' for option '{name}'")]
    InvalidOption { name: String, value: String },
    #[error(transparent)]
    Notation(#[from] NotationError),
}
