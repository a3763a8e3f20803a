//! Engine abstraction layer used by the CLIs and the match harness.
//!
//! Defines common input parameters and output payloads so different engine
//! strategies can be selected at runtime behind a single trait interface.

use crate::errors::EngineError;
use crate::game_state::board::Board;
use crate::game_state::board_types::Column;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GoParams {
    pub depth: Option<u8>,
    pub movetime_ms: Option<u64>,
    /// Clock left for the side to move.
    pub remaining_ms: Option<u64>,
    pub increment_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOutput {
    pub best_move: Option<Column>,
    /// Search score from the mover's perspective, when the engine searched.
    pub score: Option<i32>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn new_game(&mut self) {}

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), EngineError> {
        Err(EngineError::InvalidOption {
            name: name.to_owned(),
            value: value.to_owned(),
        })
    }

    fn choose_move(&mut self, board: &Board, params: &GoParams) -> Result<EngineOutput, EngineError>;
}

/// Reject boards no engine can move on.
pub(crate) fn ensure_playable(board: &Board) -> Result<(), EngineError> {
    if !board.is_in_progress() {
        return Err(crate::errors::BoardError::GameOver.into());
    }
    if board.valid_moves_iter().next().is_none() {
        return Err(EngineError::NoLegalMove);
    }
    Ok(())
}
