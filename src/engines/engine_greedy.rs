//! One-ply tactical engine.
//!
//! Wins when it can, blocks a single threat, otherwise plays the column with
//! the best tactical priority and breaks ties at random.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{ensure_playable, Engine, EngineOutput, GoParams};
use crate::errors::EngineError;
use crate::game_state::board::Board;
use crate::move_generation::move_ordering::tactical_priority;
use crate::move_generation::threats::winning_columns;

pub struct GreedyEngine {
    rng: StdRng,
}

impl GreedyEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for GreedyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for GreedyEngine {
    fn choose_move(&mut self, board: &Board, params: &GoParams) -> Result<EngineOutput, EngineError> {
        ensure_playable(board)?;

        let mut out = EngineOutput::default();
        if let Some(depth) = params.depth {
            out.info_lines
                .push(format!("info string greedy_engine requested_depth {depth}"));
        }

        let mover = board.current_player();
        if let Some(&column) = winning_columns(board, mover).first() {
            out.info_lines
                .push(format!("info string greedy_engine win {column}"));
            out.best_move = Some(column);
            return Ok(out);
        }
        if let [column] = winning_columns(board, mover.opponent())[..] {
            out.info_lines
                .push(format!("info string greedy_engine block {column}"));
            out.best_move = Some(column);
            return Ok(out);
        }

        let mut best_value = i32::MIN;
        let mut best_moves = Vec::new();
        for column in board.valid_moves_iter() {
            let value = tactical_priority(board, column);
            if value > best_value {
                best_value = value;
                best_moves.clear();
                best_moves.push(column);
            } else if value == best_value {
                best_moves.push(column);
            }
        }

        let picked = best_moves
            .choose(&mut self.rng)
            .copied()
            .ok_or(EngineError::NoLegalMove)?;

        out.info_lines.push(format!(
            "info string greedy_engine priority {best_value}"
        ));
        out.score = Some(best_value);
        out.best_move = Some(picked);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::GreedyEngine;
    use crate::engines::engine_trait::{Engine, GoParams};
    use crate::game_state::board::Board;

    fn pick(board: &Board, seed: u64) -> usize {
        GreedyEngine::with_seed(seed)
            .choose_move(board, &GoParams::default())
            .expect("engine should choose")
            .best_move
            .expect("a column")
    }

    #[test]
    fn greedy_takes_the_win() {
        let board = Board::from_moves(&[0, 6, 0, 6, 0, 5]).expect("moves should apply");
        for seed in 0..5 {
            assert_eq!(pick(&board, seed), 0);
        }
    }

    #[test]
    fn greedy_blocks_a_single_threat() {
        let board = Board::from_moves(&[0, 6, 1, 6, 2]).expect("moves should apply");
        assert_eq!(pick(&board, 3), 3);
    }

    #[test]
    fn greedy_opens_in_the_center() {
        assert_eq!(pick(&Board::new(), 11), 3);
    }
}
