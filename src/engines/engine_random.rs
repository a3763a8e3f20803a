//! Uniform random-move engine.
//!
//! Selects uniformly from legal columns and is primarily used for
//! diagnostics, match-harness testing and low-strength play.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{ensure_playable, Engine, EngineOutput, GoParams};
use crate::errors::EngineError;
use crate::game_state::board::Board;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Reproducible sequence of choices.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn choose_move(&mut self, board: &Board, params: &GoParams) -> Result<EngineOutput, EngineError> {
        ensure_playable(board)?;
        let legal_moves = board.get_valid_moves();

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            legal_moves.len()
        ));
        if let Some(depth) = params.depth {
            out.info_lines
                .push(format!("info string random_engine requested_depth {depth}"));
        }

        let picked = legal_moves
            .choose(&mut self.rng)
            .copied()
            .ok_or(EngineError::NoLegalMove)?;
        out.best_move = Some(picked);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::RandomEngine;
    use crate::engines::engine_trait::{Engine, GoParams};
    use crate::game_state::board::Board;

    #[test]
    fn random_engine_only_plays_legal_columns() {
        let board = Board::from_moves(&[0, 0, 0, 0, 0, 0, 6, 6, 6, 6, 6, 6]).expect("moves should apply");
        let mut engine = RandomEngine::with_seed(7);
        for _ in 0..50 {
            let column = engine
                .choose_move(&board, &GoParams::default())
                .expect("engine should choose")
                .best_move
                .expect("a column");
            assert!(board.is_valid_move(column));
        }
    }

    #[test]
    fn seeded_engines_repeat_themselves() {
        let board = Board::new();
        let mut a = RandomEngine::with_seed(42);
        let mut b = RandomEngine::with_seed(42);
        for _ in 0..10 {
            let left = a.choose_move(&board, &GoParams::default()).expect("a chooses");
            let right = b.choose_move(&board, &GoParams::default()).expect("b chooses");
            assert_eq!(left.best_move, right.best_move);
        }
    }
}
