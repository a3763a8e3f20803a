//! Iterative-deepening search engine.
//!
//! Runs the tactical shortcuts (win now, block the single threat, play a
//! safe fork) before handing the board to the negamax search. Every decision
//! builds a fresh transposition table, so repeated calls on the same board
//! with the same limits return the same column.

use std::time::Duration;

use crate::engines::engine_trait::{ensure_playable, Engine, EngineOutput, GoParams};
use crate::engines::time_management::{adaptive_depth, resolve_go_params, TimeManagementStrategy};
use crate::errors::EngineError;
use crate::game_state::board::Board;
use crate::game_state::board_types::{Column, BOARD_CELLS};
use crate::move_generation::move_ordering::{center_first_moves, MoveOrdering};
use crate::move_generation::threats::{find_fork_move, winning_columns};
use crate::search::board_scoring::{EvalWeights, WindowScorer, WIN_SCORE};
use crate::search::iterative_deepening::{
    iterative_deepening_search_with_tt, principal_variation_from_tt, SearchConfig,
};
use crate::search::transposition_table::TranspositionTable;
use crate::utils::move_sequence::move_sequence_string;

const DEFAULT_DEPTH: u8 = 8;
const DEFAULT_HASH_MB: usize = 4;
const MAX_DEFENSE_BIAS_PERCENT: i32 = 1000;

pub struct IterativeEngine {
    default_depth: u8,
    default_movetime_ms: Option<u64>,
    adaptive_depth: bool,
    use_hash: bool,
    hash_mb: usize,
    ordering: MoveOrdering,
    weights: EvalWeights,
    time_strategy: TimeManagementStrategy,
}

impl IterativeEngine {
    pub fn new(default_depth: u8) -> Self {
        Self {
            default_depth: default_depth.max(1),
            default_movetime_ms: None,
            adaptive_depth: false,
            use_hash: true,
            hash_mb: DEFAULT_HASH_MB,
            ordering: MoveOrdering::Tactical,
            weights: EvalWeights::default(),
            time_strategy: TimeManagementStrategy::Adaptive,
        }
    }

    pub fn with_weights(mut self, weights: EvalWeights) -> Self {
        self.weights = weights;
        self
    }

    fn fresh_table(&self) -> TranspositionTable {
        if self.use_hash {
            TranspositionTable::new_with_mb(self.hash_mb)
        } else {
            TranspositionTable::disabled()
        }
    }
}

impl Default for IterativeEngine {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

/// Tactical answer that needs no search.
fn shortcut(board: &Board, column: Column, score: Option<i32>, why: &str) -> EngineOutput {
    log::info!("{why} at ply {}: column {column}", board.ply());
    EngineOutput {
        best_move: Some(column),
        score,
        info_lines: vec![format!("info string iterative_engine {why} {column}")],
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, EngineError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(invalid_option(name, value)),
    }
}

fn invalid_option(name: &str, value: &str) -> EngineError {
    EngineError::InvalidOption {
        name: name.to_owned(),
        value: value.to_owned(),
    }
}

impl Engine for IterativeEngine {
    fn set_option(&mut self, name: &str, value: &str) -> Result<(), EngineError> {
        let trimmed = value.trim();
        if name.eq_ignore_ascii_case("Depth") {
            let depth = trimmed
                .parse::<u8>()
                .ok()
                .filter(|d| (1..=BOARD_CELLS as u8).contains(d))
                .ok_or_else(|| invalid_option(name, value))?;
            self.default_depth = depth;
        } else if name.eq_ignore_ascii_case("MoveTime") {
            let ms = trimmed
                .parse::<u64>()
                .map_err(|_| invalid_option(name, value))?;
            self.default_movetime_ms = (ms > 0).then_some(ms);
        } else if name.eq_ignore_ascii_case("Hash") {
            let mb = trimmed
                .parse::<usize>()
                .map_err(|_| invalid_option(name, value))?;
            self.hash_mb = mb.max(1);
        } else if name.eq_ignore_ascii_case("UseHash") {
            self.use_hash = parse_bool(name, value)?;
        } else if name.eq_ignore_ascii_case("AdaptiveDepth") {
            self.adaptive_depth = parse_bool(name, value)?;
        } else if name.eq_ignore_ascii_case("Ordering") {
            self.ordering = MoveOrdering::parse(trimmed).ok_or_else(|| invalid_option(name, value))?;
        } else if name.eq_ignore_ascii_case("DefenseBias") {
            let percent = trimmed
                .parse::<i32>()
                .ok()
                .filter(|p| (0..=MAX_DEFENSE_BIAS_PERCENT).contains(p))
                .ok_or_else(|| invalid_option(name, value))?;
            self.weights.defense_bias_percent = percent;
        } else {
            return Err(invalid_option(name, value));
        }
        Ok(())
    }

    fn choose_move(&mut self, board: &Board, params: &GoParams) -> Result<EngineOutput, EngineError> {
        ensure_playable(board)?;

        let mover = board.current_player();
        if let Some(&column) = winning_columns(board, mover).first() {
            return Ok(shortcut(board, column, Some(WIN_SCORE), "immediate_win"));
        }

        let opponent_wins = winning_columns(board, mover.opponent());
        match opponent_wins.as_slice() {
            [column] => return Ok(shortcut(board, *column, None, "forced_block")),
            [] => {}
            many => log::debug!(
                "opponent threatens {} columns {many:?}, no single block, searching",
                many.len()
            ),
        }

        if opponent_wins.is_empty() {
            if let Some(column) = find_fork_move(board) {
                return Ok(shortcut(board, column, None, "fork"));
            }
        }

        let resolved = resolve_go_params(board, params, self.time_strategy);
        let depth = params.depth.unwrap_or(if self.adaptive_depth {
            adaptive_depth(board, self.default_depth)
        } else {
            self.default_depth
        });
        let config = SearchConfig {
            max_depth: depth.max(1),
            min_depth: 1,
            movetime_ms: resolved.movetime_ms.or(self.default_movetime_ms),
            ordering: self.ordering,
        };

        let scorer = WindowScorer::new(self.weights);
        let mut tt = self.fresh_table();
        let result = iterative_deepening_search_with_tt(board, &scorer, config, &mut tt)?;

        let mut out = EngineOutput {
            best_move: result.best_move.filter(|&column| board.is_valid_move(column)),
            score: Some(result.best_score),
            info_lines: Vec::new(),
        };
        if out.best_move.is_none() {
            let fallback = center_first_moves(board)
                .first()
                .copied()
                .ok_or(EngineError::NoLegalMove)?;
            log::warn!(
                "search produced no move (depth {}, timed out {}), falling back to column {fallback}",
                result.reached_depth,
                result.timed_out
            );
            out.best_move = Some(fallback);
            out.score = None;
        }

        out.info_lines.push(format!(
            "info depth {} score {} nodes {} time {} nps {}",
            result.reached_depth, result.best_score, result.nodes, result.elapsed_ms, result.nps
        ));
        out.info_lines
            .push(format!("info string iterative_engine used_depth {}", config.max_depth));
        if let Some(ms) = config.movetime_ms {
            out.info_lines
                .push(format!("info string iterative_engine movetime_ms {ms}"));
        }
        if result.timed_out {
            out.info_lines
                .push("info string iterative_engine timed_out".to_owned());
        }
        out.info_lines.push(format!(
            "info string tt probes {} hits {} stores {} size_entries {} cutoffs {}",
            result.tt_stats.probes,
            result.tt_stats.hits,
            result.tt_stats.stores,
            tt.len(),
            result.beta_cutoffs
        ));

        let pv = principal_variation_from_tt(board, &mut tt, result.reached_depth);
        if !pv.moves.is_empty() {
            out.info_lines
                .push(format!("info pv {}", move_sequence_string(&pv.moves)));
        }

        Ok(out)
    }
}

/// Pick a column for the side to move within roughly `time_budget`.
///
/// Never returns an illegal column; fails only on finished games.
pub fn choose_move(board: &Board, time_budget: Duration) -> Result<Column, EngineError> {
    let mut engine = IterativeEngine::new(BOARD_CELLS as u8);
    let params = GoParams {
        movetime_ms: Some(time_budget.as_millis().max(1) as u64),
        ..GoParams::default()
    };
    let out = engine.choose_move(board, &params)?;
    match out.best_move {
        Some(column) if board.is_valid_move(column) => Ok(column),
        Some(column) => Err(EngineError::IllegalEngineMove { column }),
        None => Err(EngineError::NoLegalMove),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BoardError;
    use crate::game_state::board::DRAW_SEQUENCE;
    use crate::game_state::board_types::Player;
    use crate::move_generation::threats::count_immediate_threats;

    fn depth(d: u8) -> GoParams {
        GoParams {
            depth: Some(d),
            ..GoParams::default()
        }
    }

    #[test]
    fn takes_the_immediate_win() {
        let board = Board::from_moves(&[0, 0, 1, 1, 2, 6]).expect("moves should apply");
        assert_eq!(board.current_player(), Player::Red);
        let out = IterativeEngine::default()
            .choose_move(&board, &depth(4))
            .expect("engine should choose a move");
        assert_eq!(out.best_move, Some(3));
        assert_eq!(
            choose_move(&board, Duration::from_millis(50)).expect("engine should choose"),
            3
        );
    }

    #[test]
    fn blocks_the_single_threat() {
        let board = Board::from_moves(&[0, 6, 1, 6, 2]).expect("moves should apply");
        assert_eq!(board.current_player(), Player::Yellow);
        let out = IterativeEngine::default()
            .choose_move(&board, &depth(4))
            .expect("engine should choose a move");
        assert_eq!(out.best_move, Some(3));
        assert_eq!(
            choose_move(&board, Duration::from_millis(50)).expect("engine should choose"),
            3
        );
    }

    #[test]
    fn plays_the_fork_at_any_depth() {
        let board = Board::from_moves(&[2, 0, 3, 0]).expect("moves should apply");
        for d in 1..=4 {
            let out = IterativeEngine::default()
                .choose_move(&board, &depth(d))
                .expect("engine should choose a move");
            assert_eq!(out.best_move, Some(4), "depth {d}");
        }
        let after = board.make_move(4).expect("fork column is open");
        assert!(count_immediate_threats(&after, Player::Red) >= 2);
    }

    #[test]
    fn repeated_calls_agree() {
        let board = Board::from_moves(&[3, 3, 2]).expect("moves should apply");
        let mut engine = IterativeEngine::default();
        let a = engine.choose_move(&board, &depth(5)).expect("first call");
        let b = engine.choose_move(&board, &depth(5)).expect("second call");
        assert_eq!(a.best_move, b.best_move);
        assert_eq!(a.score, b.score);
    }

    #[test]
    fn hash_toggle_does_not_change_the_move() {
        let board = Board::from_moves(&[3, 2, 4, 1]).expect("moves should apply");
        let mut with_hash = IterativeEngine::default();
        let mut without_hash = IterativeEngine::default();
        without_hash
            .set_option("UseHash", "false")
            .expect("valid option");
        let a = with_hash.choose_move(&board, &depth(5)).expect("with hash");
        let b = without_hash.choose_move(&board, &depth(5)).expect("without hash");
        assert_eq!(a.best_move, b.best_move);
    }

    #[test]
    fn finished_game_is_rejected() {
        let board = Board::from_moves(&DRAW_SEQUENCE).expect("draw sequence should apply");
        let err = IterativeEngine::default()
            .choose_move(&board, &depth(3))
            .expect_err("no move on a full board");
        assert_eq!(err, EngineError::Board(BoardError::GameOver));
        assert_eq!(
            choose_move(&board, Duration::from_millis(10)),
            Err(EngineError::Board(BoardError::GameOver))
        );
    }

    #[test]
    fn honors_go_depth_override() {
        let mut engine = IterativeEngine::new(6);
        let out = engine
            .choose_move(&Board::new(), &depth(1))
            .expect("engine should choose a move");
        let joined = out.info_lines.join("\n");
        assert!(joined.contains("info depth 1 "), "expected depth-1 info: {joined}");
        assert!(joined.contains("used_depth 1"));
        assert!(joined.contains("info pv "));
    }

    #[test]
    fn tiny_budget_still_returns_a_legal_column() {
        let board = Board::new();
        let column = choose_move(&board, Duration::from_millis(1)).expect("engine should choose");
        assert!(board.is_valid_move(column));
    }

    #[test]
    fn options_are_validated() {
        let mut engine = IterativeEngine::default();
        assert!(engine.set_option("depth", "3").is_ok());
        assert!(engine.set_option("ORDERING", "center").is_ok());
        assert!(engine.set_option("DefenseBias", "150").is_ok());
        assert!(engine.set_option("AdaptiveDepth", "on").is_ok());
        assert!(engine.set_option("MoveTime", "0").is_ok());
        assert!(engine.set_option("Hash", "2").is_ok());
        assert_eq!(
            engine.set_option("Ordering", "random"),
            Err(EngineError::InvalidOption {
                name: "Ordering".to_owned(),
                value: "random".to_owned(),
            })
        );
        assert!(engine.set_option("Depth", "0").is_err());
        assert!(engine.set_option("UseHash", "maybe").is_err());
        assert!(engine.set_option("Contempt", "1").is_err());
    }
}
