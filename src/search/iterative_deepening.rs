//! Iterative deepening search with negamax alpha-beta pruning.
//!
//! Each iteration runs a full fail-soft negamax to a fixed depth, consulting
//! and filling the transposition table. The driver keeps only the answer of
//! the deepest iteration that finished; an iteration cut off by the deadline
//! is thrown away.
//!
//! Root ties are broken by the column's rank in the table-independent move
//! order, so switching the table off (or searching without pruning) picks
//! the same column at the same depth.

use std::time::{Duration, Instant};

use crate::errors::{BoardError, EngineError};
use crate::game_state::board::Board;
use crate::game_state::board_types::{Column, GameStatus, BOARD_WIDTH};
use crate::move_generation::move_ordering::{order_moves, MoveOrdering};
use crate::search::board_scoring::{BoardScorer, WIN_SCORE};
use crate::search::transposition_table::{Bound, TTEntry, TTStats, TranspositionTable};

/// Scores at or beyond this magnitude are decided games.
pub const WIN_THRESHOLD: i32 = WIN_SCORE;
/// Outside every reachable score.
pub const INFINITY: i32 = 2 * WIN_SCORE;
/// Wall clock is sampled once every `TIME_CHECK_MASK + 1` nodes.
const TIME_CHECK_MASK: u64 = 0x3FF;
pub const DEFAULT_TT_MB: usize = 16;

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub max_depth: u8,
    /// First iteration depth; clamped to at least 1.
    pub min_depth: u8,
    pub movetime_ms: Option<u64>,
    pub ordering: MoveOrdering,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 8,
            min_depth: 1,
            movetime_ms: None,
            ordering: MoveOrdering::Tactical,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchResult {
    pub best_move: Option<Column>,
    pub best_score: i32,
    pub reached_depth: u8,
    pub nodes: u64,
    pub elapsed_ms: u64,
    pub nps: u64,
    /// The deadline cut the search short.
    pub timed_out: bool,
    pub tt_stats: TTStats,
    pub beta_cutoffs: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrincipalVariation {
    pub moves: Vec<Column>,
}

/// Cooperative cancellation signal; never leaves this module.
#[derive(Debug, Clone, Copy)]
struct SearchTimeout;

type SearchStep<T> = Result<T, SearchTimeout>;

struct SearchContext<'a, S: BoardScorer> {
    scorer: &'a S,
    tt: &'a mut TranspositionTable,
    ordering: MoveOrdering,
    deadline: Option<Instant>,
    nodes: u64,
    beta_cutoffs: u64,
}

pub fn iterative_deepening_search<S: BoardScorer>(
    board: &Board,
    scorer: &S,
    config: SearchConfig,
) -> Result<SearchResult, EngineError> {
    let mut local_tt = TranspositionTable::new_with_mb(DEFAULT_TT_MB);
    iterative_deepening_search_with_tt(board, scorer, config, &mut local_tt)
}

pub fn iterative_deepening_search_with_tt<S: BoardScorer>(
    board: &Board,
    scorer: &S,
    config: SearchConfig,
    tt: &mut TranspositionTable,
) -> Result<SearchResult, EngineError> {
    if !board.is_in_progress() {
        return Err(BoardError::GameOver.into());
    }

    let started_at = Instant::now();
    let deadline = config
        .movetime_ms
        .map(|ms| started_at + Duration::from_millis(ms.max(1)));

    if config.max_depth == 0 {
        return Ok(SearchResult {
            best_move: None,
            best_score: scorer.score(board),
            reached_depth: 0,
            nodes: 1,
            tt_stats: tt.stats(),
            ..SearchResult::default()
        });
    }

    let max_depth = config.max_depth.min(board.empty_cells() as u8);
    let min_depth = config.min_depth.clamp(1, max_depth);
    let rank = root_rank(board, config.ordering);

    let mut ctx = SearchContext {
        scorer,
        tt,
        ordering: config.ordering,
        deadline,
        nodes: 0,
        beta_cutoffs: 0,
    };
    let mut result = SearchResult::default();

    for depth in min_depth..=max_depth {
        if deadline.is_some_and(|limit| Instant::now() >= limit) {
            result.timed_out = true;
            break;
        }

        ctx.tt.new_generation();
        match ctx.negamax_root(board, depth, &rank) {
            Ok(Some((column, score))) => {
                result.best_move = Some(column);
                result.best_score = score;
                result.reached_depth = depth;
                log::debug!(
                    "depth {depth} best {column} score {score} nodes {}",
                    ctx.nodes
                );
                if score.abs() >= WIN_THRESHOLD {
                    break;
                }
            }
            Ok(None) => break,
            Err(SearchTimeout) => {
                log::debug!(
                    "depth {depth} aborted by deadline, keeping depth {}",
                    result.reached_depth
                );
                result.timed_out = true;
                break;
            }
        }
    }

    result.nodes = ctx.nodes;
    result.beta_cutoffs = ctx.beta_cutoffs;
    result.elapsed_ms = started_at.elapsed().as_millis() as u64;
    result.nps = if result.elapsed_ms == 0 {
        0
    } else {
        result.nodes.saturating_mul(1000) / result.elapsed_ms
    };
    result.tt_stats = ctx.tt.stats();

    Ok(result)
}

/// Position of every column in the table-independent move order.
fn root_rank(board: &Board, ordering: MoveOrdering) -> [usize; BOARD_WIDTH] {
    let mut rank = [usize::MAX; BOARD_WIDTH];
    for (i, column) in order_moves(board, None, ordering).into_iter().enumerate() {
        rank[column] = i;
    }
    rank
}

/// Score of a finished game for the side to move at that node.
#[inline]
fn terminal_score(status: GameStatus, depth: u8) -> Option<i32> {
    match status {
        // The previous mover completed a line; sooner is worse for us.
        GameStatus::Victory(_) => Some(-(WIN_SCORE + i32::from(depth))),
        GameStatus::Draw => Some(0),
        GameStatus::InProgress => None,
    }
}

impl<S: BoardScorer> SearchContext<'_, S> {
    #[inline]
    fn check_deadline(&self) -> SearchStep<()> {
        if self.nodes & TIME_CHECK_MASK == 0
            && self.deadline.is_some_and(|limit| Instant::now() >= limit)
        {
            return Err(SearchTimeout);
        }
        Ok(())
    }

    fn negamax_root(
        &mut self,
        board: &Board,
        depth: u8,
        rank: &[usize; BOARD_WIDTH],
    ) -> SearchStep<Option<(Column, i32)>> {
        self.nodes += 1;
        let key = board.key();
        let tt_move = self.tt.probe(key).and_then(|entry| entry.best_move);

        let mut best: Option<(Column, i32)> = None;
        for column in order_moves(board, tt_move, self.ordering) {
            // Later siblings only need to prove they are at least as good.
            let alpha = best.map_or(-INFINITY, |(_, score)| score - 1);
            let score = -self.negamax(&board.drop_piece(column), depth - 1, -INFINITY, -alpha)?;

            let better = match best {
                None => true,
                Some((best_column, best_score)) => {
                    score > best_score || (score == best_score && rank[column] < rank[best_column])
                }
            };
            if better {
                best = Some((column, score));
            }
        }

        if let Some((column, score)) = best {
            self.tt.store(TTEntry {
                key,
                depth,
                score,
                bound: Bound::Exact,
                best_move: Some(column),
            });
        }
        Ok(best)
    }

    fn negamax(&mut self, board: &Board, depth: u8, mut alpha: i32, mut beta: i32) -> SearchStep<i32> {
        self.nodes += 1;
        self.check_deadline()?;

        if let Some(score) = terminal_score(board.status(), depth) {
            return Ok(score);
        }
        if depth == 0 {
            return Ok(self.scorer.score(board));
        }

        let (alpha_orig, beta_orig) = (alpha, beta);
        let key = board.key();
        let entry = self.tt.probe(key);
        if let Some(score) = entry.and_then(|e| e.resolve(depth, &mut alpha, &mut beta)) {
            return Ok(score);
        }

        let mut best = -INFINITY;
        let mut best_move = None;
        for column in order_moves(board, entry.and_then(|e| e.best_move), self.ordering) {
            let score = -self.negamax(&board.drop_piece(column), depth - 1, -beta, -alpha)?;

            if score > best {
                best = score;
                best_move = Some(column);
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                self.beta_cutoffs += 1;
                break;
            }
        }

        self.tt.store(TTEntry {
            key,
            depth,
            score: best,
            bound: Bound::classify(best, alpha_orig, beta_orig),
            best_move,
        });

        Ok(best)
    }
}

/// Follow stored best moves from `board` for at most `max_depth` plies.
pub fn principal_variation_from_tt(
    board: &Board,
    tt: &mut TranspositionTable,
    max_depth: u8,
) -> PrincipalVariation {
    let mut pv = PrincipalVariation::default();
    let mut state = *board;

    for _ in 0..max_depth {
        let Some(entry) = tt.probe(state.key()) else {
            break;
        };
        let Some(best_move) = entry.best_move else {
            break;
        };
        let Ok(next) = state.make_move(best_move) else {
            break;
        };
        pv.moves.push(best_move);
        state = next;
        if !state.is_in_progress() {
            break;
        }
    }

    pv
}
