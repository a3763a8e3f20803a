//! Reusable time-management strategies for engine move budgeting.
//!
//! Callers pass raw clock data (`remaining_ms`, `increment_ms`, `movetime_ms`)
//! and the engine decides the final per-move allocation based on strategy.

use crate::engines::engine_trait::GoParams;
use crate::game_state::board::Board;

const MIN_BUDGET_MS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeManagementStrategy {
    /// Split the clock evenly over the mover's remaining drops.
    EvenSplit,
    /// Keep a reserve, add most of the increment, speed up when short.
    #[default]
    Adaptive,
}

/// Fill in `movetime_ms` from the clock unless the caller fixed it.
pub fn resolve_go_params(
    board: &Board,
    params: &GoParams,
    strategy: TimeManagementStrategy,
) -> GoParams {
    if params.movetime_ms.is_some() {
        return *params;
    }

    let mut resolved = *params;
    if let Some(remaining) = params.remaining_ms {
        let moves_left = moves_left_for_mover(board);
        resolved.movetime_ms = Some(match strategy {
            TimeManagementStrategy::EvenSplit => (remaining / moves_left).max(1),
            TimeManagementStrategy::Adaptive => {
                adaptive_budget_ms(remaining, params.increment_ms, moves_left)
            }
        });
    }
    resolved
}

/// Drops the side to move still has in the worst case.
fn moves_left_for_mover(board: &Board) -> u64 {
    ((board.empty_cells() as u64 + 1) / 2).max(1)
}

fn adaptive_budget_ms(remaining_ms: u64, inc_ms: Option<u64>, moves_left: u64) -> u64 {
    let reserve = (remaining_ms / 25).max(50).min(remaining_ms / 2);
    let usable = remaining_ms.saturating_sub(reserve);
    let base = usable / moves_left;
    let inc_bonus = inc_ms.unwrap_or(0).saturating_mul(3) / 4;
    let panic = if remaining_ms < 2_000 {
        remaining_ms / 12
    } else {
        0
    };
    let target = base.saturating_add(inc_bonus).saturating_add(panic);

    let max_budget = (remaining_ms / 4).max(1);
    target.max(MIN_BUDGET_MS).min(max_budget)
}

/// Deeper search as the board fills up and the tree narrows.
pub fn adaptive_depth(board: &Board, base: u8) -> u8 {
    let pieces = board.ply();
    let depth = if pieces < 10 {
        base
    } else if pieces < 25 {
        base.saturating_add(1)
    } else {
        base.saturating_add(3)
    };
    depth.min(board.empty_cells() as u8).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::board::DRAW_SEQUENCE;

    #[test]
    fn explicit_movetime_wins() {
        let params = GoParams {
            movetime_ms: Some(250),
            remaining_ms: Some(60_000),
            ..GoParams::default()
        };
        let resolved = resolve_go_params(&Board::new(), &params, TimeManagementStrategy::Adaptive);
        assert_eq!(resolved.movetime_ms, Some(250));
    }

    #[test]
    fn no_clock_means_no_budget() {
        let resolved = resolve_go_params(
            &Board::new(),
            &GoParams::default(),
            TimeManagementStrategy::Adaptive,
        );
        assert_eq!(resolved.movetime_ms, None);
    }

    #[test]
    fn even_split_divides_by_remaining_drops() {
        let params = GoParams {
            remaining_ms: Some(21_000),
            ..GoParams::default()
        };
        // 42 empty cells leave the first player 21 drops.
        let resolved = resolve_go_params(&Board::new(), &params, TimeManagementStrategy::EvenSplit);
        assert_eq!(resolved.movetime_ms, Some(1_000));
    }

    #[test]
    fn adaptive_budget_stays_within_bounds() {
        for remaining in [1, 10, 300, 2_500, 60_000] {
            for inc in [None, Some(100), Some(5_000)] {
                let budget = adaptive_budget_ms(remaining, inc, 10);
                assert!(budget >= 1);
                assert!(budget <= (remaining / 4).max(1), "remaining {remaining} inc {inc:?}");
            }
        }
    }

    #[test]
    fn adaptive_depth_grows_and_is_capped() {
        assert_eq!(adaptive_depth(&Board::new(), 6), 6);

        let middle = Board::from_moves(&DRAW_SEQUENCE[..12]).expect("moves should apply");
        assert_eq!(adaptive_depth(&middle, 6), 7);

        let late = Board::from_moves(&DRAW_SEQUENCE[..40]).expect("moves should apply");
        assert_eq!(adaptive_depth(&late, 6), 2);
    }
}
