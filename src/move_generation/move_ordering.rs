//! Candidate column ordering for the search.
//!
//! Ordering only changes how early alpha-beta finds its cutoffs. Every
//! ordering hands the search the same set of legal columns.

use std::cmp::Reverse;

use crate::game_state::board::Board;
use crate::game_state::board_rules::{center_distance, CENTER_FIRST_ORDER};
use crate::game_state::board_types::Column;
use crate::move_generation::threats::{allows_opponent_win, creates_win, threats_after_move};

const WIN_BONUS: i32 = 1_000_000;
const BLOCK_BONUS: i32 = 100_000;
const FORK_BONUS: i32 = 50_000;
const UNSAFE_PENALTY: i32 = 500_000;
const CENTER_STEP: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveOrdering {
    /// Legal columns from the center outward.
    CenterFirst,
    /// Center-first, then stably re-ranked by [`tactical_priority`].
    #[default]
    Tactical,
}

impl MoveOrdering {
    /// Parse an option value (`center` or `tactical`, any case).
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("center") || value.eq_ignore_ascii_case("centerfirst") {
            Some(Self::CenterFirst)
        } else if value.eq_ignore_ascii_case("tactical") {
            Some(Self::Tactical)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CenterFirst => "center",
            Self::Tactical => "tactical",
        }
    }
}

/// Legal columns in center-first order.
pub fn center_first_moves(board: &Board) -> Vec<Column> {
    CENTER_FIRST_ORDER
        .iter()
        .copied()
        .filter(|&column| board.is_valid_move(column))
        .collect()
}

/// Composite tactical score of `column` for the side to move. Higher first.
pub fn tactical_priority(board: &Board, column: Column) -> i32 {
    let mover = board.current_player();
    let center = (3 - center_distance(column) as i32) * CENTER_STEP;

    if creates_win(board, column, mover) {
        return WIN_BONUS + center;
    }

    let mut priority = center;
    if creates_win(board, column, mover.opponent()) {
        priority += BLOCK_BONUS;
    }
    if allows_opponent_win(board, column) {
        priority -= UNSAFE_PENALTY;
    }
    if threats_after_move(board, column).is_some_and(|threats| threats >= 2) {
        priority += FORK_BONUS;
    }
    priority
}

/// Legal columns in search order, with a legal `tt_move` promoted to the front.
pub fn order_moves(board: &Board, tt_move: Option<Column>, ordering: MoveOrdering) -> Vec<Column> {
    let mut moves = center_first_moves(board);

    if ordering == MoveOrdering::Tactical {
        moves.sort_by_cached_key(|&column| Reverse(tactical_priority(board, column)));
    }

    if let Some(tt) = tt_move {
        if let Some(pos) = moves.iter().position(|&column| column == tt) {
            moves[..=pos].rotate_right(1);
        }
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_orders_from_the_center() {
        let board = Board::new();
        assert_eq!(center_first_moves(&board), vec![3, 2, 4, 1, 5, 0, 6]);
        assert_eq!(
            order_moves(&board, None, MoveOrdering::Tactical),
            vec![3, 2, 4, 1, 5, 0, 6]
        );
    }

    #[test]
    fn full_columns_are_skipped() {
        let board = Board::from_moves(&[3, 3, 3, 3, 3, 3]).expect("moves should apply");
        assert_eq!(center_first_moves(&board), vec![2, 4, 1, 5, 0, 6]);
    }

    #[test]
    fn winning_column_is_ranked_first() {
        // Red stacked three high in column 0.
        let board = Board::from_moves(&[0, 6, 0, 6, 0, 5]).expect("moves should apply");
        assert_eq!(
            order_moves(&board, None, MoveOrdering::Tactical),
            vec![0, 3, 2, 4, 1, 5, 6]
        );
        assert_eq!(
            order_moves(&board, None, MoveOrdering::CenterFirst),
            vec![3, 2, 4, 1, 5, 0, 6]
        );
    }

    #[test]
    fn block_outranks_moves_that_lose() {
        // Red holds row 0 columns 0..=2; Yellow to move.
        let board = Board::from_moves(&[0, 6, 1, 6, 2]).expect("moves should apply");
        assert!(tactical_priority(&board, 3) > 0);
        for column in [0, 1, 2, 4, 5, 6] {
            assert!(tactical_priority(&board, column) < 0, "column {column}");
        }
        assert_eq!(order_moves(&board, None, MoveOrdering::Tactical)[0], 3);
    }

    #[test]
    fn fork_gets_a_bonus() {
        let board = Board::from_moves(&[2, 0, 3, 0]).expect("moves should apply");
        assert!(tactical_priority(&board, 4) >= FORK_BONUS);
        assert_eq!(order_moves(&board, None, MoveOrdering::Tactical)[0], 4);
    }

    #[test]
    fn tt_move_goes_first_when_legal() {
        let board = Board::new();
        assert_eq!(
            order_moves(&board, Some(6), MoveOrdering::CenterFirst),
            vec![6, 3, 2, 4, 1, 5, 0]
        );

        let full = Board::from_moves(&[6, 6, 6, 6, 6, 6]).expect("moves should apply");
        assert_eq!(
            order_moves(&full, Some(6), MoveOrdering::CenterFirst),
            vec![3, 2, 4, 1, 5, 0]
        );
    }

    #[test]
    fn ordering_option_values_parse() {
        assert_eq!(MoveOrdering::parse("Center"), Some(MoveOrdering::CenterFirst));
        assert_eq!(MoveOrdering::parse("TACTICAL"), Some(MoveOrdering::Tactical));
        assert_eq!(MoveOrdering::parse("random"), None);
    }
}
