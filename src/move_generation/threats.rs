//! Immediate-threat detection.
//!
//! A threat is a legal column where a drop for a given player completes four
//! in a row right away. Two or more threats at once form a fork the opponent
//! cannot cover with a single reply.

use crate::game_state::board::Board;
use crate::game_state::board_rules::CENTER_FIRST_ORDER;
use crate::game_state::board_types::{Column, Player, CONNECT_LENGTH};

/// Whether dropping a `player` piece into `column` would win on the spot.
///
/// Nothing is committed; the candidate cell is scanned as if it held
/// `player`. Illegal columns never win.
#[inline]
pub fn creates_win(board: &Board, column: Column, player: Player) -> bool {
    if !board.is_valid_move(column) {
        return false;
    }
    let row = board.column_height(column);
    board.line_length_through(column, row, player) >= CONNECT_LENGTH
}

/// Columns where `player` would win immediately, center first.
pub fn winning_columns(board: &Board, player: Player) -> Vec<Column> {
    CENTER_FIRST_ORDER
        .iter()
        .copied()
        .filter(|&column| creates_win(board, column, player))
        .collect()
}

/// Number of legal columns that win immediately for `player`.
#[inline]
pub fn count_immediate_threats(board: &Board, player: Player) -> usize {
    board
        .valid_moves_iter()
        .filter(|&column| creates_win(board, column, player))
        .count()
}

/// `player` has two or more simultaneous immediate wins.
#[inline]
pub fn has_fork(board: &Board, player: Player) -> bool {
    count_immediate_threats(board, player) >= 2
}

/// Whether the side to move playing `column` hands the opponent an
/// immediate win on the next ply. A move that wins outright never does.
pub fn allows_opponent_win(board: &Board, column: Column) -> bool {
    if !board.is_valid_move(column) {
        return false;
    }
    let child = board.drop_piece(column);
    child.is_in_progress() && count_immediate_threats(&child, child.current_player()) > 0
}

/// Threats the side to move would hold after playing `column`, or `None`
/// for illegal or game-ending columns.
pub fn threats_after_move(board: &Board, column: Column) -> Option<usize> {
    if !board.is_valid_move(column) {
        return None;
    }
    let mover = board.current_player();
    let child = board.drop_piece(column);
    child
        .is_in_progress()
        .then(|| count_immediate_threats(&child, mover))
}

/// A column that gives the side to move a fork while leaving the opponent
/// no immediate win, center first.
pub fn find_fork_move(board: &Board) -> Option<Column> {
    CENTER_FIRST_ORDER.iter().copied().find(|&column| {
        !allows_opponent_win(board, column)
            && threats_after_move(board, column).is_some_and(|threats| threats >= 2)
    })
}
