//! Canonical rule constants.
//!
//! Static tables shared by the board, the threat detector, move ordering and
//! the evaluator.

use crate::game_state::board_types::{Column, BOARD_WIDTH};

/// Columns from the center outward. Central columns take part in more lines.
pub const CENTER_FIRST_ORDER: [Column; BOARD_WIDTH] = [3, 2, 4, 1, 5, 0, 6];

/// The middle column.
pub const CENTER_COLUMN: Column = BOARD_WIDTH / 2;

/// One direction per axis (horizontal, vertical, two diagonals) as
/// `(column_step, row_step)`; the opposite direction is the negation.
pub const AXIS_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// Number of distinct four-cell windows on a 7x6 board.
pub const WINDOW_COUNT: usize = 69;

/// Distance of a column from the center, `0..=3`.
#[inline]
pub const fn center_distance(column: Column) -> usize {
    column.abs_diff(CENTER_COLUMN)
}
