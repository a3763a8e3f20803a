//! Plain-text board renderer for terminals, logs and tests.

use crate::game_state::board::Board;
use crate::game_state::board_types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Render rows top to bottom with `X` for Red, `O` for Yellow and `.` for
/// empty cells, followed by a 1-based column footer.
pub fn render_board(board: &Board) -> String {
    let mut out = String::with_capacity((BOARD_HEIGHT + 1) * BOARD_WIDTH * 2);

    for row in (0..BOARD_HEIGHT).rev() {
        for column in 0..BOARD_WIDTH {
            out.push(cell_symbol(board.cell(column, row)));
            if column + 1 < BOARD_WIDTH {
                out.push(' ');
            }
        }
        out.push('\n');
    }

    for column in 0..BOARD_WIDTH {
        out.push(char::from(b'1' + column as u8));
        if column + 1 < BOARD_WIDTH {
            out.push(' ');
        }
    }

    out
}

fn cell_symbol(cell: Cell) -> char {
    match cell.player() {
        Some(player) => player.symbol(),
        None => '.',
    }
}
