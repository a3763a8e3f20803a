//! Digit move-sequence notation.
//!
//! A game is written as the 1-based columns played in order, e.g. `"4453"`
//! (Red in column 4, Yellow on top of it, Red in 5, Yellow in 3). Whitespace
//! is ignored so long games can be grouped for readability.

use crate::errors::NotationError;
use crate::game_state::board::Board;
use crate::game_state::board_types::{Column, BOARD_WIDTH};

/// Columns of `sequence`, 0-based, without replaying them.
pub fn parse_move_sequence(sequence: &str) -> Result<Vec<Column>, NotationError> {
    sequence
        .char_indices()
        .filter(|(_, ch)| !ch.is_whitespace())
        .map(|(position, ch)| {
            ch.to_digit(10)
                .map(|d| d as usize)
                .filter(|d| (1..=BOARD_WIDTH).contains(d))
                .map(|d| d - 1)
                .ok_or(NotationError::InvalidCharacter { position, found: ch })
        })
        .collect()
}

/// Replay `sequence` from the empty board, Red first.
pub fn board_from_move_sequence(sequence: &str) -> Result<Board, NotationError> {
    let mut board = Board::new();
    for (position, ch) in sequence.char_indices().filter(|(_, ch)| !ch.is_whitespace()) {
        let column = ch
            .to_digit(10)
            .map(|d| d as usize)
            .filter(|d| (1..=BOARD_WIDTH).contains(d))
            .ok_or(NotationError::InvalidCharacter { position, found: ch })?
            - 1;
        board = board
            .make_move(column)
            .map_err(|source| NotationError::IllegalMove { position, source })?;
    }
    Ok(board)
}

/// Write 0-based `moves` in digit notation.
pub fn move_sequence_string(moves: &[Column]) -> String {
    moves.iter().map(|column| (column + 1).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BoardError;
    use crate::game_state::board_types::{Cell, Player};

    #[test]
    fn sequence_replays_from_red() {
        let board = board_from_move_sequence("4453").expect("sequence should parse");
        assert_eq!(board.cell(3, 0), Cell::Red);
        assert_eq!(board.cell(3, 1), Cell::Yellow);
        assert_eq!(board.cell(4, 0), Cell::Red);
        assert_eq!(board.cell(2, 0), Cell::Yellow);
        assert_eq!(board.current_player(), Player::Red);
    }

    #[test]
    fn whitespace_is_ignored() {
        let spaced = board_from_move_sequence(" 44 53\n").expect("sequence should parse");
        let dense = board_from_move_sequence("4453").expect("sequence should parse");
        assert_eq!(spaced, dense);
        assert_eq!(parse_move_sequence("1 7").expect("digits"), vec![0, 6]);
    }

    #[test]
    fn bad_digits_are_reported_with_their_position() {
        assert_eq!(
            board_from_move_sequence("448"),
            Err(NotationError::InvalidCharacter {
                position: 2,
                found: '8'
            })
        );
        assert_eq!(
            parse_move_sequence("0"),
            Err(NotationError::InvalidCharacter {
                position: 0,
                found: '0'
            })
        );
    }

    #[test]
    fn overfilled_column_is_an_illegal_move() {
        assert_eq!(
            board_from_move_sequence("1111111"),
            Err(NotationError::IllegalMove {
                position: 6,
                source: BoardError::ColumnFull { column: 0 },
            })
        );
    }

    #[test]
    fn writing_uses_one_based_digits() {
        assert_eq!(move_sequence_string(&[3, 3, 4, 2]), "4453");
        assert_eq!(move_sequence_string(&[]), "");
    }
}
