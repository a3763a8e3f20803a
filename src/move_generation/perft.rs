use std::thread;

use crate::game_state::board::Board;
use crate::game_state::board_types::GameStatus;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    /// Leaves where the last drop completed four in a row.
    pub wins: usize,
    /// Leaves where the last drop filled the board without a line.
    pub draws: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.wins += rhs.wins;
        self.draws += rhs.draws;
    }
}

/// Count positions exactly `depth` plies below `board`.
///
/// Games that end earlier contribute nothing past their terminal ply.
pub fn perft(board: &Board, depth: u8) -> PerftCounts {
    let mut total = PerftCounts::default();
    perft_recurse(board, depth, &mut total);
    total
}

/// Same as [`perft`], one thread per root column.
pub fn perft_multi_threaded(board: &Board, depth: u8) -> PerftCounts {
    if depth == 0 {
        return perft(board, depth);
    }

    let mut total = PerftCounts::default();
    thread::scope(|scope| {
        let handles: Vec<_> = board
            .valid_moves_iter()
            .map(|column| {
                let child = board.drop_piece(column);
                scope.spawn(move || perft(&child, depth - 1))
            })
            .collect();

        for handle in handles {
            match handle.join() {
                Ok(local) => total.merge(local),
                Err(payload) => std::panic::resume_unwind(payload),
            }
        }
    });
    total
}

fn perft_recurse(board: &Board, depth: u8, counts: &mut PerftCounts) {
    if depth == 0 {
        counts.nodes += 1;
        match board.status() {
            GameStatus::Victory(_) => counts.wins += 1,
            GameStatus::Draw => counts.draws += 1,
            GameStatus::InProgress => {}
        }
        return;
    }

    for column in board.valid_moves_iter() {
        perft_recurse(&board.drop_piece(column), depth - 1, counts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::board::DRAW_SEQUENCE;

    #[test]
    fn perft_from_empty_board_matches_powers_of_seven() {
        let board = Board::new();
        let expected = [1, 7, 49, 343, 2401, 16807];
        for (depth, &nodes) in expected.iter().enumerate() {
            let counts = perft(&board, depth as u8);
            assert_eq!(counts.nodes, nodes, "depth {depth}");
            assert_eq!(counts.wins, 0);
            assert_eq!(counts.draws, 0);
        }
    }

    #[test]
    fn perft_counts_winning_leaves_and_stops_below_them() {
        // Red has row 0 columns 0..=2 and wins only with column 3.
        let board = Board::from_moves(&[0, 0, 1, 1, 2, 2]).expect("moves should apply");
        assert_eq!(
            perft(&board, 1),
            PerftCounts {
                nodes: 7,
                wins: 1,
                draws: 0,
            }
        );
        // The winning line has no children; the other six each have seven.
        assert_eq!(perft(&board, 2).nodes, 42);
    }

    #[test]
    fn perft_counts_the_final_drawing_drop() {
        let board = Board::from_moves(&DRAW_SEQUENCE[..DRAW_SEQUENCE.len() - 1])
            .expect("moves should apply");
        assert_eq!(
            perft(&board, 1),
            PerftCounts {
                nodes: 1,
                wins: 0,
                draws: 1,
            }
        );
        assert_eq!(perft(&board, 2).nodes, 0);
    }

    #[test]
    fn perft_on_a_finished_game_is_empty() {
        let board = Board::from_moves(&[0, 1, 0, 1, 0, 1, 0]).expect("moves should apply");
        assert_eq!(perft(&board, 0).wins, 1);
        assert_eq!(perft(&board, 3), PerftCounts::default());
    }

    #[test]
    fn multi_threaded_perft_matches_single_threaded() {
        let board = Board::from_moves(&[3, 3, 2]).expect("moves should apply");
        assert_eq!(perft_multi_threaded(&board, 4), perft(&board, 4));
        assert_eq!(perft_multi_threaded(&board, 0), perft(&board, 0));
    }
}
