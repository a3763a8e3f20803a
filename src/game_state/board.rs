//! Core board state representation.
//!
//! `Board` is a small `Copy` value: every drop produces a fresh board and
//! leaves the receiver untouched, so the search can explore hypothetical
//! futures without ever mutating the caller's game state.

use crate::errors::BoardError;
use crate::game_state::board_rules::AXIS_DIRECTIONS;
use crate::game_state::board_types::*;

/// Bits reserved per column in [`Board::key`] (one sentinel row on top).
const KEY_COLUMN_BITS: usize = BOARD_HEIGHT + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    // [column][row], row 0 is the bottom.
    cells: [[Cell; BOARD_HEIGHT]; BOARD_WIDTH],
    // Next free row per column; BOARD_HEIGHT means full.
    column_heights: [u8; BOARD_WIDTH],

    first_player: Player,
    current_player: Player,
    status: GameStatus,
    ply: u8,
    last_move: Option<(Column, usize)>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Empty board with Red to move.
    #[inline]
    pub fn new() -> Self {
        Self::with_first_player(Player::Red)
    }

    /// Empty board with `first_player` to move.
    pub fn with_first_player(first_player: Player) -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_HEIGHT]; BOARD_WIDTH],
            column_heights: [0; BOARD_WIDTH],
            first_player,
            current_player: first_player,
            status: GameStatus::InProgress,
            ply: 0,
            last_move: None,
        }
    }

    /// Replay `moves` from the empty board (Red first).
    pub fn from_moves(moves: &[Column]) -> Result<Self, BoardError> {
        moves
            .iter()
            .try_fold(Self::new(), |board, &column| board.make_move(column))
    }

    /// Drop a piece for the side to move and return the resulting board.
    pub fn make_move(&self, column: Column) -> Result<Self, BoardError> {
        if column >= BOARD_WIDTH {
            return Err(BoardError::InvalidColumn { column });
        }
        if !self.is_in_progress() {
            return Err(BoardError::GameOver);
        }
        if usize::from(self.column_heights[column]) >= BOARD_HEIGHT {
            return Err(BoardError::ColumnFull { column });
        }
        Ok(self.drop_piece(column))
    }

    /// Unvalidated drop used by the search on columns it generated itself.
    #[inline]
    pub(crate) fn drop_piece(&self, column: Column) -> Self {
        debug_assert!(self.is_valid_move(column), "drop into illegal column {column}");

        let mover = self.current_player;
        let row = usize::from(self.column_heights[column]);

        let mut next = *self;
        next.cells[column][row] = Cell::from(mover);
        next.column_heights[column] += 1;
        next.ply += 1;
        next.current_player = mover.opponent();
        next.last_move = Some((column, row));
        next.status = if next.line_length_through(column, row, mover) >= CONNECT_LENGTH {
            GameStatus::Victory(mover)
        } else if usize::from(next.ply) == BOARD_CELLS {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        };
        next
    }

    /// Legal columns in ascending order; empty once the game is over.
    pub fn get_valid_moves(&self) -> Vec<Column> {
        self.valid_moves_iter().collect()
    }

    pub fn valid_moves_iter(&self) -> impl Iterator<Item = Column> + '_ {
        (0..BOARD_WIDTH).filter(move |&column| self.is_valid_move(column))
    }

    #[inline]
    pub fn is_valid_move(&self, column: Column) -> bool {
        self.is_in_progress()
            && column < BOARD_WIDTH
            && usize::from(self.column_heights[column]) < BOARD_HEIGHT
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn is_in_progress(&self) -> bool {
        self.status == GameStatus::InProgress
    }

    #[inline]
    pub fn is_victory(&self) -> bool {
        matches!(self.status, GameStatus::Victory(_))
    }

    #[inline]
    pub fn is_draw(&self) -> bool {
        self.status == GameStatus::Draw
    }

    /// The side that completed four in a row, if any.
    #[inline]
    pub fn winner(&self) -> Option<Player> {
        match self.status {
            GameStatus::Victory(player) => Some(player),
            _ => None,
        }
    }

    #[inline]
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    #[inline]
    pub fn first_player(&self) -> Player {
        self.first_player
    }

    /// Cell at `(column, row)`; panics outside the board like slice indexing.
    #[inline]
    pub fn cell(&self, column: Column, row: usize) -> Cell {
        self.cells[column][row]
    }

    /// Bounds-checked cell lookup with signed coordinates.
    #[inline]
    pub fn cell_at(&self, column: i32, row: i32) -> Option<Cell> {
        if column < 0 || row < 0 {
            return None;
        }
        self.cells
            .get(column as usize)
            .and_then(|col| col.get(row as usize))
            .copied()
    }

    #[inline]
    pub fn column_height(&self, column: Column) -> usize {
        usize::from(self.column_heights[column])
    }

    pub fn column_heights(&self) -> [usize; BOARD_WIDTH] {
        self.column_heights.map(usize::from)
    }

    /// Plies played so far.
    #[inline]
    pub fn ply(&self) -> usize {
        usize::from(self.ply)
    }

    #[inline]
    pub fn empty_cells(&self) -> usize {
        BOARD_CELLS - self.ply()
    }

    /// `(column, row)` of the most recent drop.
    #[inline]
    pub fn last_move(&self) -> Option<(Column, usize)> {
        self.last_move
    }

    /// Exact position key derived from cell contents only.
    ///
    /// Each column owns 7 bits: one bit per Red piece plus a sentinel bit
    /// directly above the top piece. Distinct cell contents always yield
    /// distinct keys and move order never matters.
    pub fn key(&self) -> u64 {
        let mut key = 0u64;
        for column in 0..BOARD_WIDTH {
            let base = column * KEY_COLUMN_BITS;
            let height = usize::from(self.column_heights[column]);
            key |= 1u64 << (base + height);
            for row in 0..height {
                if self.cells[column][row] == Cell::Red {
                    key |= 1u64 << (base + row);
                }
            }
        }
        key
    }

    /// Longest run of `player` through `(column, row)` along any axis,
    /// counting that cell as `player` whatever it currently holds.
    pub(crate) fn line_length_through(&self, column: Column, row: usize, player: Player) -> usize {
        let target = Cell::from(player);
        let (col, row) = (column as i32, row as i32);

        AXIS_DIRECTIONS
            .iter()
            .map(|&(dc, dr)| {
                let forward = self.run_length(col, row, dc, dr, target);
                let backward = self.run_length(col, row, -dc, -dr, target);
                1 + forward + backward
            })
            .max()
            .unwrap_or(1)
    }

    #[inline]
    fn run_length(&self, col: i32, row: i32, dc: i32, dr: i32, target: Cell) -> usize {
        let mut count = 0;
        let (mut c, mut r) = (col + dc, row + dr);
        while count < CONNECT_LENGTH - 1 && self.cell_at(c, r) == Some(target) {
            count += 1;
            c += dc;
            r += dr;
        }
        count
    }
}

/// A full board without four in a row, filled column pair by column pair.
#[cfg(test)]
pub(crate) const DRAW_SEQUENCE: [Column; BOARD_CELLS] = [
    0, 1, 0, 1, 0, 1, 1, 0, 1, 0, 1, 0, //
    2, 3, 2, 3, 2, 3, 3, 2, 3, 2, 3, 2, //
    4, 5, 4, 5, 4, 5, 5, 4, 5, 4, 5, 4, //
    6, 6, 6, 6, 6, 6,
];
