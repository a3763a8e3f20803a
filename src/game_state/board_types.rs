//! Core value types for the 7x6 board.
//! Cells, players and the game status are small `Copy` enums so boards stay
//! cheap to clone during search.

/// Number of columns.
pub const BOARD_WIDTH: usize = 7;
/// Number of rows; row 0 is the bottom row.
pub const BOARD_HEIGHT: usize = 6;
/// Total number of cells (and the maximum game length in plies).
pub const BOARD_CELLS: usize = BOARD_WIDTH * BOARD_HEIGHT;
/// Pieces in a row needed to win.
pub const CONNECT_LENGTH: usize = 4;

/// Column index in `0..BOARD_WIDTH`.
pub type Column = usize;

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Red,
    Yellow,
}

impl Player {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Player::Red => 0,
            Player::Yellow => 1,
        }
    }

    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            Player::Red => Player::Yellow,
            Player::Yellow => Player::Red,
        }
    }

    #[inline]
    pub const fn symbol(self) -> char {
        match self {
            Player::Red => 'X',
            Player::Yellow => 'O',
        }
    }
}

/// Content of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Red,
    Yellow,
}

impl Cell {
    #[inline]
    pub const fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Red => Some(Player::Red),
            Cell::Yellow => Some(Player::Yellow),
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<Player> for Cell {
    #[inline]
    fn from(player: Player) -> Self {
        match player {
            Player::Red => Cell::Red,
            Player::Yellow => Cell::Yellow,
        }
    }
}

/// Exactly one of these holds for every reachable board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InProgress,
    Victory(Player),
    Draw,
}

#[cfg(test)]
mod tests {
    use super::{Cell, Player};

    #[test]
    fn opponent_is_an_involution() {
        for p in [Player::Red, Player::Yellow] {
            assert_ne!(p, p.opponent());
            assert_eq!(p, p.opponent().opponent());
        }
    }

    #[test]
    fn cells_map_back_to_players() {
        assert_eq!(Cell::from(Player::Red).player(), Some(Player::Red));
        assert_eq!(Cell::from(Player::Yellow).player(), Some(Player::Yellow));
        assert_eq!(Cell::Empty.player(), None);
        assert!(Cell::default().is_empty());
    }
}
