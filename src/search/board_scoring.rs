//! Pluggable board evaluation interfaces and baseline implementations.
//!
//! Search stays modular by delegating static scoring of non-terminal boards
//! to [`BoardScorer`]; terminal boards are scored by the search itself.

use std::sync::OnceLock;

use crate::game_state::board::Board;
use crate::game_state::board_rules::{AXIS_DIRECTIONS, WINDOW_COUNT};
use crate::game_state::board_types::*;
use crate::move_generation::threats::count_immediate_threats;

/// Base magnitude of a decided game. Static evaluations stay strictly inside
/// `(-WIN_SCORE, WIN_SCORE)`.
pub const WIN_SCORE: i32 = 1_000_000;
const MAX_EVAL: i32 = WIN_SCORE / 2;

/// Four cells in a line, as `(column, row)`.
pub type Window = [(Column, usize); CONNECT_LENGTH];

static WINDOWS: OnceLock<Vec<Window>> = OnceLock::new();

/// Every four-cell window on the board, built once.
pub fn windows() -> &'static [Window] {
    WINDOWS.get_or_init(build_windows)
}

fn build_windows() -> Vec<Window> {
    let mut out = Vec::with_capacity(WINDOW_COUNT);
    let span = CONNECT_LENGTH as i32 - 1;
    for &(dc, dr) in &AXIS_DIRECTIONS {
        for column in 0..BOARD_WIDTH as i32 {
            for row in 0..BOARD_HEIGHT as i32 {
                let (end_c, end_r) = (column + dc * span, row + dr * span);
                if !(0..BOARD_WIDTH as i32).contains(&end_c)
                    || !(0..BOARD_HEIGHT as i32).contains(&end_r)
                {
                    continue;
                }
                let mut window = [(0, 0); CONNECT_LENGTH];
                for (i, cell) in window.iter_mut().enumerate() {
                    let i = i as i32;
                    *cell = ((column + dc * i) as usize, (row + dr * i) as usize);
                }
                out.push(window);
            }
        }
    }
    out
}

pub trait BoardScorer: Send + Sync {
    /// Score from `player`'s perspective.
    ///
    /// Must be antisymmetric: `score_for(b, p) == -score_for(b, p.opponent())`.
    fn score_for(&self, board: &Board, player: Player) -> i32;

    /// Score from the perspective of the side to move.
    fn score(&self, board: &Board) -> i32 {
        self.score_for(board, board.current_player())
    }
}

/// Per-column occupancy only.
#[derive(Debug, Clone, Copy)]
pub struct CenterScorer {
    pub column_weights: [i32; BOARD_WIDTH],
}

impl Default for CenterScorer {
    fn default() -> Self {
        Self {
            column_weights: EvalWeights::default().center_column_weights,
        }
    }
}

impl BoardScorer for CenterScorer {
    fn score_for(&self, board: &Board, player: Player) -> i32 {
        center_term(board, player, &self.column_weights)
            - center_term(board, player.opponent(), &self.column_weights)
    }
}

/// Tunable weights for [`WindowScorer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalWeights {
    /// Per piece, by column.
    pub center_column_weights: [i32; BOARD_WIDTH],
    /// Two own pieces and two empties in a live window.
    pub two: i32,
    /// Three own pieces and one empty.
    pub three: i32,
    pub four: i32,
    /// Per legal column that wins on the spot.
    pub immediate_threat: i32,
    /// Per pending three whose empty cell sits on a favourable row.
    pub parity: i32,
    /// Weight of the waiting side's terms, in percent of the mover's.
    pub defense_bias_percent: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            center_column_weights: [0, 2, 3, 6, 3, 2, 0],
            two: 5,
            three: 50,
            four: 1000,
            immediate_threat: 300,
            parity: 8,
            defense_bias_percent: 110,
        }
    }
}

/// Center weighting, window patterns, immediate threats and row parity.
///
/// Both sides are totalled from the same terms; the side waiting to move is
/// scaled by `defense_bias_percent`, so the score is anchored to the board
/// and stays antisymmetric between the two players.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowScorer {
    pub weights: EvalWeights,
}

impl WindowScorer {
    pub fn new(weights: EvalWeights) -> Self {
        Self { weights }
    }

    /// Unbiased sum of every term for `player`.
    pub fn player_total(&self, board: &Board, player: Player) -> i32 {
        let w = &self.weights;
        let threats = count_immediate_threats(board, player) as i32;
        center_term(board, player, &w.center_column_weights)
            + window_term(board, player, w)
            + threats * w.immediate_threat
    }
}

impl BoardScorer for WindowScorer {
    fn score_for(&self, board: &Board, player: Player) -> i32 {
        let mover = board.current_player();
        let attack = self.player_total(board, mover);
        let defense = self.player_total(board, mover.opponent());
        let value = (attack - defense * self.weights.defense_bias_percent / 100)
            .clamp(-MAX_EVAL, MAX_EVAL);
        if player == mover {
            value
        } else {
            -value
        }
    }
}

fn center_term(board: &Board, player: Player, weights: &[i32; BOARD_WIDTH]) -> i32 {
    let target = Cell::from(player);
    (0..BOARD_WIDTH)
        .map(|column| {
            let pieces = (0..board.column_height(column))
                .filter(|&row| board.cell(column, row) == target)
                .count() as i32;
            pieces * weights[column]
        })
        .sum()
}

/// Score of one window for the side owning `own` of its cells.
/// Windows holding both colours are dead and worth nothing.
fn window_value(own: usize, opponent: usize, weights: &EvalWeights) -> i32 {
    if opponent > 0 {
        return 0;
    }
    match own {
        4 => weights.four,
        3 => weights.three,
        2 => weights.two,
        _ => 0,
    }
}

fn favours_row(board: &Board, player: Player, row: usize) -> bool {
    // First player wants even 0-based rows, the second player odd ones.
    let even = row % 2 == 0;
    if player == board.first_player() {
        even
    } else {
        !even
    }
}

fn window_term(board: &Board, player: Player, weights: &EvalWeights) -> i32 {
    let own_cell = Cell::from(player);
    let mut total = 0;
    for window in windows() {
        let mut own = 0;
        let mut opponent = 0;
        let mut empty = None;
        for &(column, row) in window {
            match board.cell(column, row) {
                Cell::Empty => empty = Some((column, row)),
                cell if cell == own_cell => own += 1,
                _ => opponent += 1,
            }
        }
        total += window_value(own, opponent, weights);

        if own == 3 && opponent == 0 {
            if let Some((column, row)) = empty {
                let pending = row > board.column_height(column);
                if pending && favours_row(board, player, row) {
                    total += weights.parity;
                }
            }
        }
    }
    total
}
