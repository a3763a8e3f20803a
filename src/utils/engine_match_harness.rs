//! Minimal head-to-head engine match harness for local testing.
//!
//! Runs two `Engine` implementations against each other with an optional
//! seeded random opening prefix, and aggregates series statistics.

use rand::prelude::IndexedRandom;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Instant;

use crate::engines::engine_trait::{Engine, GoParams};
use crate::errors::EngineError;
use crate::game_state::board::Board;
use crate::game_state::board_types::{Column, GameStatus, Player};
use crate::utils::move_sequence::move_sequence_string;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    RedWin,
    YellowWin,
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOutcome {
    PlayerWin { player: PlayerId, color: Player },
    Draw,
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub opening_min_plies: u8,
    pub opening_max_plies: u8,
    pub go_params: GoParams,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            opening_min_plies: 0,
            opening_max_plies: 4,
            go_params: GoParams::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_board: Board,
    pub opening_moves: Vec<Column>,
    pub played_moves: Vec<Column>,
    pub red_move_count: u32,
    pub yellow_move_count: u32,
    pub red_total_time_ns: u128,
    pub yellow_total_time_ns: u128,
}

impl MatchResult {
    /// Whole game in digit notation, opening included.
    pub fn move_sequence(&self) -> String {
        let mut all = self.opening_moves.clone();
        all.extend_from_slice(&self.played_moves);
        move_sequence_string(&all)
    }
}

#[derive(Debug, Clone)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 10,
            base_seed: 0,
            per_game: MatchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub draws: u16,
    pub outcomes: Vec<SeriesOutcome>,
    pub player1_moves: u32,
    pub player2_moves: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
    pub player1_avg_move_time_ms: f64,
    pub player2_avg_move_time_ms: f64,
    pub overall_avg_move_time_ms: f64,
}

impl MatchSeriesStats {
    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} draws={} p1_avg_ms={:.3} p2_avg_ms={:.3} overall_avg_ms={:.3}",
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.draws,
            self.player1_avg_move_time_ms,
            self.player2_avg_move_time_ms,
            self.overall_avg_move_time_ms
        )
    }
}

/// Play a single seeded engine-vs-engine match.
///
/// `engine_red` moves first.
pub fn play_engine_match(
    mut engine_red: Box<dyn Engine>,
    mut engine_yellow: Box<dyn Engine>,
    seed: u64,
    config: MatchConfig,
) -> Result<MatchResult, EngineError> {
    engine_red.new_game();
    engine_yellow.new_game();

    let (mut board, opening_moves) = apply_seeded_random_opening(
        &Board::new(),
        seed,
        config.opening_min_plies,
        config.opening_max_plies,
    );

    let mut played_moves = Vec::<Column>::new();
    let mut red_move_count = 0u32;
    let mut yellow_move_count = 0u32;
    let mut red_total_time_ns = 0u128;
    let mut yellow_total_time_ns = 0u128;

    while board.is_in_progress() {
        let mover = board.current_player();
        let started = Instant::now();
        let out = match mover {
            Player::Red => engine_red.choose_move(&board, &config.go_params)?,
            Player::Yellow => engine_yellow.choose_move(&board, &config.go_params)?,
        };
        let elapsed_ns = started.elapsed().as_nanos();

        match mover {
            Player::Red => {
                red_move_count = red_move_count.saturating_add(1);
                red_total_time_ns = red_total_time_ns.saturating_add(elapsed_ns);
            }
            Player::Yellow => {
                yellow_move_count = yellow_move_count.saturating_add(1);
                yellow_total_time_ns = yellow_total_time_ns.saturating_add(elapsed_ns);
            }
        }

        let chosen = out.best_move.ok_or(EngineError::NoLegalMove)?;
        if !board.is_valid_move(chosen) {
            return Err(EngineError::IllegalEngineMove { column: chosen });
        }
        played_moves.push(chosen);
        board = board.make_move(chosen)?;
    }

    let outcome = match board.status() {
        GameStatus::Victory(Player::Red) => MatchOutcome::RedWin,
        GameStatus::Victory(Player::Yellow) => MatchOutcome::YellowWin,
        GameStatus::Draw | GameStatus::InProgress => MatchOutcome::Draw,
    };

    Ok(MatchResult {
        outcome,
        final_board: board,
        opening_moves,
        played_moves,
        red_move_count,
        yellow_move_count,
        red_total_time_ns,
        yellow_total_time_ns,
    })
}

/// Play a series of matches and aggregate win/loss/draw statistics.
///
/// Player 1 is Red in even-numbered games and Yellow in odd ones; game `i`
/// uses opening seed `base_seed + i`.
pub fn play_engine_match_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: MatchSeriesConfig,
) -> Result<MatchSeriesStats, EngineError>
where
    F1: Fn() -> Box<dyn Engine>,
    F2: Fn() -> Box<dyn Engine>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };

    for i in 0..config.games {
        let player1_is_red = i % 2 == 0;
        let seed = config.base_seed.wrapping_add(u64::from(i));
        log::info!(
            "[series] game {}/{} seed={} red={} yellow={}",
            i + 1,
            config.games,
            seed,
            if player1_is_red { "Player1" } else { "Player2" },
            if player1_is_red { "Player2" } else { "Player1" },
        );

        let result = if player1_is_red {
            play_engine_match(player1_factory(), player2_factory(), seed, config.per_game.clone())?
        } else {
            play_engine_match(player2_factory(), player1_factory(), seed, config.per_game.clone())?
        };

        let (p1_moves, p2_moves, p1_ns, p2_ns) = if player1_is_red {
            (
                result.red_move_count,
                result.yellow_move_count,
                result.red_total_time_ns,
                result.yellow_total_time_ns,
            )
        } else {
            (
                result.yellow_move_count,
                result.red_move_count,
                result.yellow_total_time_ns,
                result.red_total_time_ns,
            )
        };
        stats.player1_moves = stats.player1_moves.saturating_add(p1_moves);
        stats.player2_moves = stats.player2_moves.saturating_add(p2_moves);
        stats.player1_total_time_ns = stats.player1_total_time_ns.saturating_add(p1_ns);
        stats.player2_total_time_ns = stats.player2_total_time_ns.saturating_add(p2_ns);

        let winner_color = match result.outcome {
            MatchOutcome::RedWin => Some(Player::Red),
            MatchOutcome::YellowWin => Some(Player::Yellow),
            MatchOutcome::Draw => None,
        };
        let mapped = match winner_color {
            Some(color) => {
                let player1_won = (color == Player::Red) == player1_is_red;
                let player = if player1_won {
                    stats.player1_wins += 1;
                    PlayerId::Player1
                } else {
                    stats.player2_wins += 1;
                    PlayerId::Player2
                };
                SeriesOutcome::PlayerWin { player, color }
            }
            None => {
                stats.draws += 1;
                SeriesOutcome::Draw
            }
        };
        stats.outcomes.push(mapped);

        log::info!(
            "[series] game {}/{} result={:?} moves={} p1_wins={} p2_wins={} draws={}",
            i + 1,
            config.games,
            mapped,
            result.move_sequence(),
            stats.player1_wins,
            stats.player2_wins,
            stats.draws
        );
    }

    stats.player1_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player1_total_time_ns, stats.player1_moves);
    stats.player2_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player2_total_time_ns, stats.player2_moves);

    let total_ns = stats
        .player1_total_time_ns
        .saturating_add(stats.player2_total_time_ns);
    let total_moves = stats.player1_moves.saturating_add(stats.player2_moves);
    stats.overall_avg_move_time_ms = avg_ns_per_move_ms(total_ns, total_moves);

    Ok(stats)
}

#[inline]
fn avg_ns_per_move_ms(total_ns: u128, moves: u32) -> f64 {
    if moves == 0 {
        0.0
    } else {
        (total_ns as f64) / (moves as f64) / 1_000_000.0
    }
}

/// Random prefix of `min_plies..=max_plies` drops that never ends the game.
fn apply_seeded_random_opening(
    initial: &Board,
    seed: u64,
    min_plies: u8,
    max_plies: u8,
) -> (Board, Vec<Column>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = *initial;
    let mut opening_moves = Vec::<Column>::new();

    let low = min_plies.min(max_plies);
    let high = max_plies.max(min_plies);
    let target_plies = if low == high {
        low
    } else {
        rng.random_range(low..=high)
    };

    for _ in 0..target_plies {
        let quiet: Vec<(Column, Board)> = board
            .valid_moves_iter()
            .filter_map(|column| board.make_move(column).ok().map(|next| (column, next)))
            .filter(|(_, next)| next.is_in_progress())
            .collect();
        let Some(&(column, next)) = quiet.choose(&mut rng) else {
            break;
        };
        opening_moves.push(column);
        board = next;
    }

    (board, opening_moves)
}
