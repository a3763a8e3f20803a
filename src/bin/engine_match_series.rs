//! Standalone engine-vs-engine series runner.
//!
//! Run with:
//! `cargo run --release --bin engine_match_series`
//! `RUST_LOG=info cargo run --release --bin engine_match_series -- --games 20 --player2 greedy`

use clap::{Parser, ValueEnum};

use plum_connect4::engines::engine_greedy::GreedyEngine;
use plum_connect4::engines::engine_iterative::IterativeEngine;
use plum_connect4::engines::engine_random::RandomEngine;
use plum_connect4::engines::engine_trait::{Engine, GoParams};
use plum_connect4::errors::EngineError;
use plum_connect4::utils::engine_match_harness::{
    play_engine_match_series, MatchConfig, MatchSeriesConfig,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EngineKind {
    Iterative,
    Greedy,
    Random,
}

/// Play a series of games between two engines, swapping colours each game.
#[derive(Parser)]
#[command(name = "engine_match_series")]
struct Cli {
    #[arg(long, default_value_t = 10)]
    games: u16,

    #[arg(long, default_value_t = 1234)]
    seed: u64,

    #[arg(long, value_enum, default_value = "iterative")]
    player1: EngineKind,

    #[arg(long, value_enum, default_value = "greedy")]
    player2: EngineKind,

    /// Search depth for iterative engines
    #[arg(long, default_value_t = 6)]
    depth: u8,

    /// Per-move budget for iterative engines, in milliseconds
    #[arg(long)]
    movetime_ms: Option<u64>,

    #[arg(long, default_value_t = 2)]
    opening_min_plies: u8,

    #[arg(long, default_value_t = 6)]
    opening_max_plies: u8,
}

fn build_engine(kind: EngineKind, depth: u8) -> Box<dyn Engine> {
    match kind {
        EngineKind::Iterative => Box::new(IterativeEngine::new(depth)),
        EngineKind::Greedy => Box::new(GreedyEngine::new()),
        EngineKind::Random => Box::new(RandomEngine::new()),
    }
}

fn main() -> Result<(), EngineError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let stats = play_engine_match_series(
        || build_engine(cli.player1, cli.depth),
        || build_engine(cli.player2, cli.depth),
        MatchSeriesConfig {
            games: cli.games,
            base_seed: cli.seed,
            per_game: MatchConfig {
                opening_min_plies: cli.opening_min_plies,
                opening_max_plies: cli.opening_max_plies,
                go_params: GoParams {
                    movetime_ms: cli.movetime_ms,
                    ..GoParams::default()
                },
            },
        },
    )?;

    println!("{}", stats.report());
    println!("outcomes: {:?}", stats.outcomes);
    Ok(())
}
