//! Position analysis front end.
//!
//! Run with:
//! `cargo run --release -- --moves 4453 --movetime-ms 1000`
//! `RUST_LOG=debug cargo run --release -- --moves 44 --depth 10`

use std::process::ExitCode;

use clap::Parser;

use plum_connect4::engines::engine_iterative::IterativeEngine;
use plum_connect4::engines::engine_trait::{Engine, GoParams};
use plum_connect4::errors::EngineError;
use plum_connect4::utils::move_sequence::board_from_move_sequence;
use plum_connect4::utils::render_board::render_board;

/// Pick the best column for a Connect Four position.
#[derive(Parser)]
#[command(name = "plum_connect4", about = "Bounded-time Connect Four analysis")]
struct Cli {
    /// Moves played so far as column digits 1-7, e.g. "4453"
    #[arg(long, default_value = "")]
    moves: String,

    /// Time budget for the move in milliseconds
    #[arg(long, default_value_t = 1000)]
    movetime_ms: u64,

    /// Fixed search depth; deepens until the budget runs out when omitted
    #[arg(long)]
    depth: Option<u8>,

    /// Move ordering: tactical or center
    #[arg(long, default_value = "tactical")]
    ordering: String,

    /// Disable the transposition table
    #[arg(long)]
    no_hash: bool,
}

fn run(cli: &Cli) -> Result<(), EngineError> {
    let board = board_from_move_sequence(&cli.moves)?;
    println!("{}", render_board(&board));

    let mut engine = IterativeEngine::new(cli.depth.unwrap_or(42));
    engine.set_option("Ordering", &cli.ordering)?;
    engine.set_option("UseHash", if cli.no_hash { "false" } else { "true" })?;

    let params = GoParams {
        depth: cli.depth,
        movetime_ms: Some(cli.movetime_ms),
        ..GoParams::default()
    };
    let out = engine.choose_move(&board, &params)?;
    for line in &out.info_lines {
        println!("{line}");
    }
    let column = out.best_move.ok_or(EngineError::NoLegalMove)?;
    println!("bestmove {column} ({})", column + 1);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
