//! Crate root module declarations for the Plum Connect Four engine project.
//!
//! This file exposes all top-level subsystems (board state, move generation,
//! search, engines and utility helpers) so binaries, benches and external
//! tooling can import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod board_rules;
    pub mod board_types;
}

pub mod move_generation {
    pub mod move_ordering;
    pub mod perft;
    pub mod threats;
}

pub mod search {
    pub mod board_scoring;
    pub mod iterative_deepening;
    pub mod transposition_table;
}

pub mod engines {
    pub mod engine_greedy;
    pub mod engine_iterative;
    pub mod engine_random;
    pub mod engine_trait;
    pub mod time_management;
}

pub mod utils {
    pub mod engine_match_harness;
    pub mod move_sequence;
    pub mod render_board;
}
