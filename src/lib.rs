//! Crate root module declarations for the Plum Checkers engine project.
//!
//! This file exposes all top-level subsystems (board model, successor
//! generation, the generic search engine, the turn-driven game layer, and
//! text utilities) so binaries, tests, and benches can import stable module
//! paths.

pub mod errors;

pub mod board {
    pub mod board;
    pub mod board_ids;
    pub mod coordinate;
    pub mod piece_catalogue;
    pub mod turn;
}

pub mod move_generation {
    pub mod checkers_successors;
    pub mod move_request;
    pub mod perft;
    pub mod successor_generator;
}

pub mod search {
    pub mod alpha_beta;
    pub mod board_scoring;
    pub mod depth_limited;
    pub mod goal;
    pub mod negmax;
    pub mod node;
    pub mod pipeline;
    pub mod search_cache;
    pub mod search_state;

    #[cfg(test)]
    pub(crate) mod noughts_and_crosses;
}

pub mod game {
    pub mod checkers_game;
    pub mod turn_driven_game;
}

pub mod utils {
    pub mod move_notation;
    pub mod render_board;
}
