//! Core types: players, pieces, positions, configuration, board state,
//! and deterministic RNG.

pub mod config;
pub mod piece;
pub mod player;
pub mod position;
pub mod rng;
pub mod state;

pub use config::GameConfig;
pub use piece::{Piece, Rank, Visibility};
pub use player::Player;
pub use position::Pos;
pub use rng::GameRng;
pub use state::BoardState;
