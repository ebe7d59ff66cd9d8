//! # royal-chess
//!
//! A two-player, hidden-information capture game on an N×N board (default
//! 5×5), with a tabular Q-learning opponent trained by self-play.
//!
//! ## The game
//!
//! Both sides' pieces start face down in random cells. A turn is one of:
//! reveal an own hidden piece, step a revealed piece one orthogonal cell,
//! or capture an adjacent revealed enemy. Captures follow a non-transitive
//! rank table — the Farmer beats the King, the King beats everything else.
//! A player with no legal action skips; five consecutive forced skips
//! forfeit. Kill the enemy King to win.
//!
//! ## Design
//!
//! - **One rule engine, many drivers**: interactive play and self-play
//!   training share `rules::engine`; drivers stay thin.
//! - **Explicit state transitions**: the engine either completes an action
//!   and ends the turn, or rejects it leaving the board untouched.
//! - **Injected randomness**: placement, exploration, and tie-breaking all
//!   draw from a seeded, forkable [`core::GameRng`].
//! - **Owned value tables**: each agent owns its table, with explicit CSV
//!   export/import — no global mutable state.
//!
//! ## Modules
//!
//! - `core`: players, pieces, positions, configuration, board state, RNG
//! - `rules`: capture table, rule engine, derived action space
//! - `agent`: state encoding, value table, policy, persistence
//! - `training`: self-play episodes and the training runner
//! - `error`: illegal actions, configuration and persistence failures

pub mod agent;
pub mod core;
pub mod error;
pub mod rules;
pub mod training;

// Re-export commonly used types
pub use crate::core::{BoardState, GameConfig, GameRng, Piece, Player, Pos, Rank, Visibility};

pub use crate::rules::{
    available_categories, can_capture, has_any_action, move_targets, terminal, ActionCategory,
    GameAction, GameResult, MoveOutcome,
};

pub use crate::agent::{
    instantiate, load_table, save_table, state_key, AgentConfig, QLearningAgent, QRow, QTable,
};

pub use crate::training::{
    apply_action, play_episode, EpisodeEnd, EpisodeOutcome, SelfPlayConfig, SelfPlayRunner,
    TrainingSummary,
};

pub use crate::error::{ConfigError, IllegalAction, TableError};
