//! Game rules: the capture relation, the rule engine, and the derived
//! action space.

pub mod actions;
pub mod capture;
pub mod engine;

pub use actions::{
    available_categories, capture_moves, quiet_moves, reveal_positions, ActionCategory, GameAction,
};
pub use capture::can_capture;
pub use engine::{
    apply_move, apply_reveal, apply_skip, has_any_action, move_targets, reveal_legal, terminal,
    GameResult, MoveOutcome,
};
