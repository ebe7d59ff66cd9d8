//! One self-play episode.
//!
//! The per-turn loop: check termination, let the mover's agent pick and
//! instantiate a category, apply it through the rule engine, convert the
//! outcome to a reward, and feed the TD update. Players alternate every
//! turn; a forced skip consumes the turn like any other action.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::agent::encoder::state_key;
use crate::agent::policy::QLearningAgent;
use crate::core::config::GameConfig;
use crate::core::rng::GameRng;
use crate::core::state::BoardState;
use crate::error::{ConfigError, IllegalAction};
use crate::rules::actions::GameAction;
use crate::rules::engine::{self, GameResult, MoveOutcome};

/// Reward for revealing a piece.
pub const REVEAL_REWARD: f64 = 1.0;
/// Reward for a non-capturing move.
pub const QUIET_MOVE_REWARD: f64 = -0.1;
/// Reward for a forced skip.
pub const SKIP_REWARD: f64 = -1.0;
/// Reward for an attempted illegal action.
pub const ILLEGAL_REWARD: f64 = -1.0;
// A capture's reward is the captured rank's value (Farmer 1 .. King 20).

/// How an episode ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EpisodeEnd {
    Finished(GameResult),
    /// The stop flag was raised between turns.
    Stopped,
}

/// Result of one episode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EpisodeOutcome {
    pub end: EpisodeEnd,
    pub turns: u32,
}

/// Apply a concrete action for the player to move and return its reward.
///
/// On `Err` the board is untouched and the turn has not advanced.
pub fn apply_action(board: &mut BoardState, action: GameAction) -> Result<f64, IllegalAction> {
    match action {
        GameAction::Reveal(pos) => {
            engine::apply_reveal(board, pos)?;
            Ok(REVEAL_REWARD)
        }
        GameAction::Move { from, to } | GameAction::Capture { from, to } => {
            match engine::apply_move(board, from, to)? {
                MoveOutcome::Moved => Ok(QUIET_MOVE_REWARD),
                MoveOutcome::Captured(rank) => Ok(f64::from(rank.value())),
            }
        }
        GameAction::Skip => {
            engine::apply_skip(board);
            Ok(SKIP_REWARD)
        }
    }
}

/// Play one episode of self-play between the two agents.
///
/// Both agents learn as they go. The stop flag is honored between turns:
/// no action application is ever interrupted mid-step.
pub fn play_episode(
    config: &GameConfig,
    agents: &mut [QLearningAgent; 2],
    rng: &mut GameRng,
    stop: &AtomicBool,
) -> Result<EpisodeOutcome, ConfigError> {
    let mut board = BoardState::setup(config, rng)?;

    loop {
        if stop.load(Ordering::Relaxed) {
            return Ok(EpisodeOutcome {
                end: EpisodeEnd::Stopped,
                turns: board.turn_count(),
            });
        }
        if let Some(result) = engine::terminal(&board, config) {
            return Ok(EpisodeOutcome {
                end: EpisodeEnd::Finished(result),
                turns: board.turn_count(),
            });
        }

        let player = board.current_player();
        let (key, action) = agents[player.index()].choose_action(&board, rng);
        let category = action.category();

        let reward = match apply_action(&mut board, action) {
            Ok(reward) => reward,
            Err(err) => {
                // Unreachable via the action space; consume the turn anyway
                // so a release build cannot spin on a repeated rejection.
                debug_assert!(false, "agent proposed illegal action: {err}");
                board.end_turn();
                ILLEGAL_REWARD
            }
        };

        let next_key = state_key(&board);
        agents[player.index()].update(&key, category, reward, &next_key);
    }
}
