//! The Q-learning agent: epsilon-greedy policy and TD updates.
//!
//! The agent learns over action *categories*; turning a chosen category
//! into a concrete action (which piece, which target) is a uniformly
//! random pick among all legal instances, so the table never absorbs a
//! positional bias from the instantiation step.

use serde::{Deserialize, Serialize};

use crate::agent::qtable::QTable;
use crate::core::player::Player;
use crate::core::rng::GameRng;
use crate::core::state::BoardState;
use crate::rules::actions::{
    available_categories, capture_moves, quiet_moves, reveal_positions, ActionCategory, GameAction,
};

/// Hyperparameters for a `QLearningAgent`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Probability of exploring (choosing uniformly at random).
    pub epsilon: f64,
    /// Learning rate.
    pub alpha: f64,
    /// Discount factor.
    pub gamma: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.3,
            alpha: 0.1,
            gamma: 0.99,
        }
    }
}

impl AgentConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    #[must_use]
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }
}

/// A tabular Q-learning agent.
///
/// Owns its value table; pooling learning across episodes means reusing
/// the same agent instance for sequential games, never sharing one agent
/// across concurrent sessions.
#[derive(Clone, Debug, Default)]
pub struct QLearningAgent {
    config: AgentConfig,
    table: QTable,
}

impl QLearningAgent {
    #[must_use]
    pub fn new(config: AgentConfig) -> Self {
        Self {
            config,
            table: QTable::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    #[must_use]
    pub fn table(&self) -> &QTable {
        &self.table
    }

    /// Replace the value table (loading a persisted table).
    pub fn set_table(&mut self, table: QTable) {
        self.table = table;
    }

    /// Epsilon-greedy choice among the available categories.
    ///
    /// With probability epsilon picks uniformly at random; otherwise picks
    /// uniformly among the available categories whose row value attains
    /// the maximum, so ties don't collapse to the first-listed category.
    pub fn choose_category(
        &mut self,
        state_key: &str,
        available: &[ActionCategory],
        rng: &mut GameRng,
    ) -> ActionCategory {
        debug_assert!(!available.is_empty(), "action space is never empty");
        if available.len() == 1 {
            return available[0];
        }

        if rng.gen_bool(self.config.epsilon) {
            return *rng.choose(available).unwrap_or(&ActionCategory::Skip);
        }

        let row = self.table.row_mut(state_key);
        let best = available
            .iter()
            .map(|&category| row.get(category))
            .fold(f64::NEG_INFINITY, f64::max);
        let best_categories: Vec<ActionCategory> = available
            .iter()
            .copied()
            .filter(|&category| row.get(category) == best)
            .collect();
        *rng.choose(&best_categories).unwrap_or(&available[0])
    }

    /// Pick a concrete action for the current player: category by policy,
    /// instance uniformly at random. Returns the state key alongside so
    /// the caller can feed the TD update after applying the action.
    pub fn choose_action(&mut self, board: &BoardState, rng: &mut GameRng) -> (String, GameAction) {
        let player = board.current_player();
        let state_key = crate::agent::encoder::state_key(board);
        let available = available_categories(board, player);
        let category = self.choose_category(&state_key, &available, rng);
        let action = instantiate(board, player, category, rng).unwrap_or_else(|| {
            debug_assert!(false, "available category {category} had no legal instance");
            GameAction::Skip
        });
        (state_key, action)
    }

    /// One-step TD update.
    ///
    /// `target = reward + gamma * max(row(next))`; the visited cell moves
    /// `alpha` of the way toward the target. Missing rows for either state
    /// are created zero-initialized.
    pub fn update(
        &mut self,
        state_key: &str,
        category: ActionCategory,
        reward: f64,
        next_state_key: &str,
    ) {
        // Materialize the successor row so its columns exist on export.
        let next_best = self.table.row_mut(next_state_key).max();
        let row = self.table.row_mut(state_key);
        let target = reward + self.config.gamma * next_best;
        let error = target - row.get(category);
        row.set(category, row.get(category) + self.config.alpha * error);
    }
}

/// Uniformly pick a concrete legal instance of `category` for `player`.
///
/// Returns `None` only if the category has no legal instance, which the
/// action space guarantees against for categories it reported available.
#[must_use]
pub fn instantiate(
    board: &BoardState,
    player: Player,
    category: ActionCategory,
    rng: &mut GameRng,
) -> Option<GameAction> {
    match category {
        ActionCategory::Reveal => rng
            .choose(&reveal_positions(board, player))
            .map(|&pos| GameAction::Reveal(pos)),
        ActionCategory::Move => rng
            .choose(&quiet_moves(board, player))
            .map(|&(from, to)| GameAction::Move { from, to }),
        ActionCategory::Capture => rng
            .choose(&capture_moves(board, player))
            .map(|&(from, to)| GameAction::Capture { from, to }),
        ActionCategory::Skip => Some(GameAction::Skip),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::piece::{Piece, Rank, Visibility};
    use crate::core::position::Pos;

    #[test]
    fn test_update_moves_toward_target() {
        let mut agent = QLearningAgent::new(AgentConfig::new().with_alpha(0.5).with_gamma(0.0));
        agent.update("s", ActionCategory::Reveal, 1.0, "t");
        assert_eq!(
            agent.table().row("s").unwrap().get(ActionCategory::Reveal),
            0.5
        );
        agent.update("s", ActionCategory::Reveal, 1.0, "t");
        assert_eq!(
            agent.table().row("s").unwrap().get(ActionCategory::Reveal),
            0.75
        );
    }

    #[test]
    fn test_update_with_zero_alpha_is_identity() {
        let mut agent = QLearningAgent::new(AgentConfig::new().with_alpha(0.0));
        agent.update("s", ActionCategory::Capture, 20.0, "t");
        assert_eq!(
            agent.table().row("s").unwrap().get(ActionCategory::Capture),
            0.0
        );
    }

    #[test]
    fn test_update_discounts_successor() {
        let mut agent = QLearningAgent::new(AgentConfig::new().with_alpha(1.0).with_gamma(0.5));
        agent.update("next", ActionCategory::Move, 4.0, "end");
        // row("next")[Move] = 4.0, so target from "s" = 1.0 + 0.5 * 4.0.
        agent.update("s", ActionCategory::Reveal, 1.0, "next");
        assert_eq!(
            agent.table().row("s").unwrap().get(ActionCategory::Reveal),
            3.0
        );
    }

    #[test]
    fn test_update_materializes_successor_row() {
        let mut agent = QLearningAgent::new(AgentConfig::default());
        agent.update("s", ActionCategory::Skip, -1.0, "t");
        assert!(agent.table().row("t").is_some());
    }

    #[test]
    fn test_greedy_choice_prefers_higher_value() {
        let mut agent = QLearningAgent::new(AgentConfig::new().with_epsilon(0.0));
        agent
            .table
            .row_mut("s")
            .set(ActionCategory::Capture, 5.0);
        let mut rng = GameRng::new(0);

        let available = [ActionCategory::Reveal, ActionCategory::Capture];
        for _ in 0..20 {
            assert_eq!(
                agent.choose_category("s", &available, &mut rng),
                ActionCategory::Capture
            );
        }
    }

    #[test]
    fn test_greedy_choice_ignores_unavailable_maximum() {
        let mut agent = QLearningAgent::new(AgentConfig::new().with_epsilon(0.0));
        agent.table.row_mut("s").set(ActionCategory::Move, 9.0);
        agent.table.row_mut("s").set(ActionCategory::Reveal, 1.0);
        let mut rng = GameRng::new(0);

        // Move is not available, so the best available category wins.
        let available = [ActionCategory::Reveal, ActionCategory::Skip];
        assert_eq!(
            agent.choose_category("s", &available, &mut rng),
            ActionCategory::Reveal
        );
    }

    #[test]
    fn test_tie_break_reaches_every_tied_category() {
        let mut agent = QLearningAgent::new(AgentConfig::new().with_epsilon(0.0));
        let mut rng = GameRng::new(42);
        let available = [ActionCategory::Reveal, ActionCategory::Move, ActionCategory::Capture];

        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(agent.choose_category("s", &available, &mut rng));
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_sole_category_needs_no_rng_draw() {
        let mut agent = QLearningAgent::new(AgentConfig::default());
        let mut rng = GameRng::new(0);
        assert_eq!(
            agent.choose_category("s", &[ActionCategory::Skip], &mut rng),
            ActionCategory::Skip
        );
        // No row is created for a forced choice.
        assert!(agent.table().row("s").is_none());
    }

    #[test]
    fn test_instantiate_skip() {
        let board = BoardState::empty(5);
        let mut rng = GameRng::new(0);
        assert_eq!(
            instantiate(&board, Player::Blue, ActionCategory::Skip, &mut rng),
            Some(GameAction::Skip)
        );
    }

    #[test]
    fn test_instantiate_only_proposes_legal_instances() {
        let mut board = BoardState::empty(5);
        let mut piece = Piece::new(Rank::Knight, Player::Blue);
        piece.visibility = Visibility::Revealed;
        board.set_piece(Pos::new(2, 2), Some(piece));
        let mut enemy = Piece::new(Rank::Archer, Player::Red);
        enemy.visibility = Visibility::Revealed;
        board.set_piece(Pos::new(2, 3), Some(enemy));

        let mut rng = GameRng::new(1);
        for _ in 0..50 {
            match instantiate(&board, Player::Blue, ActionCategory::Capture, &mut rng) {
                Some(GameAction::Capture { from, to }) => {
                    assert_eq!(from, Pos::new(2, 2));
                    assert_eq!(to, Pos::new(2, 3));
                }
                other => panic!("unexpected instantiation: {other:?}"),
            }
        }
    }

    #[test]
    fn test_instantiate_empty_category_is_none() {
        let board = BoardState::empty(5);
        let mut rng = GameRng::new(0);
        assert_eq!(
            instantiate(&board, Player::Blue, ActionCategory::Reveal, &mut rng),
            None
        );
    }
}
