//! The self-play training loop.
//!
//! Runs many episodes over one shared pair of agents so learning pools
//! across sequential games. Each episode gets a forked RNG stream, so a
//! run is reproducible from its seed regardless of episode outcomes.

use std::sync::atomic::AtomicBool;

use serde::{Deserialize, Serialize};

use crate::agent::policy::{AgentConfig, QLearningAgent};
use crate::core::config::GameConfig;
use crate::core::player::Player;
use crate::core::rng::GameRng;
use crate::error::ConfigError;
use crate::rules::engine::GameResult;

use super::episode::{play_episode, EpisodeEnd};

/// Configuration for a training run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelfPlayConfig {
    /// Number of episodes to play.
    pub episodes: usize,

    /// Master seed; every episode forks its own stream from it.
    pub seed: u64,

    /// Game rules shared by all episodes.
    pub game: GameConfig,

    /// Hyperparameters applied to both agents.
    pub agent: AgentConfig,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            episodes: 1000,
            seed: 0,
            game: GameConfig::default(),
            agent: AgentConfig::default(),
        }
    }
}

impl SelfPlayConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_episodes(mut self, episodes: usize) -> Self {
        self.episodes = episodes;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    #[must_use]
    pub fn with_agent(mut self, agent: AgentConfig) -> Self {
        self.agent = agent;
        self
    }
}

/// Aggregate results of a training run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrainingSummary {
    /// Episodes that ran to completion.
    pub episodes: usize,
    /// Wins per player, indexed by `Player::index()`.
    pub wins: [usize; 2],
    pub draws: usize,
    total_turns: u64,
}

impl TrainingSummary {
    fn record(&mut self, result: GameResult, turns: u32) {
        self.episodes += 1;
        self.total_turns += u64::from(turns);
        match result {
            GameResult::Winner(player) => self.wins[player.index()] += 1,
            GameResult::Draw => self.draws += 1,
        }
    }

    /// Mean turns per completed episode.
    #[must_use]
    pub fn mean_turns(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.total_turns as f64 / self.episodes as f64
        }
    }
}

impl std::fmt::Display for TrainingSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} episodes: {} {} wins, {} {} wins, {} draws, {:.1} mean turns",
            self.episodes,
            Player::Blue,
            self.wins[Player::Blue.index()],
            Player::Red,
            self.wins[Player::Red.index()],
            self.draws,
            self.mean_turns()
        )
    }
}

/// Drives a pair of agents through many self-play episodes.
pub struct SelfPlayRunner {
    config: SelfPlayConfig,
    agents: [QLearningAgent; 2],
    rng: GameRng,
}

impl SelfPlayRunner {
    /// Fresh agents, fresh tables.
    #[must_use]
    pub fn new(config: SelfPlayConfig) -> Self {
        let agents = [
            QLearningAgent::new(config.agent),
            QLearningAgent::new(config.agent),
        ];
        Self::with_agents(config, agents)
    }

    /// Resume with pre-populated agents (loaded tables).
    #[must_use]
    pub fn with_agents(config: SelfPlayConfig, agents: [QLearningAgent; 2]) -> Self {
        let rng = GameRng::new(config.seed);
        Self {
            config,
            agents,
            rng,
        }
    }

    /// Run the configured number of episodes, or until `stop` is raised.
    ///
    /// The flag is checked between turns, so at most one turn completes
    /// after it is set; an interrupted episode is not counted.
    pub fn run(&mut self, stop: &AtomicBool) -> Result<TrainingSummary, ConfigError> {
        let mut summary = TrainingSummary::default();
        for _ in 0..self.config.episodes {
            let mut episode_rng = self.rng.fork();
            let outcome =
                play_episode(&self.config.game, &mut self.agents, &mut episode_rng, stop)?;
            match outcome.end {
                EpisodeEnd::Finished(result) => summary.record(result, outcome.turns),
                EpisodeEnd::Stopped => break,
            }
        }
        Ok(summary)
    }

    #[must_use]
    pub fn agents(&self) -> &[QLearningAgent; 2] {
        &self.agents
    }

    /// Take the agents out of the runner (to persist their tables).
    #[must_use]
    pub fn into_agents(self) -> [QLearningAgent; 2] {
        self.agents
    }
}
