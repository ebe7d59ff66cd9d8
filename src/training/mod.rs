//! Self-play training: single episodes and the multi-episode runner.

pub mod episode;
pub mod self_play;

pub use episode::{
    apply_action, play_episode, EpisodeEnd, EpisodeOutcome, ILLEGAL_REWARD, QUIET_MOVE_REWARD,
    REVEAL_REWARD, SKIP_REWARD,
};
pub use self_play::{SelfPlayConfig, SelfPlayRunner, TrainingSummary};
