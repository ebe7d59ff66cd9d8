//! The learning agent: state encoding, the value table, the epsilon-greedy
//! policy, and table persistence.

pub mod encoder;
pub mod persistence;
pub mod policy;
pub mod qtable;

pub use encoder::state_key;
pub use persistence::{load_table, save_table};
pub use policy::{instantiate, AgentConfig, QLearningAgent};
pub use qtable::{QRow, QTable};
