//! Player identity for the two-sided game.
//!
//! Royal Chess is strictly two-player: Blue moves first in self-play,
//! and every per-player table in the crate is indexed by `Player::index()`.

use serde::{Deserialize, Serialize};

/// One of the two sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Blue,
    Red,
}

impl Player {
    /// The opposing side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Player::Blue => Player::Red,
            Player::Red => Player::Blue,
        }
    }

    /// 0-based index for per-player arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Player::Blue => 0,
            Player::Red => 1,
        }
    }

    /// Both players, Blue first.
    #[must_use]
    pub const fn both() -> [Player; 2] {
        [Player::Blue, Player::Red]
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Blue => write!(f, "Blue"),
            Player::Red => write!(f, "Red"),
        }
    }
}
