//! Game configuration.
//!
//! Board geometry, the per-side rank multiset, and the termination limits
//! are configuration, not constants baked into the rules. The defaults
//! reproduce the standard setup: 5x5 board, the center cell left empty,
//! 12 pieces per side, forfeit after 5 consecutive forced skips, draw
//! past 100 turns.

use serde::{Deserialize, Serialize};

use crate::core::piece::Rank;
use crate::core::position::Pos;
use crate::error::ConfigError;

/// Full configuration for one game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board side length (the board is `board_size` x `board_size`).
    pub board_size: usize,

    /// Cell left empty at setup so the first mover has somewhere to go.
    pub reserved_cell: Option<Pos>,

    /// How many of each rank every side starts with.
    pub ranks_per_side: Vec<(Rank, usize)>,

    /// Turn count beyond which the game is drawn.
    pub max_turns: u32,

    /// Consecutive forced skips by one player that forfeit the game.
    pub forfeit_streak: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 5,
            reserved_cell: Some(Pos::new(2, 2)),
            ranks_per_side: vec![
                (Rank::Farmer, 4),
                (Rank::Soldier, 4),
                (Rank::Archer, 2),
                (Rank::Knight, 1),
                (Rank::King, 1),
            ],
            max_turns: 100,
            forfeit_streak: 5,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the board side length.
    #[must_use]
    pub fn with_board_size(mut self, size: usize) -> Self {
        self.board_size = size;
        self
    }

    /// Set (or clear) the reserved empty cell.
    #[must_use]
    pub fn with_reserved_cell(mut self, cell: Option<Pos>) -> Self {
        self.reserved_cell = cell;
        self
    }

    /// Replace the per-side rank multiset.
    #[must_use]
    pub fn with_ranks_per_side(mut self, ranks: Vec<(Rank, usize)>) -> Self {
        self.ranks_per_side = ranks;
        self
    }

    /// Set the draw turn limit.
    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Set the forfeiture skip streak.
    #[must_use]
    pub fn with_forfeit_streak(mut self, streak: u32) -> Self {
        self.forfeit_streak = streak;
        self
    }

    /// Total pieces each side starts with.
    #[must_use]
    pub fn pieces_per_side(&self) -> usize {
        self.ranks_per_side.iter().map(|(_, n)| n).sum()
    }

    /// Expand the multiset into one `Rank` per piece for a single side.
    #[must_use]
    pub fn side_ranks(&self) -> Vec<Rank> {
        let mut ranks = Vec::with_capacity(self.pieces_per_side());
        for &(rank, count) in &self.ranks_per_side {
            ranks.extend(std::iter::repeat(rank).take(count));
        }
        ranks
    }

    /// Check the configuration is playable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size < 2 {
            return Err(ConfigError::Validation(
                "board_size must be at least 2".into(),
            ));
        }
        if let Some(cell) = self.reserved_cell {
            if cell.row >= self.board_size || cell.col >= self.board_size {
                return Err(ConfigError::Validation(format!(
                    "reserved cell {cell} is outside the {0}x{0} board",
                    self.board_size
                )));
            }
        }
        let kings = self
            .ranks_per_side
            .iter()
            .filter(|(rank, _)| *rank == Rank::King)
            .map(|(_, n)| n)
            .sum::<usize>();
        if kings != 1 {
            return Err(ConfigError::Validation(format!(
                "each side must have exactly one King, got {kings}"
            )));
        }
        let cells = self.board_size * self.board_size - usize::from(self.reserved_cell.is_some());
        if 2 * self.pieces_per_side() > cells {
            return Err(ConfigError::Validation(format!(
                "{} pieces do not fit on {} free cells",
                2 * self.pieces_per_side(),
                cells
            )));
        }
        if self.forfeit_streak == 0 {
            return Err(ConfigError::Validation(
                "forfeit_streak must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
