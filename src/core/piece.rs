//! Pieces: ranks, visibility, and the per-piece record.
//!
//! Every piece starts Hidden and alive. The rule engine is the only code
//! that flips visibility (on reveal) or clears `alive` (on capture). A
//! captured piece is marked dead and taken off its cell, never dropped
//! from the game record.

use serde::{Deserialize, Serialize};

use super::player::Player;

/// Fixed piece ranks, in ascending value order.
///
/// Rank values feed two places: the capture reward and the two-piece
/// endgame comparison. They are not the capture relation — captures go
/// through [`crate::rules::can_capture`], which is non-transitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Farmer,
    Soldier,
    Archer,
    Knight,
    King,
}

impl Rank {
    /// All ranks, lowest value first.
    pub const ALL: [Rank; 5] = [
        Rank::Farmer,
        Rank::Soldier,
        Rank::Archer,
        Rank::Knight,
        Rank::King,
    ];

    /// Fixed value: Farmer 1, Soldier 2, Archer 3, Knight 4, King 20.
    #[must_use]
    pub const fn value(self) -> i32 {
        match self {
            Rank::Farmer => 1,
            Rank::Soldier => 2,
            Rank::Archer => 3,
            Rank::Knight => 4,
            Rank::King => 20,
        }
    }

    /// Index into rank-keyed tables, following `ALL` order.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Rank::Farmer => 0,
            Rank::Soldier => 1,
            Rank::Archer => 2,
            Rank::Knight => 3,
            Rank::King => 4,
        }
    }

    /// One-letter code used by the state encoder and board rendering.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Rank::Farmer => 'F',
            Rank::Soldier => 'S',
            Rank::Archer => 'A',
            Rank::Knight => 'N',
            Rank::King => 'K',
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Rank::Farmer => "Farmer",
            Rank::Soldier => "Soldier",
            Rank::Archer => "Archer",
            Rank::Knight => "Knight",
            Rank::King => "King",
        };
        write!(f, "{name}")
    }
}

/// Whether a piece's rank is public knowledge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    Hidden,
    Revealed,
}

/// A single piece on (or captured off) the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub rank: Rank,
    pub owner: Player,
    pub visibility: Visibility,
    pub alive: bool,
}

impl Piece {
    /// A freshly placed piece: hidden and alive.
    #[must_use]
    pub const fn new(rank: Rank, owner: Player) -> Self {
        Self {
            rank,
            owner,
            visibility: Visibility::Hidden,
            alive: true,
        }
    }

    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        matches!(self.visibility, Visibility::Hidden)
    }

    #[must_use]
    pub const fn is_revealed(&self) -> bool {
        matches!(self.visibility, Visibility::Revealed)
    }
}
