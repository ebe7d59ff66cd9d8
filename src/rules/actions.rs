//! Action categories and the derived action space.
//!
//! The learning agent acts over four coarse categories; a chosen category
//! is then instantiated uniformly among its concrete legal instances. The
//! action space is a derived view: recomputed from the board every turn,
//! never cached.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::player::Player;
use crate::core::position::Pos;
use crate::core::state::BoardState;
use crate::rules::engine::move_targets;

/// The four action categories the agent learns over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionCategory {
    Reveal,
    Move,
    Capture,
    Skip,
}

impl ActionCategory {
    /// All categories, in value-table column order.
    pub const ALL: [ActionCategory; 4] = [
        ActionCategory::Reveal,
        ActionCategory::Move,
        ActionCategory::Capture,
        ActionCategory::Skip,
    ];

    /// Column index in a value-table row.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            ActionCategory::Reveal => 0,
            ActionCategory::Move => 1,
            ActionCategory::Capture => 2,
            ActionCategory::Skip => 3,
        }
    }

    /// Column name used in the persisted table header.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ActionCategory::Reveal => "reveal",
            ActionCategory::Move => "move",
            ActionCategory::Capture => "capture",
            ActionCategory::Skip => "skip",
        }
    }

    /// Parse a persisted column name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl std::fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A concrete action: a category instantiated with its cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameAction {
    Reveal(Pos),
    Move { from: Pos, to: Pos },
    Capture { from: Pos, to: Pos },
    Skip,
}

impl GameAction {
    /// The category this action instantiates.
    #[must_use]
    pub fn category(&self) -> ActionCategory {
        match self {
            GameAction::Reveal(_) => ActionCategory::Reveal,
            GameAction::Move { .. } => ActionCategory::Move,
            GameAction::Capture { .. } => ActionCategory::Capture,
            GameAction::Skip => ActionCategory::Skip,
        }
    }
}

/// The categories currently open to `player`.
///
/// Skip appears only as the sole member, exactly when the player has no
/// reveal, move, or capture anywhere.
#[must_use]
pub fn available_categories(board: &BoardState, player: Player) -> SmallVec<[ActionCategory; 4]> {
    let mut categories = SmallVec::new();

    if board
        .player_pieces(player)
        .any(|(_, piece)| piece.is_hidden())
    {
        categories.push(ActionCategory::Reveal);
    }

    let mut any_quiet = false;
    let mut any_capture = false;
    for (from, piece) in board.player_pieces(player) {
        if piece.is_hidden() {
            continue;
        }
        for to in move_targets(board, from) {
            if board.piece_at(to).is_some() {
                any_capture = true;
            } else {
                any_quiet = true;
            }
        }
        if any_quiet && any_capture {
            break;
        }
    }
    if any_quiet {
        categories.push(ActionCategory::Move);
    }
    if any_capture {
        categories.push(ActionCategory::Capture);
    }

    if categories.is_empty() {
        categories.push(ActionCategory::Skip);
    }
    categories
}

/// Every cell where `player` could reveal a piece.
#[must_use]
pub fn reveal_positions(board: &BoardState, player: Player) -> Vec<Pos> {
    board
        .player_pieces(player)
        .filter(|(_, piece)| piece.is_hidden())
        .map(|(pos, _)| pos)
        .collect()
}

/// Every non-capturing legal move for `player`.
#[must_use]
pub fn quiet_moves(board: &BoardState, player: Player) -> Vec<(Pos, Pos)> {
    moves_where(board, player, false)
}

/// Every legal capture for `player`.
#[must_use]
pub fn capture_moves(board: &BoardState, player: Player) -> Vec<(Pos, Pos)> {
    moves_where(board, player, true)
}

fn moves_where(board: &BoardState, player: Player, capturing: bool) -> Vec<(Pos, Pos)> {
    let mut moves = Vec::new();
    for (from, piece) in board.player_pieces(player) {
        if piece.is_hidden() {
            continue;
        }
        for to in move_targets(board, from) {
            if board.piece_at(to).is_some() == capturing {
                moves.push((from, to));
            }
        }
    }
    moves
}
