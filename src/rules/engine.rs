//! The rule engine: legality, action application, and termination.
//!
//! All functions are stateless over a `BoardState`. The `apply_*` family
//! either completes an action and ends the turn, or returns
//! `IllegalAction` leaving the board exactly as it was — there is no
//! partial mutation.

use smallvec::SmallVec;

use crate::core::config::GameConfig;
use crate::core::piece::{Rank, Visibility};
use crate::core::player::Player;
use crate::core::position::Pos;
use crate::core::state::BoardState;
use crate::error::IllegalAction;
use crate::rules::capture::can_capture;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    Winner(Player),
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: Player) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// What a legal move did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Relocated to an empty cell.
    Moved,
    /// Captured the defending piece of this rank.
    Captured(Rank),
}

/// True iff the cell holds a hidden piece owned by the player to move.
#[must_use]
pub fn reveal_legal(board: &BoardState, pos: Pos) -> bool {
    board
        .piece_at(pos)
        .is_some_and(|piece| piece.owner == board.current_player() && piece.is_hidden())
}

/// Legal destinations for the revealed piece at `from`.
///
/// One orthogonal step to an empty cell, or onto an opposing *revealed*
/// piece the mover's rank can capture. Hidden pieces block: they can be
/// neither entered nor captured. Returns empty if `from` does not hold a
/// revealed piece.
#[must_use]
pub fn move_targets(board: &BoardState, from: Pos) -> SmallVec<[Pos; 4]> {
    let Some(piece) = board.piece_at(from) else {
        return SmallVec::new();
    };
    if piece.is_hidden() {
        return SmallVec::new();
    }

    from.orthogonal_neighbors(board.size())
        .into_iter()
        .filter(|&to| match board.piece_at(to) {
            None => true,
            Some(target) => {
                target.owner != piece.owner
                    && target.is_revealed()
                    && can_capture(piece.rank, target.rank)
            }
        })
        .collect()
}

/// Reveal the mover's hidden piece at `pos` and end the turn.
pub fn apply_reveal(board: &mut BoardState, pos: Pos) -> Result<(), IllegalAction> {
    let mover = board.current_player();
    let piece = board
        .piece_at(pos)
        .ok_or(IllegalAction::NothingToReveal { pos })?;
    if piece.owner != mover {
        return Err(IllegalAction::NotOwnPiece { pos });
    }
    if piece.is_revealed() {
        return Err(IllegalAction::AlreadyRevealed { pos });
    }

    if let Some(piece) = board.piece_at_mut(pos) {
        piece.visibility = Visibility::Revealed;
    }
    board.clear_skip_streak(mover);
    board.end_turn();
    Ok(())
}

/// Move the mover's revealed piece from `from` to `to` and end the turn.
///
/// An occupied destination must hold an opposing revealed piece the mover
/// can capture; the defender is marked dead and moved to the graveyard
/// before the attacker takes its cell.
pub fn apply_move(board: &mut BoardState, from: Pos, to: Pos) -> Result<MoveOutcome, IllegalAction> {
    let mover = board.current_player();
    let piece = board
        .piece_at(from)
        .ok_or(IllegalAction::NoMovablePiece { from })?;
    if piece.owner != mover || piece.is_hidden() {
        return Err(IllegalAction::NoMovablePiece { from });
    }
    if !move_targets(board, from).contains(&to) {
        return Err(IllegalAction::IllegalTarget { from, to });
    }

    let outcome = match board.take_piece(to) {
        None => MoveOutcome::Moved,
        Some(mut defender) => {
            defender.alive = false;
            board.bury(defender);
            MoveOutcome::Captured(defender.rank)
        }
    };

    let attacker = board
        .take_piece(from)
        .ok_or(IllegalAction::NoMovablePiece { from })?;
    board.set_piece(to, Some(attacker));
    board.clear_skip_streak(mover);
    board.end_turn();
    Ok(outcome)
}

/// Consume the turn with a forced skip, growing the mover's streak.
///
/// Callers only reach this when `has_any_action` is false for the mover.
pub fn apply_skip(board: &mut BoardState) {
    let mover = board.current_player();
    debug_assert!(
        !has_any_action(board, mover),
        "skip applied while {mover} still has a legal action"
    );
    board.record_skip(mover);
    board.end_turn();
}

/// True iff the player can reveal or move anything this turn.
#[must_use]
pub fn has_any_action(board: &BoardState, player: Player) -> bool {
    board.player_pieces(player).any(|(pos, piece)| {
        piece.is_hidden() || !move_targets(board, pos).is_empty()
    })
}

/// Check the game for termination, in priority order:
///
/// 1. A King is dead — the opponent wins.
/// 2. A forced-skip streak has reached the forfeit limit — the skipping
///    player forfeits.
/// 3. Exactly two pieces remain — higher rank value wins, equal draws.
/// 4. The turn counter has passed the limit — draw.
///
/// Returns `None` while the game is ongoing.
#[must_use]
pub fn terminal(board: &BoardState, config: &GameConfig) -> Option<GameResult> {
    for player in Player::both() {
        if !board.king_alive(player) {
            return Some(GameResult::Winner(player.opponent()));
        }
    }

    for player in Player::both() {
        if board.skip_streak(player) >= config.forfeit_streak {
            return Some(GameResult::Winner(player.opponent()));
        }
    }

    if board.alive_count() == 2 {
        let mut pieces = board.pieces();
        let (_, a) = pieces.next()?;
        let (_, b) = pieces.next()?;
        return Some(match a.rank.value().cmp(&b.rank.value()) {
            std::cmp::Ordering::Greater => GameResult::Winner(a.owner),
            std::cmp::Ordering::Less => GameResult::Winner(b.owner),
            std::cmp::Ordering::Equal => GameResult::Draw,
        });
    }

    if board.turn_count() > config.max_turns {
        return Some(GameResult::Draw);
    }

    None
}
