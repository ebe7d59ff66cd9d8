//! Canonical state keys for value-table lookups.
//!
//! The key is a fixed row-major traversal of the board: each cell
//! contributes its rank, visibility, and owner (or a single `.` when
//! empty), with `/` between rows. Piece-for-piece identical boards
//! always produce identical keys, so the key alone is the lookup
//! identity — no separate hashing or equality logic exists anywhere
//! else.

use crate::core::piece::Visibility;
use crate::core::player::Player;
use crate::core::position::Pos;
use crate::core::state::BoardState;

/// Encode a board into its canonical table key.
#[must_use]
pub fn state_key(board: &BoardState) -> String {
    let size = board.size();
    // 3 chars per occupied cell plus row separators.
    let mut key = String::with_capacity(size * (size * 3 + 1));
    for row in 0..size {
        if row > 0 {
            key.push('/');
        }
        for col in 0..size {
            match board.piece_at(Pos::new(row, col)) {
                None => key.push('.'),
                Some(piece) => {
                    key.push(piece.rank.code());
                    key.push(match piece.visibility {
                        Visibility::Hidden => 'h',
                        Visibility::Revealed => 'r',
                    });
                    key.push(match piece.owner {
                        Player::Blue => 'b',
                        Player::Red => 'r',
                    });
                }
            }
        }
    }
    key
}
