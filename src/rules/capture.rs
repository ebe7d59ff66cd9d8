//! The capture relation.
//!
//! Captures are governed by an explicit, non-transitive table, not by
//! comparing rank values. A rank beats itself and everything below it,
//! with one cycle at the top: the Farmer beats the King, and the King
//! beats everything except the Farmer.

use crate::core::piece::Rank;

/// `CAPTURES[attacker][defender]`, indexed by `Rank::index()`.
#[rustfmt::skip]
const CAPTURES: [[bool; 5]; 5] = [
    //             Farmer Soldier Archer Knight King
    /* Farmer  */ [true,  false,  false, false, true ],
    /* Soldier */ [true,  true,   false, false, false],
    /* Archer  */ [true,  true,   true,  false, false],
    /* Knight  */ [true,  true,   true,  true,  false],
    /* King    */ [false, true,   true,  true,  true ],
];

/// Whether `attacker` may capture `defender`.
#[must_use]
pub fn can_capture(attacker: Rank, defender: Rank) -> bool {
    CAPTURES[attacker.index()][defender.index()]
}
