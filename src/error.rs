//! Error taxonomy.
//!
//! `IllegalAction` is the only error normal play can surface: the attempted
//! reveal or move violates the rules, the turn does not advance, and the
//! board is untouched. Persistence has its own error type; note that a
//! missing table file and a malformed table row are deliberately *not*
//! errors (empty table and skipped row, respectively).

use std::path::PathBuf;

use crate::core::position::Pos;

/// An attempted action that violates the rules.
///
/// Returned to the caller so a human driver can re-prompt. The automated
/// agent only ever proposes legal instances, so seeing one of these from
/// the self-play loop indicates a bug.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IllegalAction {
    #[error("no piece to reveal at {pos}")]
    NothingToReveal { pos: Pos },

    #[error("piece at {pos} belongs to the opponent")]
    NotOwnPiece { pos: Pos },

    #[error("piece at {pos} is already revealed")]
    AlreadyRevealed { pos: Pos },

    #[error("no revealed piece of the mover at {from}")]
    NoMovablePiece { from: Pos },

    #[error("{from} -> {to} is not a legal move target")]
    IllegalTarget { from: Pos, to: Pos },
}

/// Invalid game configuration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Validation(String),
}

/// Failure while saving or loading a value table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("failed to access table file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read table rows from {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
}
