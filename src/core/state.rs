//! Board state: the single mutable source of truth for a game.
//!
//! `BoardState` owns the grid, the player to move, the turn counter, and
//! the per-player forced-skip streaks. The rule engine is the only code
//! that mutates it during play; drivers read it through the accessors and
//! clone it when they need an independent snapshot (a clone shares nothing
//! with the original).
//!
//! Cells only ever hold living pieces: a capture marks the defender dead
//! and moves it to the graveyard in the same step, on every code path.

use serde::{Deserialize, Serialize};

use crate::core::config::GameConfig;
use crate::core::piece::{Piece, Rank};
use crate::core::player::Player;
use crate::core::position::Pos;
use crate::core::rng::GameRng;
use crate::error::ConfigError;

/// The full game position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardState {
    size: usize,
    cells: Vec<Option<Piece>>,
    current_player: Player,
    turn_count: u32,
    skip_streaks: [u32; 2],
    graveyard: Vec<Piece>,
}

impl BoardState {
    /// An empty board with Blue to move.
    ///
    /// Used by drivers and tests that place pieces by hand; `setup` is the
    /// normal entry point.
    #[must_use]
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
            current_player: Player::Blue,
            turn_count: 0,
            skip_streaks: [0, 0],
            graveyard: Vec::new(),
        }
    }

    /// Randomly place both sides' pieces face down, leaving the reserved
    /// cell empty. Blue moves first.
    pub fn setup(config: &GameConfig, rng: &mut GameRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut pieces: Vec<Piece> = Vec::with_capacity(2 * config.pieces_per_side());
        for player in Player::both() {
            for rank in config.side_ranks() {
                pieces.push(Piece::new(rank, player));
            }
        }
        rng.shuffle(&mut pieces);

        let mut positions: Vec<Pos> = (0..config.board_size)
            .flat_map(|row| (0..config.board_size).map(move |col| Pos::new(row, col)))
            .filter(|pos| config.reserved_cell != Some(*pos))
            .collect();
        rng.shuffle(&mut positions);

        let mut board = Self::empty(config.board_size);
        for (piece, pos) in pieces.into_iter().zip(positions) {
            board.set_piece(pos, Some(piece));
        }
        Ok(board)
    }

    /// Board side length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    fn index(&self, pos: Pos) -> usize {
        pos.row * self.size + pos.col
    }

    /// The piece at a cell, if any. Out-of-bounds reads are `None`.
    #[must_use]
    pub fn piece_at(&self, pos: Pos) -> Option<&Piece> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.cells[self.index(pos)].as_ref()
    }

    pub(crate) fn piece_at_mut(&mut self, pos: Pos) -> Option<&mut Piece> {
        if !self.in_bounds(pos) {
            return None;
        }
        let idx = self.index(pos);
        self.cells[idx].as_mut()
    }

    /// Put a piece on (or clear) a cell. Out-of-bounds writes are ignored.
    pub fn set_piece(&mut self, pos: Pos, piece: Option<Piece>) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.cells[idx] = piece;
    }

    /// Remove a cell's piece, returning it.
    pub(crate) fn take_piece(&mut self, pos: Pos) -> Option<Piece> {
        if !self.in_bounds(pos) {
            return None;
        }
        let idx = self.index(pos);
        self.cells[idx].take()
    }

    /// Record a captured piece. The piece must already be marked dead.
    pub(crate) fn bury(&mut self, piece: Piece) {
        debug_assert!(!piece.alive, "buried piece must be marked dead");
        self.graveyard.push(piece);
    }

    /// Pieces captured so far, in capture order.
    #[must_use]
    pub fn graveyard(&self) -> &[Piece] {
        &self.graveyard
    }

    /// The player to move.
    #[must_use]
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Override the player to move (drivers randomizing who starts).
    pub fn set_current_player(&mut self, player: Player) {
        self.current_player = player;
    }

    /// Completed turns so far.
    #[must_use]
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    /// Override the turn counter (restoring a session).
    pub fn set_turn_count(&mut self, turns: u32) {
        self.turn_count = turns;
    }

    /// A player's current consecutive forced-skip streak.
    #[must_use]
    pub fn skip_streak(&self, player: Player) -> u32 {
        self.skip_streaks[player.index()]
    }

    pub(crate) fn record_skip(&mut self, player: Player) {
        self.skip_streaks[player.index()] += 1;
    }

    pub(crate) fn clear_skip_streak(&mut self, player: Player) {
        self.skip_streaks[player.index()] = 0;
    }

    /// Close out the current turn: hand the move to the opponent and bump
    /// the turn counter. Called by the rule engine after every action,
    /// forced skips included.
    pub(crate) fn end_turn(&mut self) {
        self.current_player = self.current_player.opponent();
        self.turn_count += 1;
    }

    /// All occupied cells, row-major.
    pub fn pieces(&self) -> impl Iterator<Item = (Pos, &Piece)> {
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.as_ref()
                .map(|piece| (Pos::new(i / self.size, i % self.size), piece))
        })
    }

    /// Occupied cells belonging to one player.
    pub fn player_pieces(&self, player: Player) -> impl Iterator<Item = (Pos, &Piece)> {
        self.pieces().filter(move |(_, piece)| piece.owner == player)
    }

    /// Number of living pieces on the board.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.pieces().count()
    }

    /// Whether a player's King is still alive.
    #[must_use]
    pub fn king_alive(&self, player: Player) -> bool {
        self.player_pieces(player)
            .any(|(_, piece)| piece.rank == Rank::King && piece.alive)
    }
}
