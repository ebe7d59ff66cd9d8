//! Board coordinates.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A cell on the board, row-major from the top-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Orthogonally adjacent cells that stay on a `size` x `size` board.
    ///
    /// Diagonals are never neighbors; pieces move exactly one step.
    #[must_use]
    pub fn orthogonal_neighbors(self, size: usize) -> SmallVec<[Pos; 4]> {
        let mut neighbors = SmallVec::new();
        if self.row > 0 {
            neighbors.push(Pos::new(self.row - 1, self.col));
        }
        if self.row + 1 < size {
            neighbors.push(Pos::new(self.row + 1, self.col));
        }
        if self.col > 0 {
            neighbors.push(Pos::new(self.row, self.col - 1));
        }
        if self.col + 1 < size {
            neighbors.push(Pos::new(self.row, self.col + 1));
        }
        neighbors
    }

    /// Manhattan distance to another cell.
    #[must_use]
    pub fn manhattan(self, other: Pos) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_has_two_neighbors() {
        let neighbors = Pos::new(0, 0).orthogonal_neighbors(5);
        assert_eq!(neighbors.len(), 2);
        assert!(neighbors.contains(&Pos::new(1, 0)));
        assert!(neighbors.contains(&Pos::new(0, 1)));
    }

    #[test]
    fn test_edge_has_three_neighbors() {
        let neighbors = Pos::new(0, 2).orthogonal_neighbors(5);
        assert_eq!(neighbors.len(), 3);
    }

    #[test]
    fn test_center_has_four_neighbors() {
        let neighbors = Pos::new(2, 2).orthogonal_neighbors(5);
        assert_eq!(neighbors.len(), 4);
        for n in &neighbors {
            assert_eq!(n.manhattan(Pos::new(2, 2)), 1);
        }
    }

    #[test]
    fn test_no_diagonal_neighbors() {
        let neighbors = Pos::new(2, 2).orthogonal_neighbors(5);
        assert!(!neighbors.contains(&Pos::new(1, 1)));
        assert!(!neighbors.contains(&Pos::new(3, 3)));
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(Pos::new(0, 0).manhattan(Pos::new(2, 3)), 5);
        assert_eq!(Pos::new(4, 1).manhattan(Pos::new(4, 1)), 0);
    }
}
