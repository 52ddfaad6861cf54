//! Board collaborator trait and its implementation for [`Grid`].

use turnlink_board::{BoardDims, Grid, Role, rules};
use tracing::debug;

/// Cell storage plus win/draw queries, as seen by the coordinator.
pub trait Board {
    /// Removes every mark.
    fn clear(&mut self);

    /// Places `role` at `(row, col)`. Returns false if the cell is occupied
    /// or off the board.
    fn set(&mut self, row: u8, col: u8, role: Role) -> bool;

    /// Returns true if `role` has a winning line.
    fn winner(&self, role: Role) -> bool;

    /// Number of marked cells.
    fn mark_count(&self) -> usize;

    /// Board dimensions.
    fn dims(&self) -> BoardDims;
}

impl Board for Grid {
    fn clear(&mut self) {
        Grid::clear(self);
    }

    fn set(&mut self, row: u8, col: u8, role: Role) -> bool {
        match self.place(row, col, role) {
            Ok(()) => true,
            Err(e) => {
                debug!(error = %e, "Placement rejected");
                false
            }
        }
    }

    fn winner(&self, role: Role) -> bool {
        rules::has_won(self, role)
    }

    fn mark_count(&self) -> usize {
        Grid::mark_count(self)
    }

    fn dims(&self) -> BoardDims {
        Grid::dims(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_reports_rejection() {
        let mut grid = Grid::new();
        assert!(Board::set(&mut grid, 1, 1, Role::FirstMark));
        assert!(!Board::set(&mut grid, 1, 1, Role::SecondMark));
        assert!(!Board::set(&mut grid, 5, 1, Role::SecondMark));
        assert_eq!(Board::mark_count(&grid), 1);
    }

    #[test]
    fn test_winner_delegates_to_rules() {
        let mut grid = Grid::new();
        for r in 0..3 {
            Board::set(&mut grid, r, 0, Role::SecondMark);
        }
        assert!(Board::winner(&grid, Role::SecondMark));
        assert!(!Board::winner(&grid, Role::FirstMark));
    }
}
