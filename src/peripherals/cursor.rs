//! Cursor location on the board.

use turnlink_board::BoardDims;

/// Where the next local mark will be placed.
pub trait Cursor {
    /// Moves the cursor to `(row, col)`.
    fn set_location(&mut self, row: u8, col: u8);

    /// Current `(row, col)`.
    fn location(&self) -> (u8, u8);
}

/// A single step of cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards the last row.
    Down,
    /// Towards column 0.
    Left,
    /// Towards the last column.
    Right,
}

/// Cursor clamped to the board, starting at the centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigator {
    dims: BoardDims,
    row: u8,
    col: u8,
}

impl Navigator {
    /// Creates a cursor at the centre of `dims`.
    pub fn new(dims: BoardDims) -> Self {
        let (row, col) = dims.center();
        Self { dims, row, col }
    }

    /// Moves one cell in `direction`; stops at the edges.
    pub fn step(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.row = self.row.saturating_sub(1),
            Direction::Down => self.row = (self.row + 1).min(self.dims.rows - 1),
            Direction::Left => self.col = self.col.saturating_sub(1),
            Direction::Right => self.col = (self.col + 1).min(self.dims.cols - 1),
        }
    }
}

impl Cursor for Navigator {
    fn set_location(&mut self, row: u8, col: u8) {
        self.row = row.min(self.dims.rows - 1);
        self.col = col.min(self.dims.cols - 1);
    }

    fn location(&self) -> (u8, u8) {
        (self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_center() {
        let nav = Navigator::new(BoardDims::new(3, 3));
        assert_eq!(nav.location(), (1, 1));
    }

    #[test]
    fn test_step_stops_at_edges() {
        let mut nav = Navigator::new(BoardDims::new(3, 3));
        nav.step(Direction::Up);
        nav.step(Direction::Up);
        assert_eq!(nav.location(), (0, 1));
        nav.step(Direction::Right);
        nav.step(Direction::Right);
        assert_eq!(nav.location(), (0, 2));
        nav.step(Direction::Down);
        nav.step(Direction::Left);
        assert_eq!(nav.location(), (1, 1));
    }

    #[test]
    fn test_set_location_clamps() {
        let mut nav = Navigator::new(BoardDims::new(3, 3));
        nav.set_location(9, 0);
        assert_eq!(nav.location(), (2, 0));
    }
}
