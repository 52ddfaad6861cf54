//! Core domain types for the tic-tac-toe board.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Which of the two turn-taking marks a participant controls.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Role {
    /// The mark that moves first in every match (`X`).
    #[display("X")]
    FirstMark,
    /// The mark that moves second (`O`).
    #[display("O")]
    SecondMark,
}

impl Role {
    /// Returns the other role.
    pub fn opponent(self) -> Self {
        match self {
            Role::FirstMark => Role::SecondMark,
            Role::SecondMark => Role::FirstMark,
        }
    }
}

/// A single cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nobody has marked this cell.
    #[default]
    Empty,
    /// Cell holds a role's mark.
    Marked(Role),
}

/// Row and column counts of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{}x{}", rows, cols)]
pub struct BoardDims {
    /// Number of rows.
    pub rows: u8,
    /// Number of columns.
    pub cols: u8,
}

impl BoardDims {
    /// Creates dimensions for a board.
    pub fn new(rows: u8, cols: u8) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells.
    pub fn spaces(&self) -> usize {
        usize::from(self.rows) * usize::from(self.cols)
    }

    /// The centre cell (rounded towards the top-left on even sizes).
    pub fn center(&self) -> (u8, u8) {
        (self.rows / 2, self.cols / 2)
    }

    /// Returns true if `(row, col)` lies on the board.
    pub fn contains(&self, row: u8, col: u8) -> bool {
        row < self.rows && col < self.cols
    }
}

/// Errors raised by board mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    /// Coordinates fall outside the board.
    #[display("Cell ({}, {}) is outside the board", row, col)]
    OutOfRange {
        /// Requested row.
        row: u8,
        /// Requested column.
        col: u8,
    },

    /// The cell already holds a mark.
    #[display("Cell ({}, {}) is already occupied by {}", row, col, by)]
    Occupied {
        /// Requested row.
        row: u8,
        /// Requested column.
        col: u8,
        /// Role that holds the cell.
        by: Role,
    },

    /// Board size outside the supported range.
    #[display("Board size {} is not supported ({}..={})", _0, Grid::MIN_SIZE, Grid::MAX_SIZE)]
    UnsupportedSize(#[error(not(source))] u8),
}

/// Square tic-tac-toe board, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: u8,
    cells: Vec<Cell>,
}

impl Grid {
    /// Classic 3x3 board size.
    pub const STANDARD_SIZE: u8 = 3;
    /// Smallest supported side length.
    pub const MIN_SIZE: u8 = 3;
    /// Largest supported side length.
    pub const MAX_SIZE: u8 = 9;

    /// Creates an empty 3x3 board.
    #[instrument]
    pub fn new() -> Self {
        Self {
            size: Self::STANDARD_SIZE,
            cells: vec![Cell::Empty; usize::from(Self::STANDARD_SIZE).pow(2)],
        }
    }

    /// Creates an empty `size` x `size` board.
    #[instrument]
    pub fn with_size(size: u8) -> Result<Self, BoardError> {
        if !(Self::MIN_SIZE..=Self::MAX_SIZE).contains(&size) {
            return Err(BoardError::UnsupportedSize(size));
        }
        Ok(Self {
            size,
            cells: vec![Cell::Empty; usize::from(size).pow(2)],
        })
    }

    /// Side length of the board.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Board dimensions.
    pub fn dims(&self) -> BoardDims {
        BoardDims::new(self.size, self.size)
    }

    fn index(&self, row: u8, col: u8) -> Option<usize> {
        self.dims()
            .contains(row, col)
            .then(|| usize::from(row) * usize::from(self.size) + usize::from(col))
    }

    /// Gets the cell at `(row, col)`, or `None` when off the board.
    pub fn get(&self, row: u8, col: u8) -> Option<Cell> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Returns true if `(row, col)` is on the board and unmarked.
    pub fn is_empty(&self, row: u8, col: u8) -> bool {
        matches!(self.get(row, col), Some(Cell::Empty))
    }

    /// Places `role`'s mark at `(row, col)`.
    #[instrument(skip(self))]
    pub fn place(&mut self, row: u8, col: u8, role: Role) -> Result<(), BoardError> {
        let index = self
            .index(row, col)
            .ok_or(BoardError::OutOfRange { row, col })?;
        match self.cells[index] {
            Cell::Empty => {
                self.cells[index] = Cell::Marked(role);
                Ok(())
            }
            Cell::Marked(by) => Err(BoardError::Occupied { row, col, by }),
        }
    }

    /// Removes every mark.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Number of marked cells.
    pub fn mark_count(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::Empty).count()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (r, row) in self.cells.chunks(usize::from(self.size)).enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            let line = row
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => ".".to_string(),
                    Cell::Marked(role) => role.to_string(),
                })
                .collect::<Vec<_>>()
                .join("|");
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}
