//! Draw detection.

use super::win::check_winner;
use crate::{Cell, Grid};
use tracing::instrument;

/// Checks if every cell is marked.
#[instrument(skip(grid))]
pub fn is_full(grid: &Grid) -> bool {
    grid.cells().iter().all(|c| *c != Cell::Empty)
}

/// A full board with no winner.
#[instrument(skip(grid))]
pub fn is_draw(grid: &Grid) -> bool {
    is_full(grid) && check_winner(grid).is_none()
}
