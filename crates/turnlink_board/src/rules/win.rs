//! Win detection for square boards.

use crate::{Cell, Grid, Role};
use tracing::instrument;

/// Every winning line on the board: each row, each column and both diagonals.
fn lines(size: u8) -> impl Iterator<Item = Vec<(u8, u8)>> {
    let rows = (0..size).map(move |r| (0..size).map(|c| (r, c)).collect::<Vec<_>>());
    let cols = (0..size).map(move |c| (0..size).map(|r| (r, c)).collect::<Vec<_>>());
    let diagonals = [
        (0..size).map(|i| (i, i)).collect::<Vec<_>>(),
        (0..size).map(|i| (i, size - 1 - i)).collect::<Vec<_>>(),
    ];
    rows.chain(cols).chain(diagonals)
}

/// Returns true if `role` holds a complete row, column or diagonal.
#[instrument(skip(grid))]
pub fn has_won(grid: &Grid, role: Role) -> bool {
    lines(grid.size()).any(|line| {
        line.iter()
            .all(|&(r, c)| grid.get(r, c) == Some(Cell::Marked(role)))
    })
}

/// Returns the role holding a complete line, if any.
#[instrument(skip(grid))]
pub fn check_winner(grid: &Grid) -> Option<Role> {
    [Role::FirstMark, Role::SecondMark]
        .into_iter()
        .find(|role| has_won(grid, *role))
}
