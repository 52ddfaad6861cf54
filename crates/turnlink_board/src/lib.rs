//! Pure tic-tac-toe board logic for turnlink.
//!
//! Storage ([`Grid`]) and rules ([`rules`]) know nothing about networking
//! or turn order; the turn coordinator drives them through its `Board`
//! collaborator trait.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod rules;
mod types;

pub use types::{BoardDims, BoardError, Cell, Grid, Role};
