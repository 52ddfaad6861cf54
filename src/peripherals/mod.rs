//! Collaborator seams the turn coordinator drives.
//!
//! The coordinator owns none of these concerns: it reads input levels,
//! mutates and queries the board, moves the cursor and issues render
//! calls, all through the traits defined here.

mod board;
mod cursor;
mod input;
mod render;

pub use board::Board;
pub use cursor::{Cursor, Direction, Navigator};
pub use input::{Buttons, InputSource};
pub use render::{Palette, Renderer};
