//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Grid`](crate::Grid). Rules are kept apart from
//! board storage so the turn coordinator can ask about wins and draws
//! without owning any rule logic itself.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{check_winner, has_won};
