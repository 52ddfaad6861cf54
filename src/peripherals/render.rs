//! Render collaborator trait and the colors the coordinator draws with.

use derive_getters::Getters;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use turnlink_board::Role;

/// Fire-and-forget drawing calls issued by the coordinator.
pub trait Renderer {
    /// Wipes everything, filling with `background`.
    fn clear_screen(&mut self, background: Color);

    /// Draws the empty grid lines.
    fn draw_grid(&mut self, color: Color);

    /// Draws `role`'s mark in cell `(row, col)`.
    fn draw_mark(&mut self, role: Role, row: u8, col: u8, color: Color);

    /// Replaces the status line.
    fn draw_message(&mut self, text: &str, foreground: Color, background: Color);
}

/// Colors used for each kind of render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Palette {
    /// Screen background.
    #[serde(default = "default_background")]
    background: Color,

    /// Grid lines.
    #[serde(default = "default_grid")]
    grid: Color,

    /// Placed marks.
    #[serde(default = "default_mark")]
    mark: Color,

    /// Status message text.
    #[serde(default = "default_message")]
    message: Color,
}

fn default_background() -> Color {
    Color::Black
}

fn default_grid() -> Color {
    Color::White
}

fn default_mark() -> Color {
    Color::Yellow
}

fn default_message() -> Color {
    Color::Cyan
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: default_background(),
            grid: default_grid(),
            mark: default_mark(),
            message: default_message(),
        }
    }
}
