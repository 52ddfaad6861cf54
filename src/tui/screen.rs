//! Retained screen model fed by the coordinator's render calls.

use crate::peripherals::Renderer;
use ratatui::style::Color;
use tracing::{instrument, trace};
use turnlink_board::{BoardDims, Role};

/// A mark as it was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawnMark {
    /// Whose mark.
    pub role: Role,
    /// Color it was drawn in.
    pub color: Color,
}

/// The status line as it was drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    /// Message text.
    pub text: String,
    /// Text color.
    pub foreground: Color,
    /// Fill color.
    pub background: Color,
}

/// What the terminal should currently show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    dims: BoardDims,
    background: Color,
    grid: Option<Color>,
    marks: Vec<Option<DrawnMark>>,
    status: Option<StatusLine>,
}

impl Screen {
    /// Creates a blank screen for a board of `dims`.
    pub fn new(dims: BoardDims) -> Self {
        Self {
            dims,
            background: Color::Reset,
            grid: None,
            marks: vec![None; dims.spaces()],
            status: None,
        }
    }

    /// Board dimensions the screen lays out.
    pub fn dims(&self) -> BoardDims {
        self.dims
    }

    /// Current background fill.
    pub fn background(&self) -> Color {
        self.background
    }

    /// Grid line color, once drawn.
    pub fn grid(&self) -> Option<Color> {
        self.grid
    }

    /// Mark drawn at `(row, col)`, if any.
    pub fn mark_at(&self, row: u8, col: u8) -> Option<DrawnMark> {
        if !self.dims.contains(row, col) {
            return None;
        }
        self.marks[self.index(row, col)]
    }

    /// Current status line.
    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    fn index(&self, row: u8, col: u8) -> usize {
        usize::from(row) * usize::from(self.dims.cols) + usize::from(col)
    }
}

/// Renderer that paints into a [`Screen`] for the terminal front end.
#[derive(Debug, Clone)]
pub struct TerminalRenderer {
    screen: Screen,
}

impl TerminalRenderer {
    /// Creates a renderer for a board of `dims`.
    pub fn new(dims: BoardDims) -> Self {
        Self {
            screen: Screen::new(dims),
        }
    }

    /// The screen to paint.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }
}

impl Renderer for TerminalRenderer {
    #[instrument(level = "trace", skip(self))]
    fn clear_screen(&mut self, background: Color) {
        let dims = self.screen.dims;
        self.screen = Screen {
            background,
            ..Screen::new(dims)
        };
    }

    fn draw_grid(&mut self, color: Color) {
        self.screen.grid = Some(color);
    }

    fn draw_mark(&mut self, role: Role, row: u8, col: u8, color: Color) {
        if !self.screen.dims.contains(row, col) {
            trace!(row, col, "Mark off screen");
            return;
        }
        let index = self.screen.index(row, col);
        self.screen.marks[index] = Some(DrawnMark { role, color });
    }

    fn draw_message(&mut self, text: &str, foreground: Color, background: Color) {
        self.screen.status = Some(StatusLine {
            text: text.to_string(),
            foreground,
            background,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_wipes_marks_and_status() {
        let mut renderer = TerminalRenderer::new(BoardDims::new(3, 3));
        renderer.draw_grid(Color::White);
        renderer.draw_mark(Role::FirstMark, 1, 1, Color::Yellow);
        renderer.draw_message("hi", Color::Cyan, Color::Black);

        renderer.clear_screen(Color::Blue);

        let screen = renderer.screen();
        assert_eq!(screen.background(), Color::Blue);
        assert_eq!(screen.grid(), None);
        assert_eq!(screen.mark_at(1, 1), None);
        assert!(screen.status().is_none());
    }

    #[test]
    fn test_mark_recorded_at_cell() {
        let mut renderer = TerminalRenderer::new(BoardDims::new(3, 3));
        renderer.draw_mark(Role::SecondMark, 0, 2, Color::Red);
        assert_eq!(
            renderer.screen().mark_at(0, 2),
            Some(DrawnMark {
                role: Role::SecondMark,
                color: Color::Red
            })
        );
        assert_eq!(renderer.screen().mark_at(2, 0), None);
    }

    #[test]
    fn test_off_board_mark_is_dropped() {
        let mut renderer = TerminalRenderer::new(BoardDims::new(3, 3));
        renderer.draw_mark(Role::FirstMark, 5, 5, Color::Red);
        assert_eq!(renderer.screen().mark_at(5, 5), None);
    }

    #[test]
    fn test_message_replaces_previous() {
        let mut renderer = TerminalRenderer::new(BoardDims::new(3, 3));
        renderer.draw_message("first", Color::Cyan, Color::Black);
        renderer.draw_message("second", Color::Cyan, Color::Black);
        assert_eq!(renderer.screen().status().map(|s| s.text.as_str()), Some("second"));
    }
}
