//! Stateless rendering of the screen model.

use super::screen::Screen;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const CELL_WIDTH: usize = 3;

/// Facts about the session shown in the header.
#[derive(Debug, Clone, Copy)]
pub struct Header<'a> {
    /// Local role label, or a placeholder before negotiation.
    pub role: &'a str,
    /// Current coordinator state label.
    pub state: &'a str,
    /// Group both peers joined.
    pub group: u16,
}

/// Paints the screen with the cursor highlighted.
pub fn draw(frame: &mut Frame, screen: &Screen, cursor: (u8, u8), header: Header<'_>) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(screen.background())),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(5),    // Board
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new(format!(
        "turnlink | you: {} | {} | group {}",
        header.role, header.state, header.group
    ))
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_board(frame, chunks[1], screen, cursor);

    let (text, style) = match screen.status() {
        Some(status) => (
            status.text.as_str(),
            Style::default().fg(status.foreground).bg(status.background),
        ),
        None => ("", Style::default()),
    };
    let status = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);

    let help = Paragraph::new("arrows move | a/Enter claim or place | s restart | q quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}

fn draw_board(frame: &mut Frame, area: Rect, screen: &Screen, cursor: (u8, u8)) {
    let lines = board_lines(screen, cursor);
    let width = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
    let height = lines.len() as u16;
    let board = Paragraph::new(lines);
    frame.render_widget(board, center_rect(area, width, height));
}

/// Builds one line per board row plus separators between rows.
fn board_lines(screen: &Screen, cursor: (u8, u8)) -> Vec<Line<'static>> {
    let dims = screen.dims();
    let grid_style = match screen.grid() {
        Some(color) => Style::default().fg(color),
        None => Style::default().fg(screen.background()),
    };

    let separator = (0..dims.cols)
        .map(|_| "─".repeat(CELL_WIDTH))
        .collect::<Vec<_>>()
        .join("┼");

    let mut lines = Vec::with_capacity(usize::from(dims.rows) * 2);
    for row in 0..dims.rows {
        if row > 0 {
            lines.push(Line::from(Span::styled(separator.clone(), grid_style)));
        }
        let mut spans = Vec::with_capacity(usize::from(dims.cols) * 2);
        for col in 0..dims.cols {
            if col > 0 {
                spans.push(Span::styled("│", grid_style));
            }
            let (symbol, mut style) = match screen.mark_at(row, col) {
                Some(mark) => (
                    format!(" {} ", mark.role),
                    Style::default().fg(mark.color).add_modifier(Modifier::BOLD),
                ),
                None => ("   ".to_string(), Style::default()),
            };
            if (row, col) == cursor {
                style = style.bg(Color::White);
                if screen.mark_at(row, col).is_none() {
                    style = style.fg(Color::Black);
                }
            }
            spans.push(Span::styled(symbol, style));
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}
