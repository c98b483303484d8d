//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};

/// Primary screen layout: bordered content pane and a bottom status bar.
pub struct AppLayout {
    pub content_area: Rect,
    /// `content_area` minus its border: the scrollable viewport.
    pub content_inner: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // content pane (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let content_inner = Block::default().borders(Borders::ALL).inner(chunks[0]);
        Self {
            content_area: chunks[0],
            content_inner,
            status_area: chunks[1],
        }
    }
}

pub fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}
