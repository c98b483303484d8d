//! The custom cursor glyph.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    widgets::Widget,
};

use crate::core::geometry::{CellMetrics, Point};

use super::theme::Theme;

const GLYPH: char = '◉';

/// Draws the glyph at the cell containing `pos`.
pub struct CursorWidget {
    pub pos: Point,
    pub cells: CellMetrics,
}

impl Widget for CursorWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some((col, row)) = self.cells.cell_at(self.pos) else {
            return;
        };
        if !super::layout::point_in_rect(area, col, row) {
            return;
        }
        if let Some(cell) = buf.cell_mut(Position::new(col, row)) {
            cell.set_char(GLYPH).set_style(Theme::cursor_style());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_lands_in_the_cell_under_the_point() {
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        CursorWidget {
            pos: Point::new(8.0 * 3.5, 16.0 * 2.2),
            cells: CellMetrics::default(),
        }
        .render(area, &mut buf);
        assert_eq!(buf[(3, 2)].symbol(), "◉");
    }
}
