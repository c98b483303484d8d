//! Preloader overlay: a centred grid of dots that slides up and away.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Modifier,
    widgets::{Clear, Widget},
};

use crate::core::preloader::{PreloaderFrame, PreloaderStage};

use super::theme::Theme;

const DOT: char = '●';
const LETTER: char = 'E';
const COL_STEP: u16 = 4;
const ROW_STEP: u16 = 2;
const MAX_COLS: u16 = 7;
const MAX_ROWS: u16 = 3;

/// Dot grid `(columns, rows)` that fits `area`.
pub fn dot_grid(area: Rect) -> (u16, u16) {
    let cols = (area.width / COL_STEP).clamp(1, MAX_COLS);
    let rows = (area.height / ROW_STEP).clamp(1, MAX_ROWS);
    (cols, rows)
}

pub struct PreloaderWidget<'a> {
    pub frame: &'a PreloaderFrame,
}

impl<'a> Widget for PreloaderWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // The overlay's bottom edge rises as it slides out.
        let covered = match self.frame.stage {
            PreloaderStage::Done => return,
            PreloaderStage::SlidingOut { progress } => {
                (area.height as f64 * (1.0 - progress)).round() as u16
            }
            PreloaderStage::Animating | PreloaderStage::Revealing => area.height,
        };
        if covered == 0 {
            return;
        }
        let shift = area.height - covered;
        let overlay = Rect::new(area.x, area.y, area.width, covered);
        Clear.render(overlay, buf);
        buf.set_style(overlay, Theme::preloader_style());

        let (cols, rows) = dot_grid(area);
        let grid_w = (cols - 1) * COL_STEP + 1;
        let grid_h = (rows - 1) * ROW_STEP + 1;
        let left = area.x + area.width.saturating_sub(grid_w) / 2;
        let top = (area.y + area.height.saturating_sub(grid_h) / 2) as i32 - shift as i32;

        for (i, visible) in self.frame.dots_visible.iter().enumerate() {
            let i = i as u16;
            let (col, row) = (i % cols, i / cols);
            if row >= rows {
                break;
            }
            let y = top + (row * ROW_STEP) as i32;
            if y < overlay.y as i32 || y >= overlay.bottom() as i32 {
                continue;
            }
            let pos = Position::new(left + col * COL_STEP, y as u16);
            let Some(cell) = buf.cell_mut(pos) else {
                continue;
            };
            if self.frame.letter_at == Some(i as usize) {
                cell.set_char(LETTER)
                    .set_style(Theme::preloader_style().add_modifier(Modifier::BOLD));
            } else if *visible {
                cell.set_char(DOT);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(stage: PreloaderStage, letter_at: Option<usize>) -> PreloaderFrame {
        let mut dots_visible = vec![true; 21];
        dots_visible[3] = false;
        PreloaderFrame {
            stage,
            dots_visible,
            letter_at,
        }
    }

    fn count(buf: &Buffer, sym: &str) -> usize {
        buf.content().iter().filter(|c| c.symbol() == sym).count()
    }

    #[test]
    fn grid_is_capped() {
        assert_eq!(dot_grid(Rect::new(0, 0, 200, 60)), (7, 3));
        assert_eq!(dot_grid(Rect::new(0, 0, 8, 3)), (2, 1));
    }

    #[test]
    fn hidden_dot_and_letter_are_drawn() {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        PreloaderWidget {
            frame: &frame(PreloaderStage::Animating, Some(5)),
        }
        .render(area, &mut buf);
        assert_eq!(count(&buf, "●"), 19);
        assert_eq!(count(&buf, "E"), 1);
    }

    #[test]
    fn sliding_out_uncovers_from_the_bottom() {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        buf.set_string(0, 23, "content", ratatui::style::Style::default());
        PreloaderWidget {
            frame: &frame(PreloaderStage::SlidingOut { progress: 0.5 }, None),
        }
        .render(area, &mut buf);
        assert_eq!(buf[(0, 23)].symbol(), "c");
        assert_eq!(buf[(0, 0)].bg, Theme::preloader_style().bg.unwrap());
        // Dots moved up with the overlay; the lower rows are gone.
        assert!(count(&buf, "●") < 20);
    }
}
