//! Project card grid — the scrollable content pane.
//!
//! Cards are laid out left-to-right, top-to-bottom in fixed-size cells.
//! The grid is taller than the pane; the animator's scroll offset picks
//! which rows show.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Widget},
};

use crate::app::media_runtime::MediaCache;
use crate::core::portfolio::Project;

use super::image::{paint_media, VirtualRect};
use super::theme::Theme;

/// Card footprint in cells, including the one-column / one-row gutter.
pub const CARD_WIDTH: u16 = 30;
pub const CARD_HEIGHT: u16 = 14;
/// Rows of the card used by the cover image.
const COVER_ROWS: u16 = 11;

/// Pure geometry of the grid inside the content pane.
#[derive(Debug, Clone, Copy)]
pub struct CardGrid {
    area: Rect,
    columns: u16,
    count: usize,
}

impl CardGrid {
    pub fn new(area: Rect, count: usize) -> Self {
        Self {
            area,
            columns: (area.width / CARD_WIDTH).max(1),
            count,
        }
    }

    /// Total content height in rows.
    pub fn content_rows(&self) -> usize {
        let rows = self.count.div_ceil(self.columns as usize);
        rows * CARD_HEIGHT as usize
    }

    /// Card `index`'s rectangle (without gutter) at the given scroll.
    pub fn card_rect(&self, index: usize, scroll_rows: usize) -> VirtualRect {
        let col = (index % self.columns as usize) as u16;
        let row = index / self.columns as usize;
        // Centre the block of columns inside the pane.
        let used = self.columns.saturating_mul(CARD_WIDTH).min(self.area.width);
        let left = self.area.x + (self.area.width - used) / 2;
        let top = self.area.y as i64 + (row * CARD_HEIGHT as usize) as i64 - scroll_rows as i64;
        VirtualRect {
            x: left + col * CARD_WIDTH,
            y: top.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
            width: CARD_WIDTH.saturating_sub(1).min(self.area.width),
            height: CARD_HEIGHT - 1,
        }
    }

    /// Card under the cell `(col, row)`, if any.
    pub fn card_at(&self, col: u16, row: u16, scroll_rows: usize) -> Option<usize> {
        if !super::layout::point_in_rect(self.area, col, row) {
            return None;
        }
        (0..self.count).find(|&i| {
            let r = self.card_rect(i, scroll_rows);
            let y = row as i32;
            col >= r.x && col < r.x + r.width && y >= r.y && y < r.y + r.height as i32
        })
    }
}

/// The content pane widget, created fresh each frame.
pub struct CardsWidget<'a> {
    pub projects: &'a [Project],
    pub media: &'a MediaCache,
    pub scroll_rows: usize,
    pub block: Block<'a>,
}

impl<'a> Widget for CardsWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = self.block.inner(area);
        self.block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let grid = CardGrid::new(inner, self.projects.len());
        let top = inner.y as i32;
        let bottom = top + inner.height as i32;

        for (i, project) in self.projects.iter().enumerate() {
            let rect = grid.card_rect(i, self.scroll_rows);
            if rect.y + rect.height as i32 <= top || rect.y >= bottom {
                continue;
            }

            let cover = VirtualRect {
                height: COVER_ROWS.min(rect.height),
                ..rect
            };
            let cover_media = project.cover();
            let slot = cover_media.and_then(|m| self.media.get(&m.path));
            paint_media(cover_media, slot, cover, inner, buf);

            let title_y = rect.y + COVER_ROWS as i32;
            if title_y >= top && title_y < bottom {
                buf.set_stringn(
                    rect.x,
                    title_y as u16,
                    &project.title,
                    rect.width as usize,
                    Theme::card_title_style(),
                );
            }
            let meta_y = title_y + 1;
            if meta_y >= top && meta_y < bottom {
                let meta = match &project.year {
                    Some(year) => format!("{year} · {} media", project.media.len()),
                    None => format!("{} media", project.media.len()),
                };
                buf.set_stringn(
                    rect.x,
                    meta_y as u16,
                    meta,
                    rect.width as usize,
                    Theme::card_meta_style(),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_height_rounds_up_to_full_rows() {
        let grid = CardGrid::new(Rect::new(1, 1, 95, 20), 7);
        assert_eq!(grid.columns, 3);
        assert_eq!(grid.content_rows(), 3 * CARD_HEIGHT as usize);
        let narrow = CardGrid::new(Rect::new(0, 0, 10, 20), 2);
        assert_eq!(narrow.columns, 1);
        assert_eq!(narrow.content_rows(), 2 * CARD_HEIGHT as usize);
    }

    #[test]
    fn hit_testing_follows_scroll() {
        let grid = CardGrid::new(Rect::new(0, 0, 60, 20), 4);
        assert_eq!(grid.card_at(0, 0, 0), Some(0));
        assert_eq!(grid.card_at(31, 2, 0), Some(1));
        // Gutter column between cards.
        assert_eq!(grid.card_at(29, 2, 0), None);
        // Scrolled one card row down: top-left is now card 2.
        assert_eq!(grid.card_at(0, 0, CARD_HEIGHT as usize), Some(2));
        assert_eq!(grid.card_at(0, 25, 0), None);
    }
}
