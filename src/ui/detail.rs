//! Project detail overlay.
//!
//! Large visual on top, small visuals beneath it and the text block on the
//! right.  Showcase projects drop the text and show visuals only.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::app::media_runtime::MediaCache;
use crate::core::detail::DetailLayout;
use crate::core::portfolio::{Media, Project};

use super::image::{paint_media, VirtualRect};
use super::theme::Theme;

const BACK_LABEL: &str = "[ go back ]";

/// Clickable regions returned after rendering, for mouse hit-testing.
#[derive(Debug, Clone, Default)]
pub struct DetailHitZones {
    pub back_rect: Rect,
    /// "N more photos" button, opening the gallery past the visible items.
    pub more: Option<(Rect, usize)>,
    /// Visuals that open the gallery at the paired index.
    pub media: Vec<(Rect, usize)>,
}

/// The detail overlay widget.
pub struct DetailWidget<'a> {
    pub project: &'a Project,
    pub media: &'a MediaCache,
}

impl<'a> DetailWidget<'a> {
    /// Render over `area` and return hit zones for mouse interaction.
    pub fn render_and_hit(self, area: Rect, buf: &mut Buffer) -> DetailHitZones {
        Clear.render(area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::overlay_border_style())
            .title(Span::styled(
                format!(" {} ", self.project.title),
                Theme::title_style(),
            ));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width < 4 || inner.height < 3 {
            return DetailHitZones::default();
        }

        let layout = DetailLayout::for_project(self.project);
        let clickable = layout.variant.gallery_enabled();

        // Bottom row: buttons.
        let [body, buttons] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .areas(inner);

        let back_rect = Rect::new(
            buttons.x,
            buttons.y,
            (BACK_LABEL.len() as u16).min(buttons.width),
            1,
        );
        buf.set_stringn(
            back_rect.x,
            back_rect.y,
            BACK_LABEL,
            back_rect.width as usize,
            Theme::button_style(),
        );

        let more = (layout.more_count > 0).then(|| {
            let label = format!("[ {} more photos ]", layout.more_count);
            let width = (label.chars().count() as u16).min(buttons.width);
            let rect = Rect::new(buttons.right().saturating_sub(width), buttons.y, width, 1);
            buf.set_stringn(rect.x, rect.y, &label, width as usize, Theme::button_style());
            (rect, 1 + layout.small.len())
        });

        let (visuals, text) = if layout.show_text {
            let [v, t] = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
                .spacing(2)
                .areas(body);
            (v, Some(t))
        } else {
            (body, None)
        };

        let mut media_zones = Vec::new();
        let mut paint = |m: &Media, rect: Rect, index: usize, buf: &mut Buffer| {
            paint_media(
                Some(m),
                self.media.get(&m.path),
                VirtualRect::from_rect(rect),
                rect,
                buf,
            );
            if clickable {
                media_zones.push((rect, index));
            }
        };

        if layout.small.is_empty() {
            if let Some(lead) = layout.lead {
                paint(lead, visuals, 0, buf);
            }
        } else {
            let [lead_area, small_area] = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
                .spacing(1)
                .areas(visuals);
            if let Some(lead) = layout.lead {
                paint(lead, lead_area, 0, buf);
            }
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, layout.small.len() as u32); layout.small.len()])
                .spacing(1)
                .split(small_area);
            for (i, (m, rect)) in layout.small.iter().zip(columns.iter()).enumerate() {
                paint(*m, *rect, i + 1, buf);
            }
        }

        if let Some(text_area) = text {
            let mut lines = vec![Line::from(Span::styled(
                self.project.title.clone(),
                Theme::card_title_style(),
            ))];
            if let Some(year) = &self.project.year {
                lines.push(Line::from(Span::styled(year.clone(), Theme::card_meta_style())));
            }
            lines.push(Line::default());
            lines.extend(
                self.project
                    .description
                    .lines()
                    .map(|l| Line::from(Span::styled(l.to_string(), Theme::body_text_style()))),
            );
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .render(text_area, buf);
        }

        DetailHitZones {
            back_rect,
            more,
            media: media_zones,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::project;
    use crate::core::portfolio::LayoutVariant;

    fn render(project: &Project) -> (Buffer, DetailHitZones) {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        let cache = MediaCache::default();
        let zones = DetailWidget {
            project,
            media: &cache,
        }
        .render_and_hit(area, &mut buf);
        (buf, zones)
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn regular_layout_offers_more_photos() {
        let p = project("calm", LayoutVariant::Regular, 6);
        let (buf, zones) = render(&p);
        // Lead + 2 small visible, 3 more in the gallery.
        assert_eq!(zones.media.len(), 3);
        let (rect, start) = zones.more.unwrap();
        assert_eq!(start, 3);
        assert!(row_text(&buf, rect.y).contains("3 more photos"));
        assert!(row_text(&buf, zones.back_rect.y).contains("go back"));
        assert!((1..23).any(|y| row_text(&buf, y).contains("about calm")));
    }

    #[test]
    fn showcase_is_visuals_only() {
        let p = project("mindplug", LayoutVariant::Showcase, 6);
        let (buf, zones) = render(&p);
        assert!(zones.media.is_empty());
        assert!(zones.more.is_none());
        assert!(!(1..23).any(|y| row_text(&buf, y).contains("about mindplug")));
    }
}
