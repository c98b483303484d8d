//! Full-screen gallery lightbox overlay.
//!
//! Renders the current gallery item centred on the terminal with navigation
//! arrows, a close button, and a position indicator (e.g. "3/7").

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::app::media_runtime::MediaCache;
use crate::core::gallery::Gallery;

use super::image::{paint_media, VirtualRect};
use super::theme::Theme;

/// The lightbox overlay widget.
pub struct LightboxWidget<'a> {
    pub gallery: &'a Gallery,
    pub media: &'a MediaCache,
}

/// Clickable regions returned after rendering, for mouse hit-testing.
#[derive(Debug, Clone, Copy)]
pub struct LightboxHitZones {
    /// The whole overlay; clicks outside it land on the backdrop.
    pub overlay_rect: Rect,
    pub close_rect: Rect,
    pub prev_rect: Rect,
    pub next_rect: Rect,
}

impl<'a> LightboxWidget<'a> {
    /// Compute the overlay area (centred, 80% of terminal).
    fn overlay_area(terminal: Rect) -> Rect {
        let margin_x = (terminal.width as f32 * 0.1).round() as u16;
        let margin_y = (terminal.height as f32 * 0.1).round() as u16;
        Rect::new(
            terminal.x + margin_x,
            terminal.y + margin_y,
            terminal.width.saturating_sub(margin_x * 2).max(20),
            terminal.height.saturating_sub(margin_y * 2).max(8),
        )
        .intersection(terminal)
    }

    /// Render and return hit zones for mouse interaction.
    pub fn render_and_hit(self, terminal_area: Rect, buf: &mut Buffer) -> LightboxHitZones {
        let area = Self::overlay_area(terminal_area);
        Clear.render(area, buf);

        let item = self.gallery.current();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::overlay_border_style())
            .title(Span::styled(
                format!(" {} — {} ", item.name(), self.gallery.counter()),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        block.render(area, buf);

        // Close button [X] on the top-right corner of the border.
        let close_rect = Rect::new(area.x + area.width.saturating_sub(5), area.y, 3, 1);
        Paragraph::new(Line::from(Span::styled(
            "[X]",
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        )))
        .render(close_rect, buf);

        // Navigation arrows on the left/right edges (vertically centred).
        // Navigation wraps, so both are always live with more than one item.
        let arrow_y = area.y + area.height / 2;
        let prev_rect = Rect::new(area.x, arrow_y, 3, 1);
        let next_rect = Rect::new(area.x + area.width.saturating_sub(3), arrow_y, 3, 1);
        if self.gallery.len() > 1 {
            let arrow = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
            Paragraph::new(Line::from(Span::styled(" ◀", arrow))).render(prev_rect, buf);
            Paragraph::new(Line::from(Span::styled("▶ ", arrow))).render(next_rect, buf);
        }

        // Media in the inner area, padded for the arrows, one row for the footer.
        let media_area = Rect::new(
            inner.x.saturating_add(2),
            inner.y,
            inner.width.saturating_sub(4),
            inner.height.saturating_sub(1),
        );
        if media_area.width > 2 && media_area.height > 1 {
            paint_media(
                Some(item),
                self.media.get(&item.path),
                VirtualRect::from_rect(media_area),
                media_area,
                buf,
            );
        }

        let footer = Line::from(Span::styled(
            " ←/→ navigate   Esc close ",
            Style::default().fg(Color::DarkGray),
        ));
        let footer_y = inner.y + inner.height.saturating_sub(1);
        Paragraph::new(footer).render(Rect::new(inner.x, footer_y, inner.width, 1), buf);

        LightboxHitZones {
            overlay_rect: area,
            close_rect,
            prev_rect,
            next_rect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::project;
    use crate::core::animator::{Animator, AnimatorTuning, PointerMode};
    use crate::core::geometry::{ScrollExtent, Viewport};
    use crate::core::portfolio::LayoutVariant;
    use std::time::Duration;

    #[test]
    fn title_shows_name_and_counter() {
        let mut animator = Animator::new(
            PointerMode::Fine,
            AnimatorTuning::default(),
            Viewport::new(640.0, 384.0),
            ScrollExtent::new(384.0, 384.0),
            0.0,
            Duration::ZERO,
        );
        let p = project("zine", LayoutVariant::ExtendedGallery, 4);
        let mut gallery = Gallery::open(&p, 0, &mut animator).unwrap();
        gallery.prev();

        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        let cache = MediaCache::default();
        let zones = LightboxWidget {
            gallery: &gallery,
            media: &cache,
        }
        .render_and_hit(area, &mut buf);

        let title: String = (0..80)
            .map(|x| buf[(x, zones.close_rect.y)].symbol().to_string())
            .collect();
        assert!(title.contains("3.png — 4/4"));
        assert!(title.contains("[X]"));
        assert_eq!(buf[(zones.next_rect.x, zones.next_rect.y)].symbol(), "▶");
    }
}
