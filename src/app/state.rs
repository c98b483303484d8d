//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::path::Path;
use std::time::Duration;

use ratatui::layout::Rect;
use tokio::sync::mpsc;

use crate::app::media_runtime::{MediaCache, MediaUpdate};
use crate::config::AppConfig;
use crate::core::{
    animator::{Animator, PointerMode},
    clock::FrameClock,
    detail::DetailView,
    gallery::Gallery,
    geometry::{ScrollExtent, Viewport},
    portfolio::{Portfolio, Project},
    preloader::{Preloader, PreloaderFrame, PreloaderStage},
};
use crate::ui::{cards::CardGrid, detail::DetailHitZones, layout::AppLayout, lightbox::LightboxHitZones};

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveView {
    Preloader,
    Content,
    Detail,
    Gallery,
}

/// Top-level application state.
pub struct AppState {
    pub config: AppConfig,
    pub portfolio: Portfolio,
    pub pointer_mode: PointerMode,
    /// Full terminal size, updated on resize.
    pub terminal_area: Rect,
    clock: Box<dyn FrameClock>,
    /// Running preloader, if any.  Cleared once it is done.
    pub preloader: Option<Preloader>,
    /// Created when the preloader is done; input is ignored before that.
    pub animator: Option<Animator>,
    pub detail: DetailView,
    pub gallery: Option<Gallery>,
    pub media: MediaCache,
    media_tx: mpsc::UnboundedSender<MediaUpdate>,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Clickable regions from the last draw.
    pub detail_hit_zones: Option<DetailHitZones>,
    pub lightbox_hit_zones: Option<LightboxHitZones>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        portfolio: Portfolio,
        pointer_mode: PointerMode,
        terminal_area: Rect,
        clock: Box<dyn FrameClock>,
        preloader: Option<Preloader>,
        media_tx: mpsc::UnboundedSender<MediaUpdate>,
    ) -> Self {
        let mut state = Self {
            config,
            portfolio,
            pointer_mode,
            terminal_area,
            clock,
            preloader,
            animator: None,
            detail: DetailView::default(),
            gallery: None,
            media: MediaCache::default(),
            media_tx,
            should_quit: false,
            status_message: None,
            detail_hit_zones: None,
            lightbox_hit_zones: None,
        };
        let covers: Vec<_> = state
            .portfolio
            .projects
            .iter()
            .filter_map(|p| p.cover().map(|m| m.path.clone()))
            .collect();
        for path in covers {
            state.request_media(&path);
        }
        state
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    pub fn active_view(&self) -> ActiveView {
        if self.animator.is_none() {
            ActiveView::Preloader
        } else if self.gallery.is_some() {
            ActiveView::Gallery
        } else if self.detail.is_open() {
            ActiveView::Detail
        } else {
            ActiveView::Content
        }
    }

    /// Preloader frame to draw this tick, if the overlay is still up.
    pub fn preloader_frame(&self) -> Option<PreloaderFrame> {
        let frame = self.preloader.as_ref()?.frame_at(self.now());
        (frame.stage != PreloaderStage::Done).then_some(frame)
    }

    /// Whether the content pane should be drawn at all.
    pub fn content_visible(&self) -> bool {
        match self.preloader_frame() {
            Some(frame) => frame.stage != PreloaderStage::Animating,
            None => !self.detail.is_open(),
        }
    }

    /// Advance timers and animation by one frame.
    pub fn tick(&mut self) {
        let now = self.now();
        if self.animator.is_none() {
            let done = self
                .preloader
                .as_ref()
                .map_or(true, |p| now >= p.done_at());
            if done {
                self.preloader = None;
                self.start_animator(now);
            }
        }
        if let Some(animator) = self.animator.as_mut() {
            animator.frame(now);
        }
    }

    fn start_animator(&mut self, now: Duration) {
        let animator = Animator::new(
            self.pointer_mode,
            self.config.tuning,
            self.viewport(),
            self.extent(),
            0.0,
            now,
        );
        tracing::info!(projects = self.portfolio.projects.len(), "portfolio ready");
        self.animator = Some(animator);
    }

    /// Terminal resized.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.terminal_area = Rect::new(0, 0, width, height);
        let (viewport, extent) = (self.viewport(), self.extent());
        if let Some(animator) = self.animator.as_mut() {
            animator.resize(viewport, extent);
        }
    }

    // ── geometry ──────────────────────────────────────────────

    pub fn layout(&self) -> AppLayout {
        AppLayout::from_area(self.terminal_area)
    }

    pub fn grid(&self) -> CardGrid {
        CardGrid::new(self.layout().content_inner, self.portfolio.projects.len())
    }

    /// Cursor bounds: the whole terminal, in virtual pixels.
    pub fn viewport(&self) -> Viewport {
        self.config
            .cells
            .viewport(self.terminal_area.width, self.terminal_area.height)
    }

    pub fn extent(&self) -> ScrollExtent {
        let cells = &self.config.cells;
        ScrollExtent::new(
            cells.rows_to_px(self.grid().content_rows()),
            cells.rows_to_px(self.layout().content_inner.height as usize),
        )
    }

    /// Rendered scroll offset, in rows.
    pub fn scroll_rows(&self) -> usize {
        self.animator
            .as_ref()
            .map_or(0, |a| self.config.cells.px_to_rows(a.scroll_pos()))
    }

    /// Card under the terminal cell `(col, row)`.
    pub fn card_at(&self, col: u16, row: u16) -> Option<usize> {
        self.grid().card_at(col, row, self.scroll_rows())
    }

    pub fn detail_project(&self) -> Option<&Project> {
        self.detail
            .current()
            .and_then(|i| self.portfolio.projects.get(i))
    }

    // ── media ─────────────────────────────────────────────────

    pub fn request_media(&mut self, path: &Path) {
        self.media.request(path, &self.media_tx);
    }

    pub fn apply_media(&mut self, update: MediaUpdate) {
        self.media.apply(update);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::core::portfolio::{LayoutVariant, Media, MediaKind};
    use std::path::PathBuf;

    pub(crate) fn project(title: &str, layout: LayoutVariant, media: usize) -> Project {
        Project {
            dir: PathBuf::from(title),
            title: title.into(),
            description: format!("about {title}"),
            year: Some("2023".into()),
            layout,
            media: (0..media)
                .map(|i| Media {
                    path: PathBuf::from(format!("{title}/{i}.png")),
                    kind: MediaKind::Image,
                })
                .collect(),
        }
    }

    /// 80×24 terminal, no preloader, eight projects.
    pub(crate) fn state(mode: PointerMode) -> (AppState, ManualClock) {
        let clock = ManualClock::default();
        let (tx, _rx) = mpsc::unbounded_channel();
        let projects = (0..8)
            .map(|i| project(&format!("p{i}"), LayoutVariant::Regular, 5))
            .collect();
        let portfolio = Portfolio {
            root: PathBuf::from("."),
            projects,
        };
        let state = AppState::new(
            AppConfig::default(),
            portfolio,
            mode,
            Rect::new(0, 0, 80, 24),
            Box::new(clock.clone()),
            None,
            tx,
        );
        (state, clock)
    }

    #[test]
    fn animator_starts_after_preloader_is_done() {
        let (mut s, clock) = state(PointerMode::Fine);
        let mut rng = <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(1);
        let preloader = Preloader::new(12, &mut rng);
        let done_at = preloader.done_at();
        s.preloader = Some(preloader);

        s.tick();
        assert_eq!(s.active_view(), ActiveView::Preloader);
        assert!(!s.content_visible());

        clock.advance(done_at);
        s.tick();
        assert_eq!(s.active_view(), ActiveView::Content);
        assert!(s.preloader.is_none());
        assert!(s.content_visible());
    }

    #[test]
    fn extent_follows_card_rows_and_pane_height() {
        let (s, _) = state(PointerMode::Fine);
        // 78 inner columns → 2 cards per row → 4 rows of cards.
        let extent = s.extent();
        assert_eq!(extent.content, 4.0 * 14.0 * 16.0);
        assert_eq!(extent.visible, 21.0 * 16.0);
        assert_eq!(s.viewport(), Viewport::new(640.0, 384.0));
    }

    #[test]
    fn resize_reclamps_scroll() {
        let (mut s, _) = state(PointerMode::Fine);
        s.tick();
        let animator = s.animator.as_mut().unwrap();
        animator.native_scroll_to(10_000.0);
        let before = animator.max_scroll();
        s.resize(200, 60);
        let a = s.animator.as_ref().unwrap();
        assert!(a.max_scroll() < before);
        assert_eq!(a.scroll_pos(), a.max_scroll());
    }
}
