//! A terminal portfolio viewer.
//!
//! Project cards drift up and down on their own until you touch the wheel,
//! and a custom cursor eases after the mouse.  Run it on a directory whose
//! subdirectories are projects.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr, Stderr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    media_runtime::MediaUpdate,
    state::{ActiveView, AppState},
};
use crate::config::{Action, AppConfig};
use crate::core::{
    animator::{AutoScrollPhase, PointerMode, ScrollControl},
    clock::MonotonicClock,
    preloader::Preloader,
};
use crate::ui::{
    cards::CardsWidget, cursor::CursorWidget, detail::DetailWidget, layout::AppLayout,
    lightbox::LightboxWidget, preloader::PreloaderWidget, theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Terminal portfolio viewer")]
struct Cli {
    /// Portfolio directory (defaults to `.`).
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Coarse-pointer mode: no custom cursor, no easing, no auto-scroll.
    #[arg(long)]
    touch: bool,

    /// Skip the preloader animation.
    #[arg(long)]
    no_preloader: bool,

    /// Frames per second.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,
}

// ───────────────────────────────────────── drawing ──────────

fn status_hint(state: &AppState) -> String {
    let c = &state.config;
    match state.active_view() {
        ActiveView::Preloader => "loading…".into(),
        ActiveView::Content => {
            let auto = match state.animator.as_ref().map(|a| a.phase()) {
                Some(AutoScrollPhase::Armed) => "  ·  auto-scrolling",
                _ => "",
            };
            format!(
                " {} open  {}/{} scroll  {} quit{auto}",
                c.short_binding(Action::OpenProject),
                c.short_binding(Action::ScrollUp),
                c.short_binding(Action::ScrollDown),
                c.short_binding(Action::Quit),
            )
        }
        ActiveView::Detail => format!(
            " {} back  {} gallery  {} quit",
            c.short_binding(Action::CloseOverlay),
            c.short_binding(Action::OpenGallery),
            c.short_binding(Action::Quit),
        ),
        ActiveView::Gallery => format!(
            " {}/{} navigate  {} close",
            c.short_binding(Action::GalleryPrev),
            c.short_binding(Action::GalleryNext),
            c.short_binding(Action::CloseOverlay),
        ),
    }
}

fn draw(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();
    let layout = AppLayout::from_area(area);

    if state.content_visible() {
        let block = Block::default()
            .title(format!(" {} ", state.portfolio.root.display()))
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_style(Theme::border_style());
        let cards = CardsWidget {
            projects: &state.portfolio.projects,
            media: &state.media,
            scroll_rows: state.scroll_rows(),
            block,
        };
        frame.render_widget(cards, layout.content_area);
    }

    let hint = status_hint(state);
    let status_text = state.status_message.as_deref().unwrap_or(&hint);
    frame.render_widget(
        Paragraph::new(status_text).style(Theme::status_bar_style()),
        layout.status_area,
    );

    let detail_zones = state.detail_project().map(|project| {
        DetailWidget {
            project,
            media: &state.media,
        }
        .render_and_hit(layout.content_area, frame.buffer_mut())
    });
    state.detail_hit_zones = detail_zones;

    let lightbox_zones = state.gallery.as_ref().map(|gallery| {
        LightboxWidget {
            gallery,
            media: &state.media,
        }
        .render_and_hit(area, frame.buffer_mut())
    });
    state.lightbox_hit_zones = lightbox_zones;

    if let Some(animator) = state.animator.as_ref().filter(|a| a.cursor_shown()) {
        frame.render_widget(
            CursorWidget {
                pos: animator.cursor_pos(),
                cells: state.config.cells,
            },
            area,
        );
    }

    if let Some(preloader_frame) = state.preloader_frame() {
        frame.render_widget(
            PreloaderWidget {
                frame: &preloader_frame,
            },
            area,
        );
    }
}

// ───────────────────────────────────────── event loop ────────

async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    state: &mut AppState,
    fps: u32,
    mut media_rx: mpsc::UnboundedReceiver<MediaUpdate>,
) -> Result<()> {
    let mut events = spawn_event_reader(Duration::from_millis(100));
    let mut frames = tokio::time::interval(Duration::from_secs_f64(1.0 / fps as f64));
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        terminal.draw(|frame| draw(frame, state))?;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(state, m),
                    AppEvent::Resize(w, h) => state.resize(w, h),
                    AppEvent::FocusGained => handler::handle_focus(state, true),
                    AppEvent::FocusLost => handler::handle_focus(state, false),
                }
            }

            Some(update) = media_rx.recv() => {
                // Batch-drain everything already decoded before redrawing.
                state.apply_media(update);
                while let Ok(update) = media_rx.try_recv() {
                    state.apply_media(update);
                }
            }

            _ = frames.tick() => state.tick(),
        }

        if state.should_quit {
            return Ok(());
        }
    }
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    // ── load the portfolio ────────────────────────────────────
    let root = cli
        .path
        .canonicalize()
        .with_context(|| format!("cannot open {}", cli.path.display()))?;
    let portfolio = crate::core::portfolio::load_portfolio(&root)?;
    let config = AppConfig::load();
    let mode = if cli.touch {
        PointerMode::Coarse
    } else {
        PointerMode::Fine
    };

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(
        stderr_handle,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;
    let size = terminal.size()?;
    let area = Rect::new(0, 0, size.width, size.height);

    let preloader = (!cli.no_preloader).then(|| {
        let (cols, rows) = ui::preloader::dot_grid(area);
        Preloader::new(cols as usize * rows as usize, &mut rand::rng())
    });

    let (media_tx, media_rx) = mpsc::unbounded_channel();
    let mut state = AppState::new(
        config,
        portfolio,
        mode,
        area,
        Box::new(MonotonicClock::start()),
        preloader,
        media_tx,
    );

    let result = run(&mut terminal, &mut state, cli.fps, media_rx).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    result
}
