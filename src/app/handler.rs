//! Input handling — maps key/mouse events to state mutations.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::Action;
use crate::core::animator::{DragOutcome, ScrollControl};
use crate::core::detail::gallery_order;
use crate::core::gallery::Gallery;
use crate::ui::layout::point_in_rect;

use super::state::{ActiveView, AppState};

/// Rows moved by a single line-scroll key.
const LINE_SCROLL_ROWS: usize = 3;

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Only process Press events (ignore Release/Repeat on supported terminals).
    if key.kind != KeyEventKind::Press {
        return;
    }
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    if action == Action::Quit {
        state.should_quit = true;
        return;
    }

    state.status_message = None;
    match state.active_view() {
        ActiveView::Preloader => {}
        ActiveView::Content => handle_content_action(state, action),
        ActiveView::Detail => handle_detail_action(state, action),
        ActiveView::Gallery => handle_gallery_action(state, action),
    }
}

// ── Content view ────────────────────────────────────────────────

fn handle_content_action(state: &mut AppState, action: Action) {
    let cells = state.config.cells;
    let page = state.extent().visible;
    if action == Action::OpenProject {
        open_card_under_cursor(state);
        return;
    }

    let Some(animator) = state.animator.as_mut() else {
        return;
    };
    match action {
        Action::ScrollUp => animator.native_scroll_by(-cells.rows_to_px(LINE_SCROLL_ROWS)),
        Action::ScrollDown => animator.native_scroll_by(cells.rows_to_px(LINE_SCROLL_ROWS)),
        Action::PageUp => animator.native_scroll_by(-page),
        Action::PageDown => animator.native_scroll_by(page),
        Action::Top => animator.native_scroll_to(0.0),
        Action::Bottom => {
            let max = animator.max_scroll();
            animator.native_scroll_to(max);
        }
        _ => {}
    }
}

fn open_card_under_cursor(state: &mut AppState) {
    let Some(animator) = state.animator.as_ref() else {
        return;
    };
    let card = state
        .config
        .cells
        .cell_at(animator.cursor_pos())
        .and_then(|(col, row)| state.card_at(col, row));
    match card {
        Some(index) => open_detail(state, index),
        None => state.status_message = Some("No project under the cursor".into()),
    }
}

// ── Detail view ─────────────────────────────────────────────────

fn handle_detail_action(state: &mut AppState, action: Action) {
    match action {
        Action::CloseOverlay => close_detail(state),
        Action::OpenGallery => open_gallery(state, 0),
        _ => {}
    }
}

fn open_detail(state: &mut AppState, index: usize) {
    let Some(animator) = state.animator.as_mut() else {
        return;
    };
    if !state.detail.open(index, animator) {
        return;
    }
    state.detail_hit_zones = None;
    let paths: Vec<_> = match state.portfolio.projects.get(index) {
        Some(project) => {
            tracing::debug!(dir = %project.dir.display(), "requesting project media");
            gallery_order(project)
                .into_iter()
                .map(|m| m.path.clone())
                .collect()
        }
        None => Vec::new(),
    };
    for path in paths {
        state.request_media(&path);
    }
}

fn close_detail(state: &mut AppState) {
    let now = state.now();
    let Some(animator) = state.animator.as_mut() else {
        return;
    };
    state.detail.close(animator, now);
    state.detail_hit_zones = None;
}

// ── Gallery ─────────────────────────────────────────────────────

fn handle_gallery_action(state: &mut AppState, action: Action) {
    match action {
        Action::CloseOverlay => close_gallery(state),
        Action::GalleryPrev => gallery_step(state, Gallery::prev),
        Action::GalleryNext => gallery_step(state, Gallery::next),
        _ => {}
    }
}

fn open_gallery(state: &mut AppState, index: usize) {
    let Some(animator) = state.animator.as_mut() else {
        return;
    };
    let Some(project) = state
        .detail
        .current()
        .and_then(|i| state.portfolio.projects.get(i))
    else {
        return;
    };
    match Gallery::open(project, index, animator) {
        Some(gallery) => {
            let path = gallery.current().path.clone();
            state.gallery = Some(gallery);
            state.lightbox_hit_zones = None;
            state.request_media(&path);
        }
        None => state.status_message = Some("No gallery for this project".into()),
    }
}

fn close_gallery(state: &mut AppState) {
    if let (Some(gallery), Some(animator)) = (state.gallery.take(), state.animator.as_mut()) {
        gallery.close(animator);
    }
    state.lightbox_hit_zones = None;
}

fn gallery_step(state: &mut AppState, step: fn(&mut Gallery)) {
    let Some(gallery) = state.gallery.as_mut() else {
        return;
    };
    step(gallery);
    let path = gallery.current().path.clone();
    state.request_media(&path);
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let view = state.active_view();
    let content = state.layout().content_inner;
    let wheel_delta = state.config.wheel_delta;
    let p = state.config.cells.cell_center(mouse.column, mouse.row);
    let Some(animator) = state.animator.as_mut() else {
        return;
    };

    match mouse.kind {
        MouseEventKind::Moved => animator.pointer_moved(p),
        MouseEventKind::Drag(MouseButton::Left) => {
            animator.pointer_moved(p);
            animator.drag_move(p);
        }
        MouseEventKind::Down(MouseButton::Left) => {
            animator.pointer_moved(p);
            match view {
                ActiveView::Content => {
                    if point_in_rect(content, mouse.column, mouse.row) {
                        animator.drag_start(p);
                    }
                }
                ActiveView::Detail => handle_detail_click(state, mouse.column, mouse.row),
                ActiveView::Gallery => handle_lightbox_click(state, mouse.column, mouse.row),
                ActiveView::Preloader => {}
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if animator.drag_end() == DragOutcome::Click && view == ActiveView::Content {
                if let Some(index) = state.card_at(mouse.column, mouse.row) {
                    open_detail(state, index);
                }
            }
        }
        MouseEventKind::ScrollDown | MouseEventKind::ScrollUp
            if view == ActiveView::Content && point_in_rect(content, mouse.column, mouse.row) =>
        {
            let delta = if mouse.kind == MouseEventKind::ScrollUp {
                -wheel_delta
            } else {
                wheel_delta
            };
            animator.wheel(delta);
        }
        _ => {}
    }
}

fn handle_detail_click(state: &mut AppState, col: u16, row: u16) {
    let Some(zones) = state.detail_hit_zones.clone() else {
        return;
    };
    if point_in_rect(zones.back_rect, col, row) {
        close_detail(state);
        return;
    }
    let target = zones
        .more
        .iter()
        .chain(zones.media.iter())
        .find(|(rect, _)| point_in_rect(*rect, col, row))
        .map(|&(_, index)| index);
    if let Some(index) = target {
        open_gallery(state, index);
    }
}

fn handle_lightbox_click(state: &mut AppState, col: u16, row: u16) {
    let Some(zones) = state.lightbox_hit_zones else {
        return;
    };
    let on_backdrop = !point_in_rect(zones.overlay_rect, col, row);
    if on_backdrop || point_in_rect(zones.close_rect, col, row) {
        close_gallery(state);
    } else if point_in_rect(zones.prev_rect, col, row) {
        gallery_step(state, Gallery::prev);
    } else if point_in_rect(zones.next_rect, col, row) {
        gallery_step(state, Gallery::next);
    }
}

// ── Focus ───────────────────────────────────────────────────────

/// Terminal focus stands in for the pointer entering / leaving the page.
pub fn handle_focus(state: &mut AppState, gained: bool) {
    let Some(animator) = state.animator.as_mut() else {
        return;
    };
    if gained {
        animator.pointer_entered();
    } else {
        animator.pointer_left();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::state;
    use crate::core::animator::{AutoScrollPhase, PointerMode};
    use crate::ui::lightbox::LightboxHitZones;
    use ratatui::layout::Rect;
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn wheel_scrolls_content_and_disarms() {
        let (mut s, _) = state(PointerMode::Fine);
        s.tick();
        handle_mouse(&mut s, mouse(MouseEventKind::ScrollDown, 12, 3));
        let a = s.animator.as_ref().unwrap();
        assert_eq!(a.target_scroll_pos(), 80.0);
        assert_eq!(a.phase(), AutoScrollPhase::Disarmed);
    }

    #[test]
    fn wheel_over_the_status_bar_is_ignored() {
        let (mut s, _) = state(PointerMode::Fine);
        s.tick();
        let status_row = s.terminal_area.height - 1;
        handle_mouse(&mut s, mouse(MouseEventKind::ScrollDown, 12, status_row));
        let a = s.animator.as_ref().unwrap();
        assert_eq!(a.target_scroll_pos(), 0.0);
        assert_eq!(a.phase(), AutoScrollPhase::Idle);
    }

    #[test]
    fn input_before_the_animator_exists_is_ignored() {
        let (mut s, _) = state(PointerMode::Fine);
        handle_key(&mut s, key(KeyCode::Enter));
        handle_mouse(&mut s, mouse(MouseEventKind::ScrollDown, 12, 3));
        assert_eq!(s.active_view(), ActiveView::Preloader);
        assert!(!s.should_quit);
        handle_key(&mut s, key(KeyCode::Char('q')));
        assert!(s.should_quit);
    }

    #[test]
    fn detail_round_trip_resumes_auto_scroll() {
        let (mut s, clock) = state(PointerMode::Fine);
        s.tick();
        handle_mouse(&mut s, mouse(MouseEventKind::Moved, 12, 3));
        clock.advance(ms(1000));
        s.tick();
        assert!(s.animator.as_ref().unwrap().auto_scroll_enabled());

        handle_key(&mut s, key(KeyCode::Enter));
        assert_eq!(s.active_view(), ActiveView::Detail);
        assert_eq!(s.detail.current(), Some(0));
        assert!(!s.animator.as_ref().unwrap().auto_scroll_enabled());

        handle_key(&mut s, key(KeyCode::Esc));
        assert_eq!(s.active_view(), ActiveView::Content);
        assert_eq!(s.animator.as_ref().unwrap().scroll_pos(), 0.0);

        clock.advance(ms(1000));
        s.tick();
        assert!(s.animator.as_ref().unwrap().auto_scroll_enabled());
    }

    #[test]
    fn early_open_holds_arming_until_after_close() {
        let (mut s, clock) = state(PointerMode::Fine);
        s.tick();
        handle_mouse(&mut s, mouse(MouseEventKind::Moved, 12, 3));
        clock.advance(ms(300));
        s.tick();
        handle_key(&mut s, key(KeyCode::Enter));
        assert_eq!(s.active_view(), ActiveView::Detail);

        clock.advance(ms(900));
        s.tick();
        assert!(!s.animator.as_ref().unwrap().auto_scroll_enabled());

        handle_key(&mut s, key(KeyCode::Esc));
        clock.advance(ms(16));
        s.tick();
        assert!(!s.animator.as_ref().unwrap().auto_scroll_enabled());

        clock.advance(ms(1000));
        s.tick();
        let a = s.animator.as_ref().unwrap();
        assert!(a.auto_scroll_enabled());
        assert!(!a.user_has_scrolled());
    }

    #[test]
    fn click_opens_the_card_under_the_pointer() {
        let (mut s, _) = state(PointerMode::Fine);
        s.tick();
        // Second card of the first row.
        handle_mouse(&mut s, mouse(MouseEventKind::Down(MouseButton::Left), 42, 3));
        handle_mouse(&mut s, mouse(MouseEventKind::Up(MouseButton::Left), 42, 3));
        assert_eq!(s.detail.current(), Some(1));
        // The press counts as an interaction.
        assert!(s.animator.as_ref().unwrap().user_has_scrolled());
    }

    #[test]
    fn drag_moves_content_without_opening() {
        let (mut s, _) = state(PointerMode::Fine);
        s.tick();
        handle_mouse(&mut s, mouse(MouseEventKind::Down(MouseButton::Left), 12, 10));
        handle_mouse(&mut s, mouse(MouseEventKind::Drag(MouseButton::Left), 12, 5));
        handle_mouse(&mut s, mouse(MouseEventKind::Up(MouseButton::Left), 12, 5));
        assert!(!s.detail.is_open());
        assert_eq!(s.animator.as_ref().unwrap().scroll_pos(), 80.0);
        assert_eq!(s.scroll_rows(), 5);
    }

    #[test]
    fn sideways_drag_does_not_open_a_card() {
        let (mut s, _) = state(PointerMode::Fine);
        s.tick();
        handle_mouse(&mut s, mouse(MouseEventKind::Down(MouseButton::Left), 12, 3));
        handle_mouse(&mut s, mouse(MouseEventKind::Drag(MouseButton::Left), 20, 3));
        handle_mouse(&mut s, mouse(MouseEventKind::Up(MouseButton::Left), 20, 3));
        assert!(!s.detail.is_open());
        assert_eq!(s.active_view(), ActiveView::Content);
    }

    #[test]
    fn lightbox_clicks_hit_their_zones() {
        let (mut s, _) = state(PointerMode::Fine);
        s.tick();
        handle_mouse(&mut s, mouse(MouseEventKind::Moved, 12, 3));
        handle_key(&mut s, key(KeyCode::Enter));
        handle_key(&mut s, key(KeyCode::Char('g')));
        s.lightbox_hit_zones = Some(LightboxHitZones {
            overlay_rect: Rect::new(8, 2, 64, 19),
            close_rect: Rect::new(67, 2, 3, 1),
            prev_rect: Rect::new(8, 11, 3, 1),
            next_rect: Rect::new(69, 11, 3, 1),
        });

        handle_mouse(&mut s, mouse(MouseEventKind::Down(MouseButton::Left), 70, 11));
        assert_eq!(s.gallery.as_ref().unwrap().counter(), "2/5");
        // Inside the overlay but off every control.
        handle_mouse(&mut s, mouse(MouseEventKind::Down(MouseButton::Left), 40, 10));
        assert_eq!(s.active_view(), ActiveView::Gallery);

        handle_mouse(&mut s, mouse(MouseEventKind::Down(MouseButton::Left), 68, 2));
        assert_eq!(s.active_view(), ActiveView::Detail);
    }

    #[test]
    fn gallery_hides_cursor_and_wraps() {
        let (mut s, _) = state(PointerMode::Fine);
        s.tick();
        handle_mouse(&mut s, mouse(MouseEventKind::Moved, 12, 3));
        handle_key(&mut s, key(KeyCode::Enter));
        handle_key(&mut s, key(KeyCode::Char('g')));
        assert_eq!(s.active_view(), ActiveView::Gallery);
        assert!(!s.animator.as_ref().unwrap().cursor_shown());

        handle_key(&mut s, key(KeyCode::Left));
        assert_eq!(s.gallery.as_ref().unwrap().counter(), "5/5");

        handle_key(&mut s, key(KeyCode::Esc));
        assert_eq!(s.active_view(), ActiveView::Detail);
        assert!(s.animator.as_ref().unwrap().cursor_shown());
    }

    #[test]
    fn paging_keys_are_native_scrolls() {
        let (mut s, _) = state(PointerMode::Fine);
        s.tick();
        handle_key(&mut s, key(KeyCode::End));
        let a = s.animator.as_ref().unwrap();
        assert_eq!(a.scroll_pos(), a.max_scroll());
        assert_eq!(a.phase(), AutoScrollPhase::Disarmed);
        handle_key(&mut s, key(KeyCode::Home));
        assert_eq!(s.animator.as_ref().unwrap().scroll_pos(), 0.0);
    }

    #[test]
    fn focus_loss_hides_the_cursor() {
        let (mut s, _) = state(PointerMode::Fine);
        s.tick();
        handle_mouse(&mut s, mouse(MouseEventKind::Moved, 12, 3));
        handle_focus(&mut s, false);
        assert!(!s.animator.as_ref().unwrap().cursor_shown());
        handle_focus(&mut s, true);
        assert!(s.animator.as_ref().unwrap().cursor_shown());
    }
}
