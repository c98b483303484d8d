//! Cursor & scroll animator.
//!
//! Owns a smoothed cursor that eases toward the real pointer, a smoothed
//! scroll offset that eases toward a target offset, and the auto-scroll
//! behaviour that bounces the target between the content's extremes until
//! the user first interacts.
//!
//! Everything runs on the UI thread: input handlers and [`Animator::frame`]
//! are plain synchronous calls that never overlap.

use std::time::Duration;

use super::deferred::DeferredQueue;
use super::geometry::{clamp_offset, Point, ScrollExtent, Viewport};

/// Motion tuning.  Easing factors are fixed per-frame fractions of the
/// remaining distance, so perceived speed follows the frame rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatorTuning {
    /// Fraction of the pointer distance the cursor covers each frame.
    pub cursor_speed: f64,
    /// Fraction of the target distance the scroll offset covers each frame.
    pub scroll_speed: f64,
    /// Wheel `deltaY` multiplier.
    pub wheel_multiplier: f64,
    /// Auto-scroll speed in virtual pixels per second.
    pub auto_scroll_speed: f64,
    /// Quiet period before auto-scroll arms.
    pub auto_scroll_delay: Duration,
    /// Delay before auto-scroll resumes after an overlay closes.
    pub resume_delay: Duration,
    /// Minimum distance between the cursor and any viewport edge.
    pub cursor_inset: f64,
}

impl Default for AnimatorTuning {
    fn default() -> Self {
        Self {
            cursor_speed: 0.25,
            scroll_speed: 0.2,
            wheel_multiplier: 0.8,
            auto_scroll_speed: 20.0,
            auto_scroll_delay: Duration::from_millis(1000),
            resume_delay: Duration::from_millis(1000),
            cursor_inset: 5.0,
        }
    }
}

/// Pointer capability of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerMode {
    /// Precise pointer: custom cursor, eased scrolling, auto-scroll.
    #[default]
    Fine,
    /// Touch-style pointer: native scrolling only.
    Coarse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollDirection {
    #[default]
    Forward,
    Backward,
}

impl ScrollDirection {
    fn sign(self) -> f64 {
        match self {
            ScrollDirection::Forward => 1.0,
            ScrollDirection::Backward => -1.0,
        }
    }
}

/// Observable auto-scroll state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoScrollPhase {
    /// Not driving the target; may still arm (or resume).
    Idle,
    /// Driving the target back and forth.
    Armed,
    /// Permanently off: the user has interacted.
    Disarmed,
}

impl AutoScrollPhase {
    fn of(enabled: bool, user_has_scrolled: bool) -> Self {
        if enabled {
            AutoScrollPhase::Armed
        } else if user_has_scrolled {
            AutoScrollPhase::Disarmed
        } else {
            AutoScrollPhase::Idle
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeferredTask {
    /// Initial arming after the quiet period.
    ArmAutoScroll,
    /// Re-arm after an overlay closed.  Stale when `suspend_generation`
    /// moved on since scheduling.
    ResumeAutoScroll { generation: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GestureSource {
    Mouse,
    Touch,
}

#[derive(Debug, Clone, Copy)]
struct Gesture {
    source: GestureSource,
    origin: Point,
    origin_scroll: f64,
    moved: bool,
}

/// What a finished mouse drag amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Press and release without movement.
    Click,
    /// The content was dragged.
    Scrolled,
    /// No drag was in progress.
    None,
}

/// Interface other components use to read and steer the animator.
pub trait ScrollControl {
    fn cursor_pos(&self) -> Point;
    fn auto_scroll_enabled(&self) -> bool;
    fn user_has_scrolled(&self) -> bool;
    /// Force auto-scroll on or off without touching the user latch.
    fn set_auto_scroll_enabled(&mut self, enabled: bool);
    /// Re-arm auto-scroll after the resume delay, unless the user has
    /// scrolled by then.
    fn schedule_resume(&mut self, now: Duration);
    /// Programmatic scroll: resynchronise to `offset` without counting as
    /// a user interaction.
    fn resync_scroll(&mut self, offset: f64);
    /// Hide or show the cursor for the duration of an overlay.
    fn set_cursor_suppressed(&mut self, suppressed: bool);

    fn phase(&self) -> AutoScrollPhase {
        AutoScrollPhase::of(self.auto_scroll_enabled(), self.user_has_scrolled())
    }
}

/// The animator state.  One instance per app run.
#[derive(Debug, Clone)]
pub struct Animator {
    mode: PointerMode,
    tuning: AnimatorTuning,
    viewport: Viewport,

    cursor: Point,
    pointer: Point,
    tracking: bool,
    cursor_visible: bool,
    cursor_suppressed: bool,

    scroll_pos: f64,
    target_scroll_pos: f64,
    max_scroll: f64,

    auto_scroll_enabled: bool,
    direction: ScrollDirection,
    user_has_scrolled: bool,
    auto_scroll_started_at: Option<Duration>,
    /// An overlay forced auto-scroll off; only its resume may turn it on.
    suspended: bool,
    suspend_generation: u64,

    last_frame: Duration,
    gesture: Option<Gesture>,
    deferred: DeferredQueue<DeferredTask>,
}

impl Animator {
    /// Create the animator at `now`, with content currently scrolled to
    /// `initial_offset`.  `viewport` bounds the cursor; `extent` describes
    /// the scrollable content.  In fine mode this schedules auto-scroll
    /// arming.
    pub fn new(
        mode: PointerMode,
        tuning: AnimatorTuning,
        viewport: Viewport,
        extent: ScrollExtent,
        initial_offset: f64,
        now: Duration,
    ) -> Self {
        let max_scroll = extent.max_scroll();
        let offset = clamp_offset(initial_offset, max_scroll);
        let mut deferred = DeferredQueue::new();
        if mode == PointerMode::Fine {
            deferred.schedule(now, tuning.auto_scroll_delay, DeferredTask::ArmAutoScroll);
        }
        tracing::debug!(?mode, max_scroll, "animator initialised");
        Self {
            mode,
            tuning,
            viewport,
            cursor: Point::ORIGIN,
            pointer: Point::ORIGIN,
            tracking: false,
            cursor_visible: true,
            cursor_suppressed: false,
            scroll_pos: offset,
            target_scroll_pos: offset,
            max_scroll,
            auto_scroll_enabled: false,
            direction: ScrollDirection::Forward,
            user_has_scrolled: false,
            auto_scroll_started_at: None,
            suspended: false,
            suspend_generation: 0,
            last_frame: now,
            gesture: None,
            deferred,
        }
    }

    // ── accessors ─────────────────────────────────────────────

    /// Rendered scroll offset.
    pub fn scroll_pos(&self) -> f64 {
        self.scroll_pos
    }

    #[cfg(test)]
    pub(crate) fn target_scroll_pos(&self) -> f64 {
        self.target_scroll_pos
    }

    pub fn max_scroll(&self) -> f64 {
        self.max_scroll
    }

    /// Whether the custom cursor should be drawn this frame.
    pub fn cursor_shown(&self) -> bool {
        self.mode == PointerMode::Fine
            && self.tracking
            && self.cursor_visible
            && !self.cursor_suppressed
    }

    // ── pointer tracking ──────────────────────────────────────

    /// Record the real pointer position.  The first sample snaps the
    /// cursor so it does not fly in from the origin.
    pub fn pointer_moved(&mut self, p: Point) {
        if !self.tracking {
            self.cursor = p;
            self.tracking = true;
        }
        self.pointer = p;
    }

    pub fn pointer_left(&mut self) {
        self.cursor_visible = false;
    }

    pub fn pointer_entered(&mut self) {
        if self.gesture.is_none() {
            self.cursor_visible = true;
        }
    }

    // ── scroll input ──────────────────────────────────────────

    /// Wheel input with the host-reported `delta_y`.
    pub fn wheel(&mut self, delta_y: f64) {
        self.disarm("wheel");
        match self.mode {
            PointerMode::Fine => {
                let target = self.target_scroll_pos + delta_y * self.tuning.wheel_multiplier;
                self.set_target(target);
            }
            PointerMode::Coarse => {
                let offset = self.scroll_pos + delta_y;
                self.jump_to(offset);
            }
        }
    }

    /// Mouse press inside the content region at pointer position `p`.
    pub fn drag_start(&mut self, p: Point) {
        self.disarm("drag");
        self.gesture = Some(Gesture {
            source: GestureSource::Mouse,
            origin: p,
            origin_scroll: self.scroll_pos,
            moved: false,
        });
        self.cursor_visible = false;
    }

    /// Any displacement, horizontal included, turns the press into a drag.
    pub fn drag_move(&mut self, p: Point) {
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };
        if gesture.source != GestureSource::Mouse {
            return;
        }
        if p != gesture.origin {
            gesture.moved = true;
        }
        let offset = gesture.origin_scroll + (gesture.origin.y - p.y);
        self.jump_to(offset);
    }

    pub fn drag_end(&mut self) -> DragOutcome {
        match self.gesture {
            Some(g) if g.source == GestureSource::Mouse => {
                self.gesture = None;
                self.cursor_visible = true;
                if g.moved {
                    DragOutcome::Scrolled
                } else {
                    DragOutcome::Click
                }
            }
            _ => DragOutcome::None,
        }
    }

    /// Touch start with the currently active touch points.  Multi-touch
    /// gestures are left alone.
    pub fn touch_start(&mut self, touches: &[Point]) {
        let [touch] = touches else {
            return;
        };
        self.disarm("touch");
        self.gesture = Some(Gesture {
            source: GestureSource::Touch,
            origin: *touch,
            origin_scroll: self.scroll_pos,
            moved: false,
        });
    }

    pub fn touch_move(&mut self, touches: &[Point]) {
        let [touch] = touches else {
            return;
        };
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };
        if gesture.source != GestureSource::Touch {
            return;
        }
        gesture.moved = true;
        let offset = gesture.origin_scroll + (gesture.origin.y - touch.y);
        self.jump_to(offset);
    }

    pub fn touch_end(&mut self) {
        if matches!(self.gesture, Some(g) if g.source == GestureSource::Touch) {
            self.gesture = None;
        }
    }

    /// The host scrolled the content on its own (keyboard paging,
    /// momentum).  Counts as a user interaction.
    pub fn native_scroll_to(&mut self, offset: f64) {
        self.disarm("native scroll");
        self.jump_to(offset);
    }

    /// Scroll by `delta` through the native path.
    pub fn native_scroll_by(&mut self, delta: f64) {
        let offset = self.scroll_pos + delta;
        self.native_scroll_to(offset);
    }

    // ── geometry changes ──────────────────────────────────────

    /// Viewport resized.  Recomputes bounds and re-clamps everything that
    /// depends on them.
    pub fn resize(&mut self, viewport: Viewport, extent: ScrollExtent) {
        self.viewport = viewport;
        if self.cursor.x > viewport.width {
            self.cursor.x = viewport.width - 10.0;
        }
        if self.cursor.y > viewport.height {
            self.cursor.y = viewport.height - 10.0;
        }
        self.set_extent(extent);
    }

    /// Content or its pane changed size.
    pub fn set_extent(&mut self, extent: ScrollExtent) {
        self.max_scroll = extent.max_scroll();
        self.target_scroll_pos = clamp_offset(self.target_scroll_pos, self.max_scroll);
        self.scroll_pos = clamp_offset(self.scroll_pos, self.max_scroll);
    }

    // ── frame loop ────────────────────────────────────────────

    /// Advance one frame to `now`.  Coarse mode has no frame loop.
    pub fn frame(&mut self, now: Duration) {
        if self.mode == PointerMode::Coarse {
            return;
        }

        for task in self.deferred.drain_due(now) {
            self.run_deferred(task, now);
        }

        let delta = now.saturating_sub(self.last_frame);
        self.last_frame = now;

        if self.tracking {
            let speed = self.tuning.cursor_speed;
            let eased = Point {
                x: self.cursor.x + (self.pointer.x - self.cursor.x) * speed,
                y: self.cursor.y + (self.pointer.y - self.cursor.y) * speed,
            };
            self.cursor = self.viewport.clamp_inset(eased, self.tuning.cursor_inset);
        }

        if self.auto_scroll_enabled && self.max_scroll > 0.0 {
            let step = self.tuning.auto_scroll_speed * delta.as_secs_f64();
            self.target_scroll_pos += step * self.direction.sign();
            if self.target_scroll_pos >= self.max_scroll {
                self.target_scroll_pos = self.max_scroll;
                self.direction = ScrollDirection::Backward;
            } else if self.target_scroll_pos <= 0.0 {
                self.target_scroll_pos = 0.0;
                self.direction = ScrollDirection::Forward;
            }
        }

        self.scroll_pos += (self.target_scroll_pos - self.scroll_pos) * self.tuning.scroll_speed;
        self.scroll_pos = clamp_offset(self.scroll_pos, self.max_scroll);
    }

    // ── internals ─────────────────────────────────────────────

    fn run_deferred(&mut self, task: DeferredTask, now: Duration) {
        if self.user_has_scrolled {
            return;
        }
        match task {
            DeferredTask::ArmAutoScroll => {
                if self.suspended {
                    // The overlay's resume arms it once the overlay is gone.
                    tracing::debug!("auto-scroll arming held by overlay");
                    return;
                }
                self.arm(now);
                tracing::debug!("auto-scroll armed");
            }
            DeferredTask::ResumeAutoScroll { generation } => {
                if generation != self.suspend_generation {
                    return;
                }
                self.suspended = false;
                self.arm(now);
                tracing::debug!("auto-scroll resumed");
            }
        }
    }

    /// Start driving the target.  The first arming nudges the target off
    /// zero so the bounce has somewhere to go.
    fn arm(&mut self, now: Duration) {
        let first = self.auto_scroll_started_at.is_none();
        self.auto_scroll_enabled = true;
        self.auto_scroll_started_at = Some(now);
        if first && self.max_scroll > 0.0 {
            self.set_target(1.0);
        }
    }

    /// User interaction: turn auto-scroll off for good.
    fn disarm(&mut self, source: &str) {
        if !self.user_has_scrolled {
            tracing::debug!(source, "auto-scroll disarmed");
        }
        self.auto_scroll_enabled = false;
        self.user_has_scrolled = true;
    }

    fn set_target(&mut self, target: f64) {
        self.target_scroll_pos = clamp_offset(target, self.max_scroll);
    }

    /// Move both the rendered and target offsets at once.
    fn jump_to(&mut self, offset: f64) {
        self.set_target(offset);
        self.scroll_pos = self.target_scroll_pos;
    }
}

impl ScrollControl for Animator {
    fn cursor_pos(&self) -> Point {
        self.cursor
    }

    fn auto_scroll_enabled(&self) -> bool {
        self.auto_scroll_enabled
    }

    fn user_has_scrolled(&self) -> bool {
        self.user_has_scrolled
    }

    fn set_auto_scroll_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.suspend_generation = self.suspend_generation.wrapping_add(1);
        }
        self.suspended = !enabled;
        self.auto_scroll_enabled = enabled;
    }

    fn schedule_resume(&mut self, now: Duration) {
        if self.mode == PointerMode::Coarse {
            return;
        }
        let generation = self.suspend_generation;
        self.deferred.schedule(
            now,
            self.tuning.resume_delay,
            DeferredTask::ResumeAutoScroll { generation },
        );
    }

    fn resync_scroll(&mut self, offset: f64) {
        self.jump_to(offset);
    }

    fn set_cursor_suppressed(&mut self, suppressed: bool) {
        self.cursor_suppressed = suppressed;
    }
}
