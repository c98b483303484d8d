//! Frame clock — the "run once per refresh" time source.
//!
//! All animation timestamps are [`Duration`]s since the clock started, so
//! tests can drive the animator with synthetic time.

use std::time::{Duration, Instant};

/// Monotonic time source sampled once per frame.
pub trait FrameClock {
    /// Time elapsed since the clock started.
    fn now(&self) -> Duration;
}

/// Wall-clock implementation backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl FrameClock for MonotonicClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Manually advanced clock for tests.  Clones share the same time.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: std::rc::Rc<std::cell::Cell<Duration>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

#[cfg(test)]
impl FrameClock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}
