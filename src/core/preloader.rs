//! Preloader timeline — three dots blink in turn, a letter takes the third
//! dot's place, then the overlay slides away and the portfolio starts.
//!
//! The timeline is a pure function of elapsed time once the three dots
//! have been picked, so rendering only needs [`Preloader::frame_at`].

use std::time::Duration;

use rand::Rng;

const START_DELAY: Duration = Duration::from_millis(100);
const STEP: Duration = Duration::from_millis(350);
const LETTER_DELAY: Duration = Duration::from_millis(100);
const FINISH_AFTER: Duration = Duration::from_millis(2000);
const SLIDE_DELAY: Duration = Duration::from_millis(50);
const SLIDE_DURATION: Duration = Duration::from_millis(900);

/// Where in its lifecycle the preloader is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PreloaderStage {
    /// Dots on screen, content hidden.
    Animating,
    /// Content visible underneath; overlay still fully covering.
    Revealing,
    /// Overlay sliding away; `progress` in `0.0..=1.0`.
    SlidingOut { progress: f64 },
    /// Overlay gone.
    Done,
}

/// A single rendered preloader frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PreloaderFrame {
    pub stage: PreloaderStage,
    /// Visibility of every dot, indexed like the grid.
    pub dots_visible: Vec<bool>,
    /// Dot whose place the letter takes, once it is showing.
    pub letter_at: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct Preloader {
    dot_count: usize,
    /// The three blinking dots, in blink order.  `None` with fewer than
    /// three dots, in which case the preloader finishes immediately.
    picks: Option<[usize; 3]>,
}

impl Preloader {
    pub fn new<R: Rng + ?Sized>(dot_count: usize, rng: &mut R) -> Self {
        let picks = if dot_count >= 3 {
            let sample = rand::seq::index::sample(rng, dot_count, 3);
            Some([sample.index(0), sample.index(1), sample.index(2)])
        } else {
            None
        };
        Self { dot_count, picks }
    }

    /// Moment the content becomes visible.
    pub fn finish_at(&self) -> Duration {
        match self.picks {
            Some(_) => START_DELAY + FINISH_AFTER,
            None => Duration::ZERO,
        }
    }

    /// Moment the overlay is fully gone.
    pub fn done_at(&self) -> Duration {
        self.finish_at() + SLIDE_DELAY + SLIDE_DURATION
    }

    pub fn frame_at(&self, elapsed: Duration) -> PreloaderFrame {
        let mut dots_visible = vec![true; self.dot_count];
        let mut letter_at = None;

        if let Some([a, b, c]) = self.picks {
            let t0 = START_DELAY;
            if elapsed >= t0 + STEP {
                dots_visible[a] = false;
            }
            if elapsed >= t0 + STEP * 2 {
                dots_visible[a] = true;
                dots_visible[b] = false;
            }
            if elapsed >= t0 + STEP * 3 {
                dots_visible[b] = true;
                dots_visible[c] = false;
            }
            if elapsed >= t0 + STEP * 3 + LETTER_DELAY {
                letter_at = Some(c);
            }
        }

        let finish = self.finish_at();
        let slide_start = finish + SLIDE_DELAY;
        let stage = if elapsed < finish {
            PreloaderStage::Animating
        } else if elapsed < slide_start {
            PreloaderStage::Revealing
        } else if elapsed < self.done_at() {
            let into = (elapsed - slide_start).as_secs_f64();
            PreloaderStage::SlidingOut {
                progress: (into / SLIDE_DURATION.as_secs_f64()).clamp(0.0, 1.0),
            }
        } else {
            PreloaderStage::Done
        };

        PreloaderFrame {
            stage,
            dots_visible,
            letter_at,
        }
    }
}
