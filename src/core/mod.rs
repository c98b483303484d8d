//! Core model — animation, timing, portfolio data, overlay state.
//!
//! Nothing in this module depends on any TUI or rendering crate, and all
//! time is passed in explicitly so every behaviour is testable with
//! synthetic clocks.

pub mod animator;
pub mod clock;
pub mod deferred;
pub mod detail;
pub mod gallery;
pub mod geometry;
pub mod portfolio;
pub mod preloader;
