//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* data structures and turns them into cells on
//! the terminal.  No filesystem I/O happens here.

pub mod cards;
pub mod cursor;
pub mod detail;
pub mod image;
pub mod layout;
pub mod lightbox;
pub mod preloader;
pub mod theme;
