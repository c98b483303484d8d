//! User configuration — key bindings and motion tuning.
//!
//! Read from a simple key-value text file at
//! `$XDG_CONFIG_HOME/folio/config.toml` (default `~/.config/folio/config.toml`).
//! The file is never written; missing or malformed entries fall back to
//! defaults.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::animator::AnimatorTuning;
use crate::core::geometry::CellMetrics;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    OpenProject,
    CloseOverlay,
    OpenGallery,
    GalleryPrev,
    GalleryNext,
    Quit,
}

impl Action {
    fn from_config_key(s: &str) -> Option<Self> {
        match s {
            "scroll_up" => Some(Action::ScrollUp),
            "scroll_down" => Some(Action::ScrollDown),
            "page_up" => Some(Action::PageUp),
            "page_down" => Some(Action::PageDown),
            "top" => Some(Action::Top),
            "bottom" => Some(Action::Bottom),
            "open_project" => Some(Action::OpenProject),
            "close_overlay" => Some(Action::CloseOverlay),
            "open_gallery" => Some(Action::OpenGallery),
            "gallery_prev" => Some(Action::GalleryPrev),
            "gallery_next" => Some(Action::GalleryNext),
            "quit" => Some(Action::Quit),
            _ => None,
        }
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Only CTRL/ALT/SHIFT are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"Esc"`, `"Ctrl+c"`, `"g"`).
    pub fn display(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Backspace => "Bksp".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        });
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "backspace" | "bksp" => KeyCode::Backspace,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => {
                let n: u8 = s[1..].parse().ok()?;
                KeyCode::F(n)
            }
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    pub tuning: AnimatorTuning,
    pub cells: CellMetrics,
    /// Virtual pixels reported per wheel notch.
    pub wheel_delta: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            tuning: AnimatorTuning::default(),
            cells: CellMetrics::default(),
            wheel_delta: 100.0,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(ScrollUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(ScrollDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Action::PageUp, vec![KeyBind::new(KeyCode::PageUp, n)]);
        m.insert(Action::PageDown, vec![KeyBind::new(KeyCode::PageDown, n), KeyBind::new(Char(' '), n)]);
        m.insert(Top, vec![KeyBind::new(Home, n)]);
        m.insert(Bottom, vec![KeyBind::new(End, n)]);
        m.insert(OpenProject, vec![KeyBind::new(Enter, n)]);
        m.insert(CloseOverlay, vec![KeyBind::new(Esc, n), KeyBind::new(Backspace, n)]);
        m.insert(OpenGallery, vec![KeyBind::new(Char('g'), n)]);
        m.insert(GalleryPrev, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(GalleryNext, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Find the action that matches a key event.  When several bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Short display of the first binding only (for the status bar).
    pub fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::parse(&contents)
            }
            Err(_) => Self::default(),
        }
    }

    fn parse(s: &str) -> Self {
        let mut config = Self::default();
        let mut cell_w = config.cells.cell_width;
        let mut cell_h = config.cells.cell_height;

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            // Numeric tunables are bounded so a typo cannot freeze or
            // fling the animation.
            let num = |lo: f64, hi: f64| value.parse::<f64>().ok().map(|v| v.clamp(lo, hi));
            let millis = |hi: u64| {
                value
                    .parse::<u64>()
                    .ok()
                    .map(|v| Duration::from_millis(v.min(hi)))
            };
            let t = &mut config.tuning;
            match key {
                "cursor_speed" => t.cursor_speed = num(0.01, 1.0).unwrap_or(t.cursor_speed),
                "scroll_speed" => t.scroll_speed = num(0.01, 1.0).unwrap_or(t.scroll_speed),
                "wheel_multiplier" => {
                    t.wheel_multiplier = num(0.0, 10.0).unwrap_or(t.wheel_multiplier)
                }
                "auto_scroll_speed" => {
                    t.auto_scroll_speed = num(0.0, 1000.0).unwrap_or(t.auto_scroll_speed)
                }
                "auto_scroll_delay_ms" => {
                    t.auto_scroll_delay = millis(60_000).unwrap_or(t.auto_scroll_delay)
                }
                "resume_delay_ms" => t.resume_delay = millis(60_000).unwrap_or(t.resume_delay),
                "cursor_inset" => t.cursor_inset = num(0.0, 100.0).unwrap_or(t.cursor_inset),
                "cell_width_px" => cell_w = num(1.0, 64.0).unwrap_or(cell_w),
                "cell_height_px" => cell_h = num(1.0, 64.0).unwrap_or(cell_h),
                "wheel_delta" => config.wheel_delta = num(1.0, 1000.0).unwrap_or(config.wheel_delta),
                _ => {
                    let Some(action) = Action::from_config_key(key) else {
                        continue;
                    };
                    let parsed: Vec<KeyBind> = value
                        .split(',')
                        .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                        .collect();
                    if !parsed.is_empty() {
                        config.bindings.insert(action, parsed);
                    }
                }
            }
        }

        config.cells = CellMetrics::new(cell_w, cell_h);
        config
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/folio/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join(env!("CARGO_PKG_NAME")).join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn defaults_match_common_keys() {
        let c = AppConfig::default();
        assert_eq!(c.match_key(key(KeyCode::Esc, KeyModifiers::NONE)), Some(Action::CloseOverlay));
        assert_eq!(c.match_key(key(KeyCode::Char('g'), KeyModifiers::NONE)), Some(Action::OpenGallery));
        assert_eq!(c.match_key(key(KeyCode::Char('g'), KeyModifiers::ALT)), None);
        assert_eq!(c.tuning, AnimatorTuning::default());
    }

    #[test]
    fn parse_overrides_tuning_and_bindings() {
        let c = AppConfig::parse(
            "# folio\n\
             [motion]\n\
             cursor_speed = 0.5\n\
             scroll_speed = 7\n\
             auto_scroll_delay_ms = 250\n\
             cell_height_px = 20\n\
             wheel_delta = abc\n\
             quit = Ctrl+x, \"Q\"\n\
             unknown = 3\n",
        );
        assert_eq!(c.tuning.cursor_speed, 0.5);
        assert_eq!(c.tuning.scroll_speed, 1.0);
        assert_eq!(c.tuning.auto_scroll_delay, Duration::from_millis(250));
        assert_eq!(c.cells.cell_height, 20.0);
        assert_eq!(c.wheel_delta, 100.0);
        assert_eq!(
            c.match_key(key(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(c.match_key(key(KeyCode::Char('Q'), KeyModifiers::NONE)), Some(Action::Quit));
        assert_eq!(c.match_key(key(KeyCode::Char('q'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn key_display_is_compact() {
        let b = KeyBind::parse("Ctrl+PgDn").unwrap();
        assert_eq!(b.display(), "Ctrl+PgDn");
        assert!(KeyBind::parse("Hyper+x").is_none());
    }
}
