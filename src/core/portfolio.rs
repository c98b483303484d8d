//! Portfolio loading — one project per subdirectory.
//!
//! ```text
//! portfolio/
//!   01-mindplug/
//!     project.toml      # optional: title, description, year, layout
//!     cover.jpg
//!     detail-1.png
//!   02-calendar/
//!     ...
//! ```
//!
//! Media files are classified by content, not extension.  Everything else
//! in a project directory is ignored.

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

const MANIFEST: &str = "project.toml";

#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error("portfolio directory {0} does not exist")]
    Missing(PathBuf),
    #[error("no projects found under {0}")]
    Empty(PathBuf),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    pub path: PathBuf,
    pub kind: MediaKind,
}

impl Media {
    pub fn name(&self) -> String {
        file_name(&self.path)
    }
}

/// How the detail overlay arranges a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutVariant {
    /// Large visual, two small visuals, text, gallery.
    #[default]
    Regular,
    /// A video leads, exactly two small visuals follow.
    VideoLead,
    /// Three visuals on the page, every file in the gallery.
    ExtendedGallery,
    /// Visuals only; no gallery.
    Showcase,
}

impl LayoutVariant {
    fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "regular" => Some(Self::Regular),
            "video_lead" | "video-lead" => Some(Self::VideoLead),
            "extended_gallery" | "extended-gallery" => Some(Self::ExtendedGallery),
            "showcase" => Some(Self::Showcase),
            _ => None,
        }
    }

    /// Layout used by a few well-known project titles.
    fn for_title(title: &str) -> Self {
        match title.trim().to_lowercase().as_str() {
            "mindplug" | "song poster" | "vintage" | "terracotta" => Self::Showcase,
            "music zine" => Self::ExtendedGallery,
            "a calendar for korean laboring folks" => Self::VideoLead,
            _ => Self::Regular,
        }
    }

    pub fn gallery_enabled(self) -> bool {
        self != Self::Showcase
    }

    /// Media items laid out on the detail page itself.
    pub fn visible_media(self) -> usize {
        match self {
            Self::Regular | Self::VideoLead | Self::ExtendedGallery => 3,
            Self::Showcase => 4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Project {
    pub dir: PathBuf,
    pub title: String,
    pub description: String,
    pub year: Option<String>,
    pub layout: LayoutVariant,
    /// Media sorted by file name.  The first item is the cover.
    pub media: Vec<Media>,
}

impl Project {
    pub fn cover(&self) -> Option<&Media> {
        self.media.first()
    }
}

#[derive(Debug, Clone)]
pub struct Portfolio {
    pub root: PathBuf,
    pub projects: Vec<Project>,
}

/// Load every project directory directly under `root`.
pub fn load_portfolio(root: &Path) -> Result<Portfolio, PortfolioError> {
    if !root.is_dir() {
        return Err(PortfolioError::Missing(root.to_path_buf()));
    }

    let mut projects = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e.path()))
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!("skipping unreadable entry: {e}");
                continue;
            }
        };
        if entry.file_type().is_dir() {
            projects.push(load_project(entry.path())?);
        }
    }

    if projects.is_empty() {
        return Err(PortfolioError::Empty(root.to_path_buf()));
    }
    tracing::info!(count = projects.len(), root = %root.display(), "portfolio loaded");
    Ok(Portfolio {
        root: root.to_path_buf(),
        projects,
    })
}

fn load_project(dir: &Path) -> Result<Project, PortfolioError> {
    let mut manifest = Manifest::default();
    let manifest_path = dir.join(MANIFEST);
    if manifest_path.is_file() {
        let contents =
            std::fs::read_to_string(&manifest_path).map_err(|source| PortfolioError::Io {
                path: manifest_path.clone(),
                source,
            })?;
        manifest = Manifest::parse(&contents);
    }

    let mut media = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .flatten()
    {
        if !entry.file_type().is_file() || is_hidden(entry.path()) {
            continue;
        }
        if let Some(kind) = classify_media(entry.path()) {
            media.push(Media {
                path: entry.path().to_path_buf(),
                kind,
            });
        }
    }

    let title = manifest
        .title
        .unwrap_or_else(|| default_title(&file_name(dir)));
    let layout = manifest
        .layout
        .unwrap_or_else(|| LayoutVariant::for_title(&title));

    Ok(Project {
        dir: dir.to_path_buf(),
        title,
        description: manifest.description.unwrap_or_default(),
        year: manifest.year,
        layout,
        media,
    })
}

#[derive(Debug, Default)]
struct Manifest {
    title: Option<String>,
    description: Option<String>,
    year: Option<String>,
    layout: Option<LayoutVariant>,
}

impl Manifest {
    fn parse(s: &str) -> Self {
        let mut m = Manifest::default();
        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim().trim_matches('"').to_string();
            match key.trim() {
                "title" => m.title = Some(value),
                "description" => m.description = Some(value.replace("\\n", "\n")),
                "year" => m.year = Some(value),
                "layout" => m.layout = LayoutVariant::from_config_key(&value),
                _ => {}
            }
        }
        m
    }
}

fn classify_media(path: &Path) -> Option<MediaKind> {
    // Content sniffing first; fall back to the extension for files the
    // magic database does not recognise.
    if let Some(mime) = tree_magic_mini::from_filepath(path) {
        if mime.starts_with("image/") {
            return Some(MediaKind::Image);
        }
        if mime.starts_with("video/") {
            return Some(MediaKind::Video);
        }
    }
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp" => Some(MediaKind::Image),
        "mp4" | "webm" | "mov" => Some(MediaKind::Video),
        _ => None,
    }
}

/// `02-song_poster` → `song poster`.
fn default_title(dir_name: &str) -> String {
    let trimmed = dir_name.trim_start_matches(|c: char| c.is_ascii_digit() || c == '-' || c == '_');
    let base = if trimmed.is_empty() { dir_name } else { trimmed };
    base.replace(['_', '-'], " ")
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}
