//! Project detail overlay model.
//!
//! Opening the overlay pauses auto-scroll before anything is revealed.
//! Closing resets the content to the top and asks the animator to resume
//! auto-scroll once the close transition is over.

use std::time::Duration;

use super::animator::ScrollControl;
use super::portfolio::{LayoutVariant, Media, MediaKind, Project};

/// Which project (by index) the overlay currently shows.
#[derive(Debug, Clone, Default)]
pub struct DetailView {
    open: Option<usize>,
}

impl DetailView {
    pub fn current(&self) -> Option<usize> {
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Open project `index`.  Ignored while another project is open.
    pub fn open(&mut self, index: usize, control: &mut impl ScrollControl) -> bool {
        if self.open.is_some() {
            return false;
        }
        control.set_auto_scroll_enabled(false);
        self.open = Some(index);
        tracing::debug!(index, "detail view opened");
        true
    }

    pub fn close(&mut self, control: &mut impl ScrollControl, now: Duration) -> bool {
        if self.open.take().is_none() {
            return false;
        }
        control.resync_scroll(0.0);
        control.schedule_resume(now);
        tracing::debug!("detail view closed");
        true
    }
}

/// Arrangement of a project on the detail page.
#[derive(Debug, Clone)]
pub struct DetailLayout<'a> {
    pub variant: LayoutVariant,
    pub lead: Option<&'a Media>,
    pub small: Vec<&'a Media>,
    pub show_text: bool,
    /// Gallery items not already on the page.
    pub more_count: usize,
}

impl<'a> DetailLayout<'a> {
    pub fn for_project(project: &'a Project) -> Self {
        let variant = project.layout;
        let ordered = gallery_order(project);
        let visible = variant.visible_media().min(ordered.len());

        let (lead, small) = match ordered.split_first() {
            Some((lead, rest)) => {
                let small_count = match variant {
                    LayoutVariant::VideoLead => 2,
                    _ => visible.saturating_sub(1),
                };
                (Some(*lead), rest.iter().take(small_count).copied().collect())
            }
            None => (None, Vec::new()),
        };

        let more_count = if variant.gallery_enabled() {
            ordered.len().saturating_sub(1 + small.len())
        } else {
            0
        };

        Self {
            variant,
            lead,
            small,
            show_text: variant != LayoutVariant::Showcase,
            more_count,
        }
    }
}

/// Project media in gallery order.  Video-led projects put their first
/// video in front.
pub fn gallery_order(project: &Project) -> Vec<&Media> {
    let mut ordered: Vec<&Media> = project.media.iter().collect();
    if project.layout == LayoutVariant::VideoLead {
        if let Some(pos) = ordered.iter().position(|m| m.kind == MediaKind::Video) {
            let video = ordered.remove(pos);
            ordered.insert(0, video);
        }
    }
    ordered
}
