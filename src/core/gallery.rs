//! Lightbox gallery model — an ordered list of a project's media with a
//! wrap-around cursor.

use super::animator::ScrollControl;
use super::detail::gallery_order;
use super::portfolio::{Media, Project};

#[derive(Debug, Clone)]
pub struct Gallery {
    items: Vec<Media>,
    index: usize,
}

impl Gallery {
    /// Open `project`'s gallery at `index`.  Returns `None` for layouts
    /// without a gallery and for projects with no media.
    pub fn open(
        project: &Project,
        index: usize,
        control: &mut impl ScrollControl,
    ) -> Option<Self> {
        if !project.layout.gallery_enabled() {
            tracing::debug!(title = %project.title, "gallery disabled for layout");
            return None;
        }
        let items: Vec<Media> = gallery_order(project).into_iter().cloned().collect();
        if items.is_empty() {
            return None;
        }
        let index = index.min(items.len() - 1);
        control.set_cursor_suppressed(true);
        Some(Self { items, index })
    }

    pub fn close(self, control: &mut impl ScrollControl) {
        control.set_cursor_suppressed(false);
    }

    pub fn current(&self) -> &Media {
        &self.items[self.index]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn prev(&mut self) {
        self.index = if self.index > 0 {
            self.index - 1
        } else {
            self.items.len() - 1
        };
    }

    pub fn next(&mut self) {
        self.index = if self.index + 1 < self.items.len() {
            self.index + 1
        } else {
            0
        };
    }

    /// `"3/7"`.
    pub fn counter(&self) -> String {
        format!("{}/{}", self.index + 1, self.items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::animator::{Animator, AnimatorTuning, PointerMode};
    use crate::core::geometry::{Point, ScrollExtent, Viewport};
    use crate::core::portfolio::{LayoutVariant, MediaKind};
    use std::path::PathBuf;
    use std::time::Duration;

    fn animator() -> Animator {
        let mut a = Animator::new(
            PointerMode::Fine,
            AnimatorTuning::default(),
            Viewport::new(800.0, 600.0),
            ScrollExtent::new(600.0, 600.0),
            0.0,
            Duration::ZERO,
        );
        a.pointer_moved(Point::new(10.0, 10.0));
        a
    }

    fn project(layout: LayoutVariant, n: usize) -> Project {
        Project {
            dir: PathBuf::from("p"),
            title: "p".into(),
            description: String::new(),
            year: None,
            layout,
            media: (0..n)
                .map(|i| Media {
                    path: PathBuf::from(format!("{i}.png")),
                    kind: MediaKind::Image,
                })
                .collect(),
        }
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let mut a = animator();
        let mut g = Gallery::open(&project(LayoutVariant::Regular, 3), 0, &mut a).unwrap();
        assert_eq!(g.counter(), "1/3");
        g.prev();
        assert_eq!(g.index, 2);
        g.next();
        assert_eq!(g.index, 0);
        g.next();
        assert_eq!(g.current().name(), "1.png");
    }

    #[test]
    fn open_hides_cursor_and_close_restores_it() {
        let mut a = animator();
        assert!(a.cursor_shown());
        let g = Gallery::open(&project(LayoutVariant::ExtendedGallery, 2), 9, &mut a).unwrap();
        assert_eq!(g.index, 1);
        assert!(!a.cursor_shown());
        g.close(&mut a);
        assert!(a.cursor_shown());
    }

    #[test]
    fn showcase_and_empty_projects_have_no_gallery() {
        let mut a = animator();
        assert!(Gallery::open(&project(LayoutVariant::Showcase, 4), 0, &mut a).is_none());
        assert!(Gallery::open(&project(LayoutVariant::Regular, 0), 0, &mut a).is_none());
        assert!(a.cursor_shown());
    }
}
