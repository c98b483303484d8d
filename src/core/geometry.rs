//! Continuous 2-D geometry in virtual pixels.

/// A point in virtual-pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Visible area the cursor and content live in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Clamp `p` so it stays `inset` away from every edge.
    ///
    /// When the viewport is narrower than two insets the axis collapses to
    /// its midpoint.
    pub fn clamp_inset(&self, p: Point, inset: f64) -> Point {
        Point::new(
            clamp_axis(p.x, inset, self.width),
            clamp_axis(p.y, inset, self.height),
        )
    }
}

fn clamp_axis(v: f64, inset: f64, extent: f64) -> f64 {
    let lo = inset;
    let hi = extent - inset;
    if hi < lo {
        return extent / 2.0;
    }
    v.clamp(lo, hi)
}

/// Scrollable content inside a pane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollExtent {
    /// Full content height.
    pub content: f64,
    /// Height of the pane showing it.
    pub visible: f64,
}

impl ScrollExtent {
    pub fn new(content: f64, visible: f64) -> Self {
        Self { content, visible }
    }

    /// Largest valid scroll offset; zero when everything fits.
    pub fn max_scroll(&self) -> f64 {
        (self.content - self.visible).max(0.0)
    }
}

/// Clamp `v` into `[0, max]`, treating a negative `max` as zero.
pub fn clamp_offset(v: f64, max: f64) -> f64 {
    if !v.is_finite() {
        return 0.0;
    }
    v.clamp(0.0, max.max(0.0))
}

/// Cell ↔ virtual-pixel mapping for a terminal grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub cell_width: f64,
    pub cell_height: f64,
}

impl CellMetrics {
    pub fn new(cell_width: f64, cell_height: f64) -> Self {
        Self {
            cell_width: cell_width.max(1.0),
            cell_height: cell_height.max(1.0),
        }
    }

    /// Centre of the cell at `(col, row)`.
    pub fn cell_center(&self, col: u16, row: u16) -> Point {
        Point::new(
            col as f64 * self.cell_width + self.cell_width / 2.0,
            row as f64 * self.cell_height + self.cell_height / 2.0,
        )
    }

    /// Cell containing `p`, or `None` when `p` is left of / above the grid.
    pub fn cell_at(&self, p: Point) -> Option<(u16, u16)> {
        if p.x < 0.0 || p.y < 0.0 {
            return None;
        }
        let col = (p.x / self.cell_width).floor();
        let row = (p.y / self.cell_height).floor();
        if col > u16::MAX as f64 || row > u16::MAX as f64 {
            return None;
        }
        Some((col as u16, row as u16))
    }

    /// Viewport covering `cols × rows` cells.
    pub fn viewport(&self, cols: u16, rows: u16) -> Viewport {
        Viewport::new(
            cols as f64 * self.cell_width,
            rows as f64 * self.cell_height,
        )
    }

    pub fn rows_to_px(&self, rows: usize) -> f64 {
        rows as f64 * self.cell_height
    }

    /// Whole rows covered by a scroll offset.
    pub fn px_to_rows(&self, px: f64) -> usize {
        if px <= 0.0 {
            0
        } else {
            (px / self.cell_height).floor() as usize
        }
    }
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self::new(8.0, 16.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_inset_keeps_point_inside_margins() {
        let vp = Viewport::new(100.0, 50.0);
        let p = vp.clamp_inset(Point::new(-20.0, 80.0), 5.0);
        assert_eq!(p, Point::new(5.0, 45.0));
    }

    #[test]
    fn clamp_inset_collapses_tiny_viewport() {
        let vp = Viewport::new(6.0, 100.0);
        let p = vp.clamp_inset(Point::new(0.0, 50.0), 5.0);
        assert_eq!(p.x, 3.0);
        assert_eq!(p.y, 50.0);
    }

    #[test]
    fn clamp_offset_handles_negative_max_and_nan() {
        assert_eq!(clamp_offset(12.0, -4.0), 0.0);
        assert_eq!(clamp_offset(f64::NAN, 10.0), 0.0);
        assert_eq!(clamp_offset(1e9, 10.0), 10.0);
    }

    #[test]
    fn max_scroll_is_never_negative() {
        assert_eq!(ScrollExtent::new(1600.0, 600.0).max_scroll(), 1000.0);
        assert_eq!(ScrollExtent::new(100.0, 600.0).max_scroll(), 0.0);
    }

    #[test]
    fn cell_mapping_round_trips_through_centre() {
        let m = CellMetrics::default();
        let c = m.cell_center(3, 7);
        assert_eq!(c, Point::new(28.0, 120.0));
        assert_eq!(m.cell_at(c), Some((3, 7)));
        assert_eq!(m.cell_at(Point::new(-1.0, 0.0)), None);
    }

    #[test]
    fn px_to_rows_floors() {
        let m = CellMetrics::default();
        assert_eq!(m.px_to_rows(0.0), 0);
        assert_eq!(m.px_to_rows(31.9), 1);
        assert_eq!(m.px_to_rows(32.0), 2);
    }
}
