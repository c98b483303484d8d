//! Half-block image painting and media placeholders.
//!
//! Each terminal cell shows two vertically stacked pixels: the upper one
//! as the `▀` foreground, the lower one as the background.

use image::imageops::FilterType;
use image::RgbaImage;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Color,
};

use crate::app::media_runtime::MediaSlot;
use crate::core::portfolio::{Media, MediaKind};

use super::theme::Theme;

/// A region that may extend above or below the visible clip area.
#[derive(Debug, Clone, Copy)]
pub struct VirtualRect {
    pub x: u16,
    /// Top row; negative when scrolled partly out of view.
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl VirtualRect {
    pub fn from_rect(r: Rect) -> Self {
        Self {
            x: r.x,
            y: r.y as i32,
            width: r.width,
            height: r.height,
        }
    }

    /// Screen rows of this region that fall inside `clip`, paired with
    /// their row index inside the region.
    fn visible_rows(&self, clip: Rect) -> impl Iterator<Item = (u16, u16)> + '_ {
        let top = clip.y as i32;
        let bottom = top + clip.height as i32;
        let y0 = self.y;
        (0..self.height).filter_map(move |i| {
            let y = y0 + i as i32;
            (y >= top && y < bottom).then_some((i, y as u16))
        })
    }
}

/// Paint `img` fitted (aspect preserved, centred horizontally) into
/// `target`, writing only rows inside `clip`.
pub fn paint_halfblocks(img: &RgbaImage, target: VirtualRect, clip: Rect, buf: &mut Buffer) {
    if target.width == 0 || target.height == 0 || img.width() == 0 || img.height() == 0 {
        return;
    }

    // Available pixel budget: each column = 1 px wide, each row = 2 px tall.
    let max_px_w = target.width as f64;
    let max_px_h = target.height as f64 * 2.0;
    let src_w = img.width() as f64;
    let src_h = img.height() as f64;

    let scale = (max_px_w / src_w).min(max_px_h / src_h);
    let fit_w = (src_w * scale).round().max(1.0) as u32;
    let fit_h = (src_h * scale).round().max(1.0) as u32;

    let rgba = image::imageops::resize(img, fit_w, fit_h, FilterType::Triangle);
    let (iw, ih) = (rgba.width(), rgba.height());
    let col_offset = target.width.saturating_sub(iw as u16) / 2;
    let clip_right = clip.x.saturating_add(clip.width);

    for (row, y) in target.visible_rows(clip) {
        let yt = row as u32 * 2;
        let yb = yt + 1;
        if yt >= ih {
            break;
        }
        for col in 0..iw.min(target.width as u32) {
            let x = target.x + col_offset + col as u16;
            if x < clip.x || x >= clip_right {
                continue;
            }
            let t = rgba.get_pixel(col, yt);
            let fg = Color::Rgb(t[0], t[1], t[2]);
            let bg = if yb < ih {
                let b = rgba.get_pixel(col, yb);
                Color::Rgb(b[0], b[1], b[2])
            } else {
                Color::Reset
            };
            if let Some(cell) = buf.cell_mut(Position::new(x, y)) {
                cell.set_char('▀').set_fg(fg).set_bg(bg);
            }
        }
    }
}

/// Shaded box with a centred label, used when no decoded image exists.
pub fn paint_placeholder(label: &str, target: VirtualRect, clip: Rect, buf: &mut Buffer) {
    let style = Theme::placeholder_style();
    let clip_right = clip.x.saturating_add(clip.width);
    let mid = target.height / 2;
    for (row, y) in target.visible_rows(clip) {
        for col in 0..target.width {
            let x = target.x + col;
            if x < clip.x || x >= clip_right {
                continue;
            }
            if let Some(cell) = buf.cell_mut(Position::new(x, y)) {
                cell.set_char('░').set_style(style);
            }
        }
        if row == mid && !label.is_empty() {
            let width = label.chars().count() as u16;
            let x = target.x + target.width.saturating_sub(width) / 2;
            let avail = clip_right.saturating_sub(x).min(target.width) as usize;
            if x >= clip.x && avail > 0 {
                buf.set_stringn(x, y, label, avail, style);
            }
        }
    }
}

/// Paint `media` using whatever the cache holds for it.
pub fn paint_media(
    media: Option<&Media>,
    slot: Option<&MediaSlot>,
    target: VirtualRect,
    clip: Rect,
    buf: &mut Buffer,
) {
    let Some(media) = media else {
        paint_placeholder("no media", target, clip, buf);
        return;
    };
    if media.kind == MediaKind::Video {
        paint_placeholder("▶ video", target, clip, buf);
        return;
    }
    match slot {
        Some(MediaSlot::Ready(img)) => paint_halfblocks(img, target, clip, buf),
        Some(MediaSlot::Failed) => paint_placeholder("no preview", target, clip, buf),
        Some(MediaSlot::Pending) | None => paint_placeholder("loading…", target, clip, buf),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn rows_above_the_clip_are_skipped() {
        let img = RgbaImage::from_pixel(4, 8, Rgba([255, 0, 0, 255]));
        let clip = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(clip);
        let target = VirtualRect {
            x: 0,
            y: -2,
            width: 4,
            height: 4,
        };
        paint_halfblocks(&img, target, clip, &mut buf);
        for y in 0..2 {
            for x in 0..4 {
                assert_eq!(buf[(x, y)].symbol(), "▀");
                assert_eq!(buf[(x, y)].fg, Color::Rgb(255, 0, 0));
            }
        }
    }

    #[test]
    fn placeholder_label_is_centred() {
        let clip = Rect::new(0, 0, 12, 3);
        let mut buf = Buffer::empty(clip);
        paint_placeholder("video", VirtualRect::from_rect(clip), clip, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "░");
        let row: String = (0..12).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert_eq!(row, "░░░video░░░░");
    }
}
