//! Background image decoding so the frame loop never blocks on I/O.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use image::RgbaImage;
use tokio::sync::mpsc;

/// Longest edge kept after decoding.  Cards and the lightbox never need
/// more than this many half-block pixels.
const MAX_DECODED_EDGE: u32 = 320;

pub struct MediaUpdate {
    pub path: PathBuf,
    pub result: anyhow::Result<RgbaImage>,
}

/// What the cache knows about one media file.
#[derive(Debug, Clone)]
pub enum MediaSlot {
    Pending,
    Ready(Arc<RgbaImage>),
    Failed,
}

/// Decoded thumbnails, keyed by path.
#[derive(Debug, Default)]
pub struct MediaCache {
    slots: HashMap<PathBuf, MediaSlot>,
}

impl MediaCache {
    pub fn get(&self, path: &Path) -> Option<&MediaSlot> {
        self.slots.get(path)
    }

    /// Start decoding `path` unless it is already known.
    pub fn request(&mut self, path: &Path, tx: &mpsc::UnboundedSender<MediaUpdate>) {
        if self.slots.contains_key(path) {
            return;
        }
        self.slots.insert(path.to_path_buf(), MediaSlot::Pending);
        spawn_decode(tx.clone(), path.to_path_buf());
    }

    pub fn apply(&mut self, update: MediaUpdate) {
        let slot = match update.result {
            Ok(img) => MediaSlot::Ready(Arc::new(img)),
            Err(e) => {
                tracing::warn!(path = %update.path.display(), "decode failed: {e:#}");
                MediaSlot::Failed
            }
        };
        self.slots.insert(update.path, slot);
    }
}

pub fn spawn_decode(tx: mpsc::UnboundedSender<MediaUpdate>, path: PathBuf) {
    std::thread::spawn(move || {
        let result = decode_thumbnail(&path);
        let _ = tx.send(MediaUpdate { path, result });
    });
}

fn decode_thumbnail(path: &Path) -> anyhow::Result<RgbaImage> {
    let img = image::open(path).with_context(|| format!("opening {}", path.display()))?;
    Ok(img.thumbnail(MAX_DECODED_EDGE, MAX_DECODED_EDGE).to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_and_ready_updates_land_in_slots() {
        let mut cache = MediaCache::default();
        cache.apply(MediaUpdate {
            path: PathBuf::from("a.png"),
            result: Err(anyhow::anyhow!("broken")),
        });
        cache.apply(MediaUpdate {
            path: PathBuf::from("b.png"),
            result: Ok(RgbaImage::new(2, 2)),
        });
        assert!(matches!(cache.get(Path::new("a.png")), Some(MediaSlot::Failed)));
        assert!(matches!(cache.get(Path::new("b.png")), Some(MediaSlot::Ready(_))));
        assert!(cache.get(Path::new("c.png")).is_none());
    }

    #[test]
    fn undecodable_file_reports_an_error() {
        let path = std::env::temp_dir().join(format!("folio-bad-{}.png", std::process::id()));
        std::fs::write(&path, b"definitely not png").unwrap();
        assert!(decode_thumbnail(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn request_decodes_in_background() {
        let path = std::env::temp_dir().join(format!("folio-ok-{}.png", std::process::id()));
        RgbaImage::from_pixel(600, 300, image::Rgba([1, 2, 3, 255]))
            .save(&path)
            .unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut cache = MediaCache::default();
        cache.request(&path, &tx);
        cache.request(&path, &tx);
        assert!(matches!(cache.get(&path), Some(MediaSlot::Pending)));

        let update = rx.recv().await.unwrap();
        cache.apply(update);
        match cache.get(&path) {
            Some(MediaSlot::Ready(img)) => assert_eq!((img.width(), img.height()), (320, 160)),
            other => panic!("unexpected slot {other:?}"),
        }
        assert!(rx.try_recv().is_err());
        let _ = std::fs::remove_file(&path);
    }
}
