//! Shared test utilities for image-based unit tests.

use image::{GrayImage, Luma, Rgb, RgbImage};

/// Render a filled disc on a flat background.
///
/// Pixels at distance `d <= radius` from `center` get `disc_pix`, all others `bg_pix`.
pub(crate) fn draw_disc_rgb(
    w: u32,
    h: u32,
    center: [f32; 2],
    radius: f32,
    disc_pix: [u8; 3],
    bg_pix: [u8; 3],
) -> RgbImage {
    let mut img = RgbImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let dx = x as f32 - center[0];
            let dy = y as f32 - center[1];
            let d = (dx * dx + dy * dy).sqrt();
            let pix = if d <= radius { disc_pix } else { bg_pix };
            img.put_pixel(x, y, Rgb(pix));
        }
    }
    img
}

/// Grayscale variant of [`draw_disc_rgb`].
pub(crate) fn draw_disc_gray(
    w: u32,
    h: u32,
    center: [f32; 2],
    radius: f32,
    disc_pix: u8,
    bg_pix: u8,
) -> GrayImage {
    let mut img = GrayImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let dx = x as f32 - center[0];
            let dy = y as f32 - center[1];
            let pix = if (dx * dx + dy * dy).sqrt() <= radius {
                disc_pix
            } else {
                bg_pix
            };
            img.put_pixel(x, y, Luma([pix]));
        }
    }
    img
}

/// A source image whose pixels encode their own coordinates, so crops can be
/// checked for exact placement.
pub(crate) fn coordinate_image(w: u32, h: u32) -> RgbImage {
    RgbImage::from_fn(w, h, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 7]))
}

/// Fresh empty directory under the system temp dir, removed on drop.
pub(crate) struct TempDir(std::path::PathBuf);

impl TempDir {
    pub(crate) fn new(tag: &str) -> Self {
        use std::sync::atomic::{AtomicUsize, Ordering};
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "circlecrop-unit-{tag}-{}-{n}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&path);
        std::fs::create_dir_all(&path).expect("create temp dir");
        Self(path)
    }

    pub(crate) fn path(&self) -> &std::path::Path {
        &self.0
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}
