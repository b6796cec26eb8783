use image::{Rgb, RgbImage};

/// Bright disc ("coin") on a dark flat background.
pub fn coin_rgb(width: u32, height: u32, center: [f32; 2], radius: f32) -> RgbImage {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    RgbImage::from_fn(width, height, |x, y| {
        let dx = x as f32 - center[0];
        let dy = y as f32 - center[1];
        if (dx * dx + dy * dy).sqrt() <= radius {
            Rgb([225, 190, 70])
        } else {
            Rgb([18, 18, 24])
        }
    })
}

/// Featureless image: no edges, hence no circles.
pub fn blank_rgb(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([90, 90, 90]))
}

/// Pixels encode their own coordinates so crop placement can be checked exactly.
pub fn coordinate_rgb(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 7]))
}
