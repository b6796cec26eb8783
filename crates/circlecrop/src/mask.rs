//! Alpha masking of a detected disc.

use image::{GrayImage, Luma, Rgba, RgbaImage, RgbImage};

use crate::Circle;

const OPAQUE: u8 = u8::MAX;

/// Binary mask of the image extent: opaque inside the circle's disc, transparent elsewhere.
pub fn build_mask(width: u32, height: u32, circle: &Circle) -> GrayImage {
    let mut mask = GrayImage::new(width, height);
    match drawable_geometry(width, height, circle) {
        Some((center, radius)) => {
            imageproc::drawing::draw_filled_circle_mut(&mut mask, center, radius, Luma([OPAQUE]))
        }
        None => fill_disc_exact(&mut mask, circle),
    }
    mask
}

/// Center and radius as `i32` when they stay within a few image extents.
fn drawable_geometry(width: u32, height: u32, circle: &Circle) -> Option<((i32, i32), i32)> {
    let extent = 4 * u64::from(width.max(height));
    let near = |v: u32| u64::from(v) <= extent;
    if !(near(circle.center_x) && near(circle.center_y) && near(circle.radius)) {
        return None;
    }
    let cx = i32::try_from(circle.center_x).ok()?;
    let cy = i32::try_from(circle.center_y).ok()?;
    let r = i32::try_from(circle.radius).ok()?;
    Some(((cx, cy), r))
}

/// Per-pixel disc test in wide integers, for geometry far outside the image.
fn fill_disc_exact(mask: &mut GrayImage, circle: &Circle) {
    let r = i128::from(circle.radius);
    let r_sq = r * r;
    for (x, y, p) in mask.enumerate_pixels_mut() {
        let dx = i128::from(x) - i128::from(circle.center_x);
        let dy = i128::from(y) - i128::from(circle.center_y);
        if dx * dx + dy * dy <= r_sq {
            *p = Luma([OPAQUE]);
        }
    }
}

/// Copy the color channels of `src` and take alpha from `mask`.
///
/// `mask` must have the same dimensions as `src`.
pub fn apply_mask(src: &RgbImage, mask: &GrayImage) -> RgbaImage {
    debug_assert_eq!(src.dimensions(), mask.dimensions());
    RgbaImage::from_fn(src.width(), src.height(), |x, y| {
        let [r, g, b] = src.get_pixel(x, y).0;
        Rgba([r, g, b, mask.get_pixel(x, y)[0]])
    })
}

/// Mask `src` with the disc of `circle`.
pub fn mask_circle(src: &RgbImage, circle: &Circle) -> RgbaImage {
    let mask = build_mask(src.width(), src.height(), circle);
    apply_mask(src, &mask)
}
