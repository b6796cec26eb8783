//! Bounding-square crop of a masked circle.
//!
//! The square `[cx - r, cx + r) × [cy - r, cy + r)` is clamped to the image. A
//! circle near the border therefore yields a truncated, off-center crop instead
//! of a slice that wraps to the opposite edge.

use image::RgbaImage;

use crate::Circle;

/// Axis-aligned crop rectangle in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// True when clamping cut the bounding square.
    pub truncated: bool,
}

impl CropRect {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Masked crop of one circle, ready for export.
#[derive(Debug, Clone)]
pub struct CroppedCircle {
    pub circle: Circle,
    pub rect: CropRect,
    pub image: RgbaImage,
}

/// Bounding square of `circle`, clamped to a `width × height` image.
pub fn crop_bounds(circle: &Circle, width: u32, height: u32) -> CropRect {
    let r = circle.radius as u64;
    let clamp_axis = |center: u32, extent: u32| {
        let lo = (center as u64).saturating_sub(r).min(extent as u64);
        let hi = (center as u64 + r).min(extent as u64);
        (lo as u32, (hi - lo) as u32)
    };
    let (x, w) = clamp_axis(circle.center_x, width);
    let (y, h) = clamp_axis(circle.center_y, height);
    let side = 2 * circle.radius as u64;
    CropRect {
        x,
        y,
        width: w,
        height: h,
        truncated: w as u64 != side || h as u64 != side,
    }
}

/// Slice `masked` to the clamped bounding square of `circle`.
pub fn crop_circle(masked: &RgbaImage, circle: &Circle) -> CroppedCircle {
    let rect = crop_bounds(circle, masked.width(), masked.height());
    let image = image::imageops::crop_imm(masked, rect.x, rect.y, rect.width, rect.height)
        .to_image();
    CroppedCircle {
        circle: *circle,
        rect,
        image,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn coordinate_rgba(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| Rgba([(x % 256) as u8, (y % 256) as u8, 0, 255]))
    }

    #[test]
    fn inside_circle_gives_exact_square() {
        let rect = crop_bounds(&Circle::new(400, 400, 200), 800, 800);
        assert_eq!(
            rect,
            CropRect {
                x: 200,
                y: 200,
                width: 400,
                height: 400,
                truncated: false
            }
        );
    }

    #[test]
    fn square_touching_all_edges_is_not_truncated() {
        let rect = crop_bounds(&Circle::new(100, 100, 100), 200, 200);
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (0, 0, 200, 200));
        assert!(!rect.truncated);
    }

    #[test]
    fn top_left_overflow_is_clamped_not_wrapped() {
        let rect = crop_bounds(&Circle::new(30, 50, 100), 400, 300);
        assert_eq!((rect.x, rect.y), (0, 0));
        assert_eq!((rect.width, rect.height), (130, 150));
        assert!(rect.truncated);
    }

    #[test]
    fn bottom_right_overflow_is_clamped() {
        let rect = crop_bounds(&Circle::new(350, 280, 100), 400, 300);
        assert_eq!((rect.x, rect.y), (250, 180));
        assert_eq!((rect.width, rect.height), (150, 120));
        assert!(rect.truncated);
    }

    #[test]
    fn center_outside_image_gives_empty_rect() {
        let rect = crop_bounds(&Circle::new(900, 10, 100), 400, 300);
        assert!(rect.is_empty());
    }

    #[test]
    fn crop_takes_pixels_from_the_bounding_square() {
        let masked = coordinate_rgba(120, 100);
        let crop = crop_circle(&masked, &Circle::new(60, 50, 20));
        assert_eq!(crop.image.dimensions(), (40, 40));
        assert_eq!(crop.image.get_pixel(0, 0).0, [40, 30, 0, 255]);
        assert_eq!(crop.image.get_pixel(39, 39).0, [79, 69, 0, 255]);
    }

    #[test]
    fn clamped_crop_starts_at_origin() {
        let masked = coordinate_rgba(120, 100);
        let crop = crop_circle(&masked, &Circle::new(5, 8, 20));
        assert_eq!(crop.image.dimensions(), (25, 28));
        assert_eq!(crop.image.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }
}
