//! Gradient voting for circle centers.
//!
//! Every Canny edge pixel votes along its gradient direction, on both sides, at
//! all distances in `[min_radius, max_radius]`. Gradients on a circle's boundary
//! are radial, so their vote lines cross at the center and build a peak there.

use image::GrayImage;

/// Edge pixel with its unit gradient direction.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EdgePoint {
    pub x: u32,
    pub y: u32,
    pub dx: f32,
    pub dy: f32,
}

/// Local accumulator maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CenterCandidate {
    pub x: u32,
    pub y: u32,
    pub votes: u32,
}

/// Smoothing used for gradient directions; matches the one inside `imageproc`'s Canny.
const GRADIENT_SIGMA: f32 = 1.4;

/// Collect Canny edge pixels that carry a usable Sobel gradient.
pub(crate) fn edge_points(gray: &GrayImage, canny_low: f32, canny_high: f32) -> Vec<EdgePoint> {
    let edges = imageproc::edges::canny(gray, canny_low, canny_high);
    // Raw Sobel on a pixel staircase points up to 45 degrees off the normal.
    let smoothed = imageproc::filter::gaussian_blur_f32(gray, GRADIENT_SIGMA);
    let gx = imageproc::gradients::horizontal_sobel(&smoothed);
    let gy = imageproc::gradients::vertical_sobel(&smoothed);
    let gx_raw = gx.as_raw();
    let gy_raw = gy.as_raw();
    let stride = gray.width() as usize;

    let mut points = Vec::new();
    for (idx, &e) in edges.as_raw().iter().enumerate() {
        if e == 0 {
            continue;
        }
        let gxv = gx_raw[idx] as f32;
        let gyv = gy_raw[idx] as f32;
        let mag = (gxv * gxv + gyv * gyv).sqrt();
        if mag < 1e-6 {
            continue;
        }
        points.push(EdgePoint {
            x: (idx % stride) as u32,
            y: (idx / stride) as u32,
            dx: gxv / mag,
            dy: gyv / mag,
        });
    }
    points
}

/// Cast center votes into a `width × height` accumulator (row-major).
pub(crate) fn vote_centers(
    points: &[EdgePoint],
    width: u32,
    height: u32,
    min_radius: u32,
    max_radius: u32,
) -> Vec<u32> {
    let stride = width as usize;
    let mut accum = vec![0u32; stride * height as usize];
    let x_limit = width as f32 - 0.5;
    let y_limit = height as f32 - 0.5;

    for p in points {
        let xf = p.x as f32;
        let yf = p.y as f32;
        for sign in [1.0f32, -1.0] {
            let dx = p.dx * sign;
            let dy = p.dy * sign;
            for r in min_radius..=max_radius {
                let vx = xf + dx * r as f32;
                let vy = yf + dy * r as f32;
                // The ray only moves further out once it leaves the image.
                if vx < -0.5 || vy < -0.5 || vx >= x_limit || vy >= y_limit {
                    break;
                }
                let ix = vx.round() as usize;
                let iy = vy.round() as usize;
                accum[iy * stride + ix] += 1;
            }
        }
    }
    accum
}

/// Local maxima above `threshold`, strongest first (ties keep raster order).
pub(crate) fn find_centers(
    accum: &[u32],
    width: u32,
    height: u32,
    threshold: u32,
) -> Vec<CenterCandidate> {
    let stride = width as usize;
    let mut centers = Vec::new();
    if width < 3 || height < 3 {
        return centers;
    }
    for y in 1..height as usize - 1 {
        for x in 1..stride - 1 {
            let idx = y * stride + x;
            let v = accum[idx];
            if v > threshold
                && v > accum[idx - 1]
                && v >= accum[idx + 1]
                && v > accum[idx - stride]
                && v >= accum[idx + stride]
            {
                centers.push(CenterCandidate {
                    x: x as u32,
                    y: y as u32,
                    votes: v,
                });
            }
        }
    }
    centers.sort_by(|a, b| b.votes.cmp(&a.votes));
    centers
}
