//! Circle detection.
//!
//! [`CircleDetector`] is the seam between the pipeline and the detection
//! capability. [`HoughCircleDetector`] is the built-in Hough-gradient
//! implementation:
//!
//! 1. **Edges**: Canny edge pixels with their gradient direction.
//! 2. **Voting**: each edge pixel votes for centers along its gradient.
//! 3. **Centers**: accumulator maxima, strongest first, thinned by `min_dist`.
//! 4. **Radius**: best-supported radius per surviving center.

mod accumulator;
mod config;
mod radius;

pub use config::HoughConfig;

use image::GrayImage;

use crate::Circle;

/// Anything that turns a smoothed grayscale image into circle candidates.
///
/// Output order is significant: the pipeline numbers circles in this order.
pub trait CircleDetector {
    fn detect(&self, gray: &GrayImage) -> Vec<Circle>;
}

impl<F> CircleDetector for F
where
    F: Fn(&GrayImage) -> Vec<Circle>,
{
    fn detect(&self, gray: &GrayImage) -> Vec<Circle> {
        self(gray)
    }
}

/// Hough-gradient circle detector.
///
/// # Examples
///
/// ```no_run
/// use circlecrop::{CircleDetector, HoughCircleDetector, HoughConfig};
///
/// let detector = HoughCircleDetector::new(HoughConfig::default());
/// let gray = image::GrayImage::new(800, 800);
/// for c in detector.detect(&gray) {
///     println!("({}, {}) r={}", c.center_x, c.center_y, c.radius);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct HoughCircleDetector {
    config: HoughConfig,
}

impl HoughCircleDetector {
    pub fn new(config: HoughConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HoughConfig {
        &self.config
    }
}

impl CircleDetector for HoughCircleDetector {
    fn detect(&self, gray: &GrayImage) -> Vec<Circle> {
        let cfg = &self.config;
        let (w, h) = gray.dimensions();
        if w < 3 || h < 3 || cfg.min_radius == 0 || cfg.max_radius < cfg.min_radius {
            return Vec::new();
        }

        let points = accumulator::edge_points(gray, cfg.canny_low(), cfg.canny_high);
        if points.is_empty() {
            tracing::debug!("no edge pixels above Canny thresholds");
            return Vec::new();
        }

        let accum = accumulator::vote_centers(&points, w, h, cfg.min_radius, cfg.max_radius);
        let centers = accumulator::find_centers(&accum, w, h, cfg.accumulator_threshold);
        tracing::debug!(
            "{} edge pixels, {} center candidates",
            points.len(),
            centers.len()
        );

        let min_dist = cfg.min_dist_for(h);
        let min_dist_sq = min_dist as f64 * min_dist as f64;
        let limit = cfg.max_circles.unwrap_or(usize::MAX);
        let mut circles: Vec<Circle> = Vec::new();

        for cand in centers {
            if circles.len() >= limit {
                break;
            }
            let too_close = circles.iter().any(|c| {
                let dx = c.center_x as f64 - cand.x as f64;
                let dy = c.center_y as f64 - cand.y as f64;
                dx * dx + dy * dy < min_dist_sq
            });
            if too_close {
                continue;
            }
            let Some(est) = radius::estimate_radius(
                (cand.x, cand.y),
                &points,
                cfg.min_radius,
                cfg.max_radius,
                cfg.accumulator_threshold,
            ) else {
                continue;
            };
            tracing::debug!(
                "accepted center ({}, {}) votes={} radius={} support={}",
                cand.x,
                cand.y,
                cand.votes,
                est.radius,
                est.support
            );
            circles.push(Circle::new(cand.x, cand.y, est.radius));
        }
        circles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::draw_disc_gray;
    use rand::prelude::*;

    fn small_config() -> HoughConfig {
        HoughConfig {
            min_radius: 20,
            max_radius: 60,
            ..Default::default()
        }
    }

    #[test]
    fn finds_single_dominant_disc() {
        let img = draw_disc_gray(200, 160, [90.0, 80.0], 40.0, 235, 20);
        let circles = HoughCircleDetector::new(small_config()).detect(&img);
        assert_eq!(circles.len(), 1, "circles = {circles:?}");
        let c = circles[0];
        assert!(c.center_x.abs_diff(90) <= 2, "{c:?}");
        assert!(c.center_y.abs_diff(80) <= 2, "{c:?}");
        assert!(c.radius.abs_diff(40) <= 2, "{c:?}");
    }

    #[test]
    fn dark_disc_on_bright_background_is_found_too() {
        let img = draw_disc_gray(200, 160, [110.0, 75.0], 35.0, 10, 240);
        let circles = HoughCircleDetector::new(small_config()).detect(&img);
        let c = circles.first().expect("one circle");
        assert!(c.center_x.abs_diff(110) <= 2 && c.center_y.abs_diff(75) <= 2, "{c:?}");
        assert!(c.radius.abs_diff(35) <= 2, "{c:?}");
    }

    #[test]
    fn survives_speckle_noise_after_smoothing() {
        let mut img = draw_disc_gray(200, 160, [100.0, 80.0], 45.0, 230, 25);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..300 {
            let x = rng.gen_range(0..200);
            let y = rng.gen_range(0..160);
            img.put_pixel(x, y, image::Luma([rng.gen_range(0..=255)]));
        }
        let smoothed = crate::preprocess::smooth(&img, &crate::PreprocessConfig::default());
        let circles = HoughCircleDetector::new(small_config()).detect(&smoothed);
        let c = circles.first().expect("one circle");
        assert!(c.center_x.abs_diff(100) <= 3 && c.center_y.abs_diff(80) <= 3, "{c:?}");
        assert!(c.radius.abs_diff(45) <= 3, "{c:?}");
    }

    #[test]
    fn blank_image_yields_nothing() {
        let img = GrayImage::from_pixel(300, 300, image::Luma([90]));
        assert!(HoughCircleDetector::default().detect(&img).is_empty());
    }

    #[test]
    fn degenerate_inputs_yield_nothing() {
        let img = draw_disc_gray(200, 160, [90.0, 80.0], 40.0, 235, 20);
        let inverted = HoughConfig {
            min_radius: 60,
            max_radius: 20,
            ..Default::default()
        };
        assert!(HoughCircleDetector::new(inverted).detect(&img).is_empty());
        assert!(HoughCircleDetector::default()
            .detect(&GrayImage::new(2, 2))
            .is_empty());
    }

    #[test]
    fn min_dist_keeps_one_circle_per_band() {
        let img = draw_disc_gray(200, 160, [90.0, 80.0], 40.0, 235, 20);
        let cfg = HoughConfig {
            max_circles: Some(5),
            ..small_config()
        };
        let circles = HoughCircleDetector::new(cfg).detect(&img);
        // Every pixel of a 200x160 image lies within 160 px of (90, 80).
        assert_eq!(circles.len(), 1, "circles = {circles:?}");
    }

    #[test]
    fn closures_act_as_detectors() {
        let fixed = |_: &GrayImage| vec![Circle::new(5, 6, 7)];
        assert_eq!(fixed.detect(&GrayImage::new(1, 1)), vec![Circle::new(5, 6, 7)]);
    }
}
