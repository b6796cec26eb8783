use std::path::Path;

use crate::error::Error;

/// Tuning for the Hough-gradient circle detector.
///
/// Defaults target high-contrast photos with one dominant circle: a very low
/// accumulator threshold (permissive) combined with a minimum center distance
/// equal to the image height (at most one circle per horizontal band).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HoughConfig {
    /// Minimum distance between accepted centers (pixels). `None` uses the image height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_dist: Option<f32>,
    /// Upper Canny hysteresis threshold; the lower one is half of it.
    ///
    /// `imageproc`'s Canny smooths with sigma 1.4 before taking L2 Sobel
    /// magnitudes, so 200 here selects the same edges as 400 on an unsmoothed
    /// L1 Sobel response.
    pub canny_high: f32,
    /// A center needs more votes than this, a radius more supporting edge points.
    pub accumulator_threshold: u32,
    /// Smallest radius searched (pixels, inclusive).
    pub min_radius: u32,
    /// Largest radius searched (pixels, inclusive).
    pub max_radius: u32,
    /// Optional cap on the number of circles returned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_circles: Option<usize>,
}

impl Default for HoughConfig {
    fn default() -> Self {
        Self {
            min_dist: None,
            canny_high: 200.0,
            accumulator_threshold: 1,
            min_radius: 100,
            max_radius: 499,
            max_circles: None,
        }
    }
}

impl HoughConfig {
    /// Lower Canny threshold derived from [`Self::canny_high`].
    pub fn canny_low(&self) -> f32 {
        self.canny_high / 2.0
    }

    /// Effective minimum center distance for an image of the given height.
    pub fn min_dist_for(&self, image_height: u32) -> f32 {
        self.min_dist.unwrap_or(image_height as f32)
    }

    /// Load a detector configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, Error> {
        let data = std::fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
