//! circlecrop: batch extraction of circular regions from image trees.
//!
//! Every source image goes through the same stages:
//!
//! 1. **Preprocess**: grayscale conversion and median smoothing.
//! 2. **Detect**: Hough-gradient circle detection behind the [`CircleDetector`] trait.
//! 3. **Mask**: the detected disc becomes the alpha channel of an RGBA copy.
//! 4. **Crop**: the masked image is sliced to the circle's bounding square,
//!    clamped to the image extent.
//! 5. **Export**: the crop is written unresized, then once per requested
//!    square resolution, into a destination tree mirroring the source tree.
//!
//! # Public API
//! - [`Pipeline`] runs a whole tree or a single image.
//! - [`PipelineConfig`] collects every tunable, including [`HoughConfig`].
//! - [`DiagnosticSink`] receives intermediate images for inspection.

mod config;
mod crop;
mod detector;
mod diagnostics;
mod error;
mod export;
mod mask;
mod paths;
mod pipeline;
mod preprocess;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{parse_compression, parse_resolutions, PipelineConfig, PreprocessConfig, PreviewConfig};
pub use crop::{crop_bounds, crop_circle, CropRect, CroppedCircle};
pub use detector::{CircleDetector, HoughCircleDetector, HoughConfig};
pub use diagnostics::{preview_ratio, DiagnosticFrame, DiagnosticSink, DirectorySink, Stage};
pub use error::{Error, LoadError, UsageError, WriteError};
pub use export::{
    output_file_name, CircleIndex, ExportConfig, ExportOutcome, ExportVariant,
    MultiResolutionExporter, OutputExtension, OutputFormat, OutputRecord,
};
pub use mask::{apply_mask, build_mask, mask_circle};
pub use paths::OutputPathResolver;
pub use pipeline::{CircleReport, ImageReport, Pipeline, RunReport, RunTotals, SkippedFile};
pub use preprocess::preprocess;

/// A detected circle in source-image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Circle {
    /// Center column (pixels).
    pub center_x: u32,
    /// Center row (pixels).
    pub center_y: u32,
    /// Radius (pixels), always > 0 for detector output.
    pub radius: u32,
}

impl Circle {
    pub fn new(center_x: u32, center_y: u32, radius: u32) -> Self {
        Self {
            center_x,
            center_y,
            radius,
        }
    }

    /// Whether the bounding square `center ± radius` lies inside a `width × height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.center_x >= self.radius
            && self.center_y >= self.radius
            && self.center_x as u64 + self.radius as u64 <= width as u64
            && self.center_y as u64 + self.radius as u64 <= height as u64
    }
}
