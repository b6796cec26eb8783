//! Per-image processing: preprocess → detect → (mask → crop → export) per circle.

use std::path::Path;

use image::{DynamicImage, RgbImage};

use super::{CircleReport, ImageReport, Pipeline};
use crate::crop::crop_circle;
use crate::detector::CircleDetector;
use crate::diagnostics::{DiagnosticFrame, Stage};
use crate::error::LoadError;
use crate::export::{CircleIndex, MultiResolutionExporter};
use crate::mask::{apply_mask, build_mask};
use crate::preprocess::{smooth, to_gray};

/// Naming context shared by all frames of one source image.
struct FrameContext<'a> {
    relative_dir: &'a Path,
    stem: &'a str,
}

/// Decode `path` into 8-bit RGB.
pub(crate) fn load_image(path: &Path) -> Result<RgbImage, LoadError> {
    image::open(path)
        .map(|img| img.into_rgb8())
        .map_err(|source| LoadError {
            path: path.to_path_buf(),
            source,
        })
}

impl<D: CircleDetector> Pipeline<D> {
    /// Load `path` and process it.
    pub fn process_file(&self, path: &Path) -> Result<ImageReport, LoadError> {
        let src = load_image(path)?;
        Ok(self.process_image(&src, path))
    }

    /// Process a decoded image as if it had been loaded from `source_path`.
    ///
    /// `source_path` only drives naming and placement of the outputs.
    pub fn process_image(&self, src: &RgbImage, source_path: &Path) -> ImageReport {
        let stem = source_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let source_dir = source_path.parent().unwrap_or_else(|| Path::new(""));
        let ctx = FrameContext {
            relative_dir: self.resolver.relative_dir(source_dir),
            stem: &stem,
        };
        let mut report = ImageReport {
            source_path: source_path.to_path_buf(),
            image_size: [src.width(), src.height()],
            circles: Vec::new(),
        };

        self.emit(&ctx, None, Stage::Source, || DynamicImage::ImageRgb8(src.clone()));
        let gray = to_gray(src);
        self.emit(&ctx, None, Stage::Gray, || DynamicImage::ImageLuma8(gray.clone()));
        let blurred = smooth(&gray, &self.config.preprocess);
        self.emit(&ctx, None, Stage::Blurred, || DynamicImage::ImageLuma8(blurred.clone()));

        let circles = self.detector.detect(&blurred);
        if circles.is_empty() {
            tracing::info!("No circles detected in {}, skipping", source_path.display());
            return report;
        }

        let exporter = MultiResolutionExporter::new(&self.config.export, &self.resolver);
        let count = circles.len();
        for (i, circle) in circles.iter().enumerate() {
            let index = CircleIndex::new(i + 1, count);
            tracing::info!(
                "Circle {} - Center: ({}, {}), Radius: {}",
                index.index,
                circle.center_x,
                circle.center_y,
                circle.radius
            );

            let mask = build_mask(src.width(), src.height(), circle);
            self.emit(&ctx, Some(index.index), Stage::Mask, || {
                DynamicImage::ImageLuma8(mask.clone())
            });
            let masked = apply_mask(src, &mask);
            self.emit(&ctx, Some(index.index), Stage::Masked, || {
                DynamicImage::ImageRgba8(masked.clone())
            });

            let crop = crop_circle(&masked, circle);
            if crop.rect.truncated && !crop.rect.is_empty() {
                tracing::warn!(
                    "Circle {} of {} exceeds the image; crop clamped to {}x{} at ({}, {})",
                    index.index,
                    source_path.display(),
                    crop.rect.width,
                    crop.rect.height,
                    crop.rect.x,
                    crop.rect.y
                );
            }
            if !crop.rect.is_empty() {
                self.emit(&ctx, Some(index.index), Stage::Cropped, || {
                    DynamicImage::ImageRgba8(crop.image.clone())
                });
                self.emit(&ctx, Some(index.index), Stage::CroppedGray, || {
                    DynamicImage::ImageRgba8(crop.image.clone()).into_luma8().into()
                });
            }

            let outcome = exporter.export(&crop, index, &stem, source_dir);
            if let Some(last) = outcome.last_written() {
                tracing::info!(
                    "Removed BG and Cropped File: {}",
                    last.destination_path.display()
                );
            }
            report.circles.push(CircleReport {
                index: index.index,
                circle: *circle,
                crop: crop.rect,
                error: outcome.failure.as_ref().map(ToString::to_string),
                outputs: outcome.written,
            });
        }
        report
    }

    fn emit(
        &self,
        ctx: &FrameContext<'_>,
        circle_index: Option<usize>,
        stage: Stage,
        image: impl FnOnce() -> DynamicImage,
    ) {
        let Some(sink) = &self.sink else {
            return;
        };
        let image = image();
        sink.emit(&DiagnosticFrame {
            relative_dir: ctx.relative_dir,
            stem: ctx.stem,
            circle_index,
            stage,
            image: &image,
        });
    }
}
