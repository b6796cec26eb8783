//! Multi-resolution export of cropped circles.
//!
//! Each circle produces a family of files: the unresized crop first, then one
//! square resize per requested resolution, in list order. The first failed
//! write ends the family; other circles and images are unaffected.

mod format;
mod naming;

pub use format::{OutputExtension, OutputFormat, VALID_EXTENSIONS};
pub use naming::{output_file_name, CircleIndex, ExportVariant, OutputRecord};

use std::path::Path;

use image::imageops::FilterType;
use image::RgbaImage;

use crate::crop::CroppedCircle;
use crate::error::WriteError;
use crate::paths::OutputPathResolver;

/// Output settings shared by every export.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub extension: OutputExtension,
    /// PNG-style compression level (0..9); ignored by JPEG and BMP.
    pub compression: i32,
    /// JPEG quality in 1..=100.
    pub jpeg_quality: u8,
    /// Square sides of the resized exports, written in this order.
    pub resolutions: Vec<u32>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            extension: OutputExtension::default(),
            compression: 0,
            jpeg_quality: 95,
            resolutions: vec![1000],
        }
    }
}

/// Result of exporting one circle.
#[derive(Debug, Default)]
pub struct ExportOutcome {
    /// Files written, in write order.
    pub written: Vec<OutputRecord>,
    /// The write that ended the family early, if any.
    pub failure: Option<WriteError>,
}

impl ExportOutcome {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    /// Last file written, used for progress logging.
    pub fn last_written(&self) -> Option<&OutputRecord> {
        self.written.last()
    }
}

/// Writes the file family of one circle.
pub struct MultiResolutionExporter<'a> {
    config: &'a ExportConfig,
    resolver: &'a OutputPathResolver,
}

impl<'a> MultiResolutionExporter<'a> {
    pub fn new(config: &'a ExportConfig, resolver: &'a OutputPathResolver) -> Self {
        Self { config, resolver }
    }

    /// Export `crop` under `stem` for a source file living in `source_dir`.
    pub fn export(
        &self,
        crop: &CroppedCircle,
        index: CircleIndex,
        stem: &str,
        source_dir: &Path,
    ) -> ExportOutcome {
        let mut outcome = ExportOutcome::default();

        if crop.rect.is_empty() {
            let name = self.file_name(stem, index, ExportVariant::Large);
            let err = WriteError::EmptyCrop {
                path: self.resolver.resolve(source_dir, &name),
            };
            tracing::warn!("{err}");
            outcome.failure = Some(err);
            return outcome;
        }

        let variants = std::iter::once(ExportVariant::Large).chain(
            self.config
                .resolutions
                .iter()
                .map(|&r| ExportVariant::Resolution(r)),
        );
        for variant in variants {
            let result = match variant {
                ExportVariant::Large => self.write(&crop.image, stem, index, variant, source_dir),
                ExportVariant::Resolution(r) => {
                    let resized = image::imageops::resize(&crop.image, r, r, FilterType::Triangle);
                    self.write(&resized, stem, index, variant, source_dir)
                }
            };
            match result {
                Ok(record) => outcome.written.push(record),
                Err(err) => {
                    tracing::warn!("{err}");
                    outcome.failure = Some(err);
                    break;
                }
            }
        }
        outcome
    }

    fn file_name(&self, stem: &str, index: CircleIndex, variant: ExportVariant) -> String {
        output_file_name(stem, index, variant, self.config.extension.as_str())
    }

    fn write(
        &self,
        image: &RgbaImage,
        stem: &str,
        index: CircleIndex,
        variant: ExportVariant,
        source_dir: &Path,
    ) -> Result<OutputRecord, WriteError> {
        let name = self.file_name(stem, index, variant);
        let path = self
            .resolver
            .prepare(source_dir, &name)
            .map_err(|source| WriteError::Io {
                path: self.resolver.resolve(source_dir, &name),
                source,
            })?;
        format::write_image(
            image,
            &path,
            self.config.extension.format(),
            self.config.compression,
            self.config.jpeg_quality,
        )?;
        tracing::debug!("wrote {} ({}x{})", path.display(), image.width(), image.height());
        Ok(OutputRecord {
            destination_path: path,
            circle_index: index.index,
            resolution: variant.resolution(),
        })
    }
}
