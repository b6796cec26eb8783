//! Optional inspection of intermediate images.
//!
//! The pipeline hands every stage image to a [`DiagnosticSink`] when one is
//! installed. Nothing here affects the exported files.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::DynamicImage;

use crate::config::PreviewConfig;

/// Pipeline stage that produced a diagnostic image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Source,
    Gray,
    Blurred,
    Mask,
    Masked,
    Cropped,
    CroppedGray,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Gray => "gray",
            Self::Blurred => "blurred",
            Self::Mask => "mask",
            Self::Masked => "masked",
            Self::Cropped => "cropped",
            Self::CroppedGray => "cropped_gray",
        }
    }
}

/// One intermediate image with enough context to name it.
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticFrame<'a> {
    /// Source directory relative to the source root.
    pub relative_dir: &'a Path,
    /// Source file name without extension.
    pub stem: &'a str,
    /// 1-based circle index for per-circle stages.
    pub circle_index: Option<usize>,
    pub stage: Stage,
    pub image: &'a DynamicImage,
}

impl DiagnosticFrame<'_> {
    /// `<stem>[_<circle>]_<stage>`.
    pub fn name(&self) -> String {
        match self.circle_index {
            Some(i) => format!("{}_{}_{}", self.stem, i, self.stage.label()),
            None => format!("{}_{}", self.stem, self.stage.label()),
        }
    }
}

/// Receiver of intermediate images.
pub trait DiagnosticSink {
    fn emit(&self, frame: &DiagnosticFrame<'_>);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&DiagnosticFrame<'_>),
{
    fn emit(&self, frame: &DiagnosticFrame<'_>) {
        self(frame)
    }
}

/// Scale factor that fits a `width × height` image into the preview bounds.
///
/// Images already inside the bounds keep ratio 1.0; nothing is upscaled.
pub fn preview_ratio(max_width: u32, max_height: u32, width: u32, height: u32) -> f64 {
    if width > max_width || height > max_height {
        (max_width as f64 / width as f64).min(max_height as f64 / height as f64)
    } else {
        1.0
    }
}

/// Writes every frame as a downscaled PNG below a directory, mirroring the source tree.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    preview: PreviewConfig,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>, preview: PreviewConfig) -> Self {
        Self {
            dir: dir.into(),
            preview,
        }
    }

    fn write(&self, frame: &DiagnosticFrame<'_>) -> image::ImageResult<PathBuf> {
        let dir = self.dir.join(frame.relative_dir);
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{}.png", frame.name()));

        let (w, h) = (frame.image.width(), frame.image.height());
        let ratio = preview_ratio(self.preview.max_width, self.preview.max_height, w, h);
        if ratio < 1.0 {
            let nw = ((w as f64 * ratio) as u32).max(1);
            let nh = ((h as f64 * ratio) as u32).max(1);
            frame
                .image
                .resize_exact(nw, nh, FilterType::Triangle)
                .save(&path)?;
        } else {
            frame.image.save(&path)?;
        }
        Ok(path)
    }
}

impl DiagnosticSink for DirectorySink {
    fn emit(&self, frame: &DiagnosticFrame<'_>) {
        match self.write(frame) {
            Ok(path) => tracing::debug!("{}: {}", frame.stage.label(), path.display()),
            Err(e) => tracing::warn!("could not write diagnostic image {}: {e}", frame.name()),
        }
    }
}
