use std::path::PathBuf;

use crate::crop::CropRect;
use crate::export::OutputRecord;
use crate::Circle;

/// Outcome of one detected circle.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CircleReport {
    /// 1-based position in detector order.
    pub index: usize,
    pub circle: Circle,
    /// Clamped crop rectangle in source pixels.
    pub crop: CropRect,
    /// Files written for this circle, in write order.
    pub outputs: Vec<OutputRecord>,
    /// Message of the write failure that ended this circle's exports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of one decoded source image.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ImageReport {
    pub source_path: PathBuf,
    /// Source dimensions [width, height].
    pub image_size: [u32; 2],
    pub circles: Vec<CircleReport>,
}

impl ImageReport {
    pub fn files_written(&self) -> usize {
        self.circles.iter().map(|c| c.outputs.len()).sum()
    }

    pub fn write_failures(&self) -> usize {
        self.circles.iter().filter(|c| c.error.is_some()).count()
    }
}

/// A file the walk could not use.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Aggregate counters of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RunTotals {
    pub images_loaded: usize,
    pub skipped_unreadable: usize,
    pub without_circles: usize,
    pub circles: usize,
    pub files_written: usize,
    pub write_failures: usize,
}

/// Full result of a tree run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RunReport {
    pub source_root: PathBuf,
    pub destination_root: PathBuf,
    pub images: Vec<ImageReport>,
    pub skipped: Vec<SkippedFile>,
    pub totals: RunTotals,
}

impl RunReport {
    pub(crate) fn new(source_root: PathBuf, destination_root: PathBuf) -> Self {
        Self {
            source_root,
            destination_root,
            images: Vec::new(),
            skipped: Vec::new(),
            totals: RunTotals::default(),
        }
    }

    pub(crate) fn push_image(&mut self, image: ImageReport) {
        let t = &mut self.totals;
        t.images_loaded += 1;
        if image.circles.is_empty() {
            t.without_circles += 1;
        }
        t.circles += image.circles.len();
        t.files_written += image.files_written();
        t.write_failures += image.write_failures();
        self.images.push(image);
    }

    pub(crate) fn push_skipped(&mut self, path: PathBuf, reason: String) {
        self.totals.skipped_unreadable += 1;
        self.skipped.push(SkippedFile { path, reason });
    }
}
