//! Error taxonomy for the batch pipeline.
//!
//! Only [`UsageError`] and run-level [`Error`]s abort a run. [`LoadError`] and
//! [`WriteError`] are recovered by the pipeline: the offending file or export is
//! logged and skipped.

use std::path::PathBuf;

/// Invalid invocation: reported before any image is touched.
#[derive(Debug, thiserror::Error)]
pub enum UsageError {
    #[error("source folder is not a valid directory: {}", .0.display())]
    SourceNotDirectory(PathBuf),
    #[error("invalid extension: {given} (valid extensions: .jpg, .jpeg, .png, .bmp)")]
    InvalidExtension { given: String },
    #[error("resolutions must be a list of positive integers, got '{given}'")]
    InvalidResolutions { given: String },
    #[error("compression value must be an integer, got '{given}'")]
    InvalidCompression { given: String },
}

/// A source file that could not be decoded as an image.
#[derive(Debug, thiserror::Error)]
#[error("could not open or decode image {}: {source}", path.display())]
pub struct LoadError {
    pub path: PathBuf,
    #[source]
    pub source: image::ImageError,
}

/// Failure of a single export (large crop or one resolution).
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("could not write image {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not encode image {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("crop for {} is empty (circle lies outside the image)", path.display())]
    EmptyCrop { path: PathBuf },
}

impl WriteError {
    /// Destination the failed export was aimed at.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::Encode { path, .. } | Self::EmptyCrop { path } => path,
        }
    }
}

/// Run-level failure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Usage(#[from] UsageError),
    #[error("could not create destination folder {}: {source}", path.display())]
    Destination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not read configuration {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
