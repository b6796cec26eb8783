//! Batch pipeline.
//!
//! This is the glue layer: it wires preprocessing, detection, masking, cropping
//! and export together and owns the recovery policy. Algorithmic pieces live in
//! their own modules.
//!
//! Entry points:
//! - [`Pipeline::run`]: walk the source tree and process every decodable image
//! - [`Pipeline::process_file`]: load and process one file
//! - [`Pipeline::process_image`]: process an already decoded image

mod process;
mod result;
mod run;

pub use result::{CircleReport, ImageReport, RunReport, RunTotals, SkippedFile};

use crate::config::PipelineConfig;
use crate::detector::{CircleDetector, HoughCircleDetector};
use crate::diagnostics::DiagnosticSink;
use crate::paths::OutputPathResolver;

/// Configured pipeline: create once, run on a whole tree.
///
/// # Examples
///
/// ```no_run
/// use circlecrop::{OutputPathResolver, Pipeline, PipelineConfig};
///
/// let resolver = OutputPathResolver::new("photos", "crops");
/// let pipeline = Pipeline::new(PipelineConfig::default(), resolver);
/// let report = pipeline.run()?;
/// println!("{} files written", report.totals.files_written);
/// # Ok::<(), circlecrop::Error>(())
/// ```
pub struct Pipeline<D = HoughCircleDetector> {
    config: PipelineConfig,
    resolver: OutputPathResolver,
    detector: D,
    sink: Option<Box<dyn DiagnosticSink>>,
}

impl Pipeline<HoughCircleDetector> {
    /// Pipeline using the built-in Hough detector tuned by `config.hough`.
    pub fn new(config: PipelineConfig, resolver: OutputPathResolver) -> Self {
        let detector = HoughCircleDetector::new(config.hough.clone());
        Self::with_detector(config, resolver, detector)
    }
}

impl<D: CircleDetector> Pipeline<D> {
    /// Pipeline using a custom detection capability. `config.hough` is ignored.
    pub fn with_detector(config: PipelineConfig, resolver: OutputPathResolver, detector: D) -> Self {
        Self {
            config,
            resolver,
            detector,
            sink: None,
        }
    }

    /// Install a sink that receives every intermediate image.
    pub fn with_diagnostics(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn resolver(&self) -> &OutputPathResolver {
        &self.resolver
    }
}
