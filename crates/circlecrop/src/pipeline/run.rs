use walkdir::WalkDir;

use super::process::load_image;
use super::{Pipeline, RunReport};
use crate::detector::CircleDetector;
use crate::error::{Error, UsageError};

impl<D: CircleDetector> Pipeline<D> {
    /// Process every decodable image below the source root.
    ///
    /// Files are visited in file-name order, depth first. Undecodable files and
    /// per-circle write failures are logged and recorded in the report; only a
    /// missing source root or an unusable destination root abort the run.
    pub fn run(&self) -> Result<RunReport, Error> {
        let source_root = self.resolver.source_root();
        let destination_root = self.resolver.destination_root();
        if !source_root.is_dir() {
            return Err(UsageError::SourceNotDirectory(source_root.to_path_buf()).into());
        }
        std::fs::create_dir_all(destination_root).map_err(|source| Error::Destination {
            path: destination_root.to_path_buf(),
            source,
        })?;

        let export = &self.config.export;
        tracing::info!(
            "Settings: source={}, destination={}, extension={}, compression={}, resolutions={:?}",
            source_root.display(),
            destination_root.display(),
            export.extension,
            export.compression,
            export.resolutions
        );

        // Outputs written below a destination nested in the source must not be re-read.
        let skip_dir = destination_root
            .canonicalize()
            .unwrap_or_else(|_| destination_root.to_path_buf());

        let mut report = RunReport::new(source_root.to_path_buf(), destination_root.to_path_buf());
        let walker = WalkDir::new(source_root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                !(entry.depth() > 0
                    && entry.file_type().is_dir()
                    && entry.path().canonicalize().is_ok_and(|p| p == skip_dir))
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("cannot walk source tree: {e}");
                    continue;
                }
            };
            // Symlinked files count as files.
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let src = match load_image(path) {
                Ok(src) => src,
                Err(e) => {
                    tracing::warn!("{e}");
                    report.push_skipped(path.to_path_buf(), e.source.to_string());
                    continue;
                }
            };
            tracing::info!(
                "{} - Original File: {}",
                report.totals.images_loaded + 1,
                path.display()
            );
            let image = self.process_image(&src, path);
            report.push_image(image);
        }

        let t = &report.totals;
        tracing::info!(
            "Done: {} images, {} circles, {} files written, {} skipped, {} without circles, {} write failures",
            t.images_loaded,
            t.circles,
            t.files_written,
            t.skipped_unreadable,
            t.without_circles,
            t.write_failures
        );
        Ok(report)
    }
}
