//! Destination paths mirroring the source tree.

use std::path::{Path, PathBuf};

/// Maps `source_root/<rel>/` onto `destination_root/<rel>/`.
#[derive(Debug, Clone)]
pub struct OutputPathResolver {
    source_root: PathBuf,
    destination_root: PathBuf,
}

impl OutputPathResolver {
    pub fn new(source_root: impl Into<PathBuf>, destination_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            destination_root: destination_root.into(),
        }
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    pub fn destination_root(&self) -> &Path {
        &self.destination_root
    }

    /// `source_dir` relative to the source root.
    ///
    /// Directories outside the source root map to the destination root itself.
    pub fn relative_dir<'a>(&self, source_dir: &'a Path) -> &'a Path {
        source_dir
            .strip_prefix(&self.source_root)
            .unwrap_or_else(|_| Path::new(""))
    }

    /// Destination path for `file_name` produced from a file in `source_dir`.
    pub fn resolve(&self, source_dir: &Path, file_name: &str) -> PathBuf {
        self.destination_root
            .join(self.relative_dir(source_dir))
            .join(file_name)
    }

    /// Like [`Self::resolve`], creating the destination directory if needed.
    ///
    /// Safe to call before every write: existing directories are left alone.
    pub fn prepare(&self, source_dir: &Path, file_name: &str) -> std::io::Result<PathBuf> {
        let path = self.resolve(source_dir, file_name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(path)
    }
}
