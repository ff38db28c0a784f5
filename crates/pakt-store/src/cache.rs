use std::fs;
use std::path::{Path, PathBuf};

use pakt_error::{PackageManagerError, Result};
use pakt_utils::{remove_path_if_exists, sanitize_file_component};

use crate::archive::ArchiveFormat;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub entries: usize,
    pub bytes: u64,
}

/// Downloaded archives, one file per `name_version`.
pub struct DownloadCache {
    dir: PathBuf,
}

impl DownloadCache {
    #[must_use]
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn archive_path(&self, name: &str, version: &str, url: &str) -> PathBuf {
        let extension = ArchiveFormat::extension_for_url(url);
        let name = sanitize_file_component(name);
        let version = sanitize_file_component(version);
        self.dir.join(format!("{name}_{version}.{extension}"))
    }

    /// Deletes everything under the cache directory. The directory itself is
    /// kept.
    pub fn clean(&self) -> Result<CleanReport> {
        let mut report = CleanReport::default();
        if !self.dir.exists() {
            return Ok(report);
        }

        let entries = fs::read_dir(&self.dir).map_err(|e| {
            PackageManagerError::IoError(format!("Failed to read {}: {e}", self.dir.display()))
        })?;

        for entry in entries {
            let path = entry?.path();
            report.bytes += fs_extra::dir::get_size(&path).unwrap_or(0);
            remove_path_if_exists(&path).map_err(|e| {
                PackageManagerError::IoError(format!("Failed to remove {}: {e}", path.display()))
            })?;
            report.entries += 1;
        }

        Ok(report)
    }
}
