use std::path::PathBuf;

use pakt_error::{PackageManagerError, Result};
use pakt_logger;
use pakt_repository::PackageDescriptor;
use pakt_store::DownloadCache;
use pakt_transport::Transport;

pub struct PackageDownloader<'a> {
    transport: &'a dyn Transport,
    cache: DownloadCache,
}

impl<'a> PackageDownloader<'a> {
    #[must_use]
    pub const fn new(transport: &'a dyn Transport, cache: DownloadCache) -> Self {
        Self { transport, cache }
    }

    /// Downloads the package archive into the cache and returns its path.
    ///
    /// An archive already cached under the same name and version is
    /// downloaded again rather than reused.
    pub fn fetch(&self, name: &str, descriptor: &PackageDescriptor) -> Result<PathBuf> {
        std::fs::create_dir_all(self.cache.dir()).map_err(|e| {
            PackageManagerError::IoError(format!(
                "Failed to create cache directory {}: {e}",
                self.cache.dir().display()
            ))
        })?;

        let dest = self
            .cache
            .archive_path(name, &descriptor.version, &descriptor.url);
        if dest.exists() {
            pakt_logger::debug(&format!(
                "Replacing cached archive {}",
                dest.display()
            ));
        }

        let label = format!("Downloading {name} {}", descriptor.version);
        pakt_logger::status(&label);
        let bytes = self
            .transport
            .download(&descriptor.url, &dest, &mut |done, total| {
                pakt_logger::download_progress(&label, done, total);
            })?;

        pakt_logger::debug(&format!(
            "Saved {bytes} bytes to {}",
            dest.display()
        ));
        Ok(dest)
    }
}
