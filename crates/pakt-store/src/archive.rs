use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use pakt_constants::DEFAULT_ARCHIVE_EXTENSION;
use pakt_error::{PackageManagerError, Result};
use pakt_logger;
use pakt_utils::{is_non_empty_dir, remove_path_if_exists, validate_name};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    TarGz,
}

impl ArchiveFormat {
    /// Sniffs the format from the file's leading bytes.
    pub fn detect(path: &Path) -> io::Result<Option<Self>> {
        let mut magic = [0u8; 4];
        let mut file = File::open(path)?;
        let read = file.read(&mut magic)?;

        Ok(match magic.get(..read) {
            Some([0x50, 0x4b, 0x03 | 0x05, 0x04 | 0x06, ..]) => Some(Self::Zip),
            Some([0x1f, 0x8b, ..]) => Some(Self::TarGz),
            _ => None,
        })
    }

    /// File extension a cached download should carry, guessed from its URL.
    #[must_use]
    pub fn extension_for_url(url: &str) -> &'static str {
        let path = url.split(['?', '#']).next().unwrap_or(url).to_lowercase();
        if path.ends_with(".tar.gz") {
            "tar.gz"
        } else if path.ends_with(".tgz") {
            "tgz"
        } else {
            DEFAULT_ARCHIVE_EXTENSION
        }
    }

    fn unpack(self, archive: &Path, dest: &Path) -> std::result::Result<(), String> {
        let file = File::open(archive).map_err(|e| e.to_string())?;
        match self {
            Self::Zip => {
                let mut zip = zip::ZipArchive::new(file).map_err(|e| e.to_string())?;
                zip.extract(dest).map_err(|e| e.to_string())
            }
            Self::TarGz => {
                let mut tar = tar::Archive::new(GzDecoder::new(file));
                tar.unpack(dest).map_err(|e| e.to_string())
            }
        }
    }
}

/// Per-package install directories under one root.
pub struct PackageStore {
    install_dir: PathBuf,
}

impl PackageStore {
    #[must_use]
    pub fn new(install_dir: &Path) -> Self {
        Self {
            install_dir: install_dir.to_path_buf(),
        }
    }

    #[must_use]
    pub fn package_dir(&self, name: &str) -> PathBuf {
        self.install_dir.join(name)
    }

    /// Unpacks `archive` into the package's install directory and returns it.
    ///
    /// The archive is first unpacked into a hidden staging directory next to
    /// the target. Only a complete, non-empty extraction is renamed into
    /// place, replacing whatever was there. On failure the staging directory
    /// is dropped and the previous contents of the target are left alone.
    pub fn extract(&self, name: &str, archive: &Path) -> Result<PathBuf> {
        validate_name(name)?;
        let fail = |reason: String| PackageManagerError::ExtractFailed(name.to_string(), reason);

        let format = ArchiveFormat::detect(archive)
            .map_err(|e| fail(e.to_string()))?
            .ok_or_else(|| fail("unrecognized archive format".to_string()))?;

        fs::create_dir_all(&self.install_dir)?;
        let staging = tempfile::Builder::new()
            .prefix(&format!(".{name}-"))
            .tempdir_in(&self.install_dir)?;

        pakt_logger::debug(&format!(
            "Extracting {} ({format:?}) into {}",
            archive.display(),
            staging.path().display()
        ));
        format.unpack(archive, staging.path()).map_err(fail)?;

        if !is_non_empty_dir(staging.path()) {
            return Err(fail("archive is empty".to_string()));
        }

        let dest = self.package_dir(name);
        remove_path_if_exists(&dest)?;
        fs::rename(staging.path(), &dest).map_err(|e| fail(e.to_string()))?;

        Ok(dest)
    }

    /// Deletes a package's install directory. Missing directories are fine.
    pub fn remove(&self, name: &str) -> Result<()> {
        validate_name(name)?;
        remove_path_if_exists(&self.package_dir(name))?;
        Ok(())
    }
}
