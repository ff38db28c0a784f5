use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use pakt_error::{PackageManagerError, Result};
use pakt_logger;
use pakt_utils::validate_name;

/// Command shims: small scripts in one directory (meant to be on `PATH`)
/// that forward their arguments to a package's real executable.
pub struct ShimManager {
    shims_dir: PathBuf,
}

impl ShimManager {
    #[must_use]
    pub fn new(shims_dir: &Path) -> Self {
        Self {
            shims_dir: shims_dir.to_path_buf(),
        }
    }

    #[must_use]
    pub fn shim_path(&self, name: &str) -> PathBuf {
        if cfg!(target_family = "windows") {
            self.shims_dir.join(format!("{name}.bat"))
        } else {
            self.shims_dir.join(name)
        }
    }

    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.shim_path(name).is_file()
    }

    /// Writes (or overwrites) the shim for `name` pointing at `target`.
    pub fn create(&self, name: &str, target: &Path) -> Result<PathBuf> {
        validate_name(name)?;
        let shim = self.shim_path(name);
        Self::write_shim(&shim, target).map_err(|e| {
            PackageManagerError::IoError(format!("Failed to create shim {}: {e}", shim.display()))
        })?;

        pakt_logger::debug(&format!("Shim created: {}", shim.display()));
        Ok(shim)
    }

    pub fn remove(&self, name: &str) -> Result<()> {
        validate_name(name)?;
        match fs::remove_file(self.shim_path(name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(PackageManagerError::ShimNotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write_shim(shim: &Path, target: &Path) -> io::Result<()> {
        if let Some(parent) = shim.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(shim, Self::script(target))?;

        #[cfg(target_family = "unix")]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(shim, fs::Permissions::from_mode(0o755))?;
        }

        Ok(())
    }

    #[cfg(target_family = "windows")]
    fn script(target: &Path) -> String {
        format!("@echo off\r\n\"{}\" %*\r\n", target.display())
    }

    #[cfg(not(target_family = "windows"))]
    fn script(target: &Path) -> String {
        let quoted = target.display().to_string().replace('\'', r"'\''");
        format!("#!/bin/sh\nexec '{quoted}' \"$@\"\n")
    }
}
