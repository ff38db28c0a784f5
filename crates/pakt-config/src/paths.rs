use std::path::{Path, PathBuf};

use pakt_constants::{
    APP_DIR_NAME, CACHE_DIR, CONFIG_FILE, HOME_ENV_VAR, PACKAGES_DIR, REGISTRY_FILE,
    REPOSITORIES_DIR, SHIMS_DIR,
};
use pakt_error::{PackageManagerError, Result};
use pakt_utils::ensure_dir_exists;

/// Where every piece of state lives. All of it sits under one per-user data
/// root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub root: PathBuf,
    pub config_file: PathBuf,
    pub registry_file: PathBuf,
    pub cache_dir: PathBuf,
    pub repos_dir: PathBuf,
    pub install_dir: PathBuf,
    pub shims_dir: PathBuf,
}

impl AppPaths {
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            config_file: root.join(CONFIG_FILE),
            registry_file: root.join(REGISTRY_FILE),
            cache_dir: root.join(CACHE_DIR),
            repos_dir: root.join(REPOSITORIES_DIR),
            install_dir: root.join(PACKAGES_DIR),
            shims_dir: root.join(SHIMS_DIR),
        }
    }

    /// `$PAKT_HOME` when set, otherwise `pakt` under the platform's local data
    /// directory.
    pub fn from_env() -> Result<Self> {
        if let Some(home) = std::env::var_os(HOME_ENV_VAR).filter(|v| !v.is_empty()) {
            return Ok(Self::new(Path::new(&home)));
        }

        let base = dirs::data_local_dir().ok_or_else(|| {
            PackageManagerError::ConfigError(format!(
                "No local data directory available; set {HOME_ENV_VAR}"
            ))
        })?;
        Ok(Self::new(&base.join(APP_DIR_NAME)))
    }

    pub fn ensure_directories(&self) -> Result<()> {
        for dir in [
            &self.root,
            &self.cache_dir,
            &self.repos_dir,
            &self.install_dir,
            &self.shims_dir,
        ] {
            ensure_dir_exists(dir).map_err(|e| {
                PackageManagerError::IoError(format!("Failed to create {}: {e}", dir.display()))
            })?;
        }
        Ok(())
    }

    #[must_use]
    pub fn manifest_file(&self, repo_name: &str) -> PathBuf {
        self.repos_dir.join(format!("{repo_name}.json"))
    }
}
