use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use pakt_error::{PackageManagerError, Result};
use pakt_utils::{read_json, write_json_atomic};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct InstalledPackage {
    pub version: String,
    /// Install directory.
    pub path: PathBuf,
    /// Entry-point file name, relative to `path`.
    pub executable: String,
    pub entry_point: PathBuf,
    pub shim: PathBuf,
    pub repository: String,
    pub install_date: DateTime<Utc>,
    /// sha256 of the downloaded archive, hex encoded.
    pub hash: String,
}

pub type RegistryState = IndexMap<String, InstalledPackage>;

/// The installed-package record, stored as one JSON object keyed by package
/// name. Every mutation rewrites the whole file. There is no locking: two
/// processes mutating it at once can lose an update.
pub struct PackageRegistry {
    path: PathBuf,
}

impl PackageRegistry {
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    fn load(&self) -> Result<RegistryState> {
        Ok(read_json(&self.path)?.unwrap_or_default())
    }

    fn save(&self, state: &RegistryState) -> Result<()> {
        write_json_atomic(&self.path, state)
    }

    pub fn all(&self) -> Result<RegistryState> {
        self.load()
    }

    pub fn is_installed(&self, name: &str) -> Result<bool> {
        Ok(self.load()?.contains_key(name))
    }

    pub fn get(&self, name: &str) -> Result<InstalledPackage> {
        self.load()?
            .shift_remove(name)
            .ok_or_else(|| PackageManagerError::NotInstalled(name.to_string()))
    }

    /// Records a new installation. An existing entry is never overwritten.
    pub fn register(&self, name: &str, entry: InstalledPackage) -> Result<()> {
        let mut state = self.load()?;
        if state.contains_key(name) {
            return Err(PackageManagerError::AlreadyInstalled(name.to_string()));
        }
        state.insert(name.to_string(), entry);
        self.save(&state)
    }

    /// Swaps the entry of an installed package for a newer one, keeping its
    /// position in the file.
    pub fn replace(&self, name: &str, entry: InstalledPackage) -> Result<InstalledPackage> {
        let mut state = self.load()?;
        let slot = state
            .get_mut(name)
            .ok_or_else(|| PackageManagerError::NotInstalled(name.to_string()))?;
        let previous = std::mem::replace(slot, entry);
        self.save(&state)?;
        Ok(previous)
    }

    pub fn unregister(&self, name: &str) -> Result<InstalledPackage> {
        let mut state = self.load()?;
        let removed = state
            .shift_remove(name)
            .ok_or_else(|| PackageManagerError::NotInstalled(name.to_string()))?;
        self.save(&state)?;
        Ok(removed)
    }
}
