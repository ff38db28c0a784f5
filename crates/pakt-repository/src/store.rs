use std::path::{Path, PathBuf};

use pakt_config::Config;
use pakt_error::{PackageManagerError, Result};
use pakt_logger;
use pakt_transport::Transport;
use pakt_utils::{read_json, remove_path_if_exists, write_json_atomic};

use crate::manifest::{PackageDescriptor, RepositoryManifest, manifest_url};

/// A descriptor together with the repository it came from.
#[derive(Debug, Clone, Copy)]
pub struct PackageMatch<'a> {
    pub descriptor: &'a PackageDescriptor,
    pub repository: &'a str,
}

struct RepositorySlot {
    name: String,
    url: String,
    priority: u32,
    manifest: Option<RepositoryManifest>,
}

/// The configured repositories and their cached manifests, kept in lookup
/// order (ascending priority).
pub struct RepositoryStore {
    repos_dir: PathBuf,
    slots: Vec<RepositorySlot>,
}

impl RepositoryStore {
    /// Loads the cached manifest of every configured repository. A repository
    /// whose manifest is missing or unreadable is kept without packages.
    #[must_use]
    pub fn open(config: &Config, repos_dir: &Path) -> Self {
        let slots = config
            .repositories_by_priority()
            .into_iter()
            .map(|(name, repo)| RepositorySlot {
                name: name.to_string(),
                url: repo.url.clone(),
                priority: repo.priority,
                manifest: Self::load_cached(repos_dir, name, repo.priority),
            })
            .collect();

        Self {
            repos_dir: repos_dir.to_path_buf(),
            slots,
        }
    }

    fn cache_file(repos_dir: &Path, name: &str) -> PathBuf {
        repos_dir.join(format!("{name}.json"))
    }

    fn load_cached(repos_dir: &Path, name: &str, priority: u32) -> Option<RepositoryManifest> {
        let path = Self::cache_file(repos_dir, name);
        match read_json::<RepositoryManifest>(&path) {
            Ok(Some(manifest)) => Some(manifest.with_origin(name, priority)),
            Ok(None) => {
                pakt_logger::warn(&format!(
                    "No cached manifest for repository '{name}' (run `pakt update`)"
                ));
                None
            }
            Err(e) => {
                pakt_logger::warn(&format!("Skipping repository '{name}': {e}"));
                None
            }
        }
    }

    fn slot(&self, repo_name: &str) -> Result<&RepositorySlot> {
        self.slots
            .iter()
            .find(|slot| slot.name == repo_name)
            .ok_or_else(|| PackageManagerError::RepositoryNotFound(repo_name.to_string()))
    }

    #[must_use]
    pub fn has_manifest(&self, repo_name: &str) -> bool {
        self.slot(repo_name)
            .is_ok_and(|slot| slot.manifest.is_some())
    }

    pub fn load(&self, repo_name: &str) -> Result<&RepositoryManifest> {
        self.slot(repo_name)?
            .manifest
            .as_ref()
            .ok_or_else(|| PackageManagerError::RepositoryNotFound(repo_name.to_string()))
    }

    /// Re-downloads one repository's manifest and replaces the cached copy.
    pub fn refresh(&mut self, repo_name: &str, transport: &dyn Transport) -> Result<()> {
        let slot = self
            .slots
            .iter_mut()
            .find(|slot| slot.name == repo_name)
            .ok_or_else(|| PackageManagerError::RepositoryNotFound(repo_name.to_string()))?;

        let url = manifest_url(&slot.url)?;
        pakt_logger::debug(&format!("Fetching {url}"));
        let content = transport.get_text(&url)?;
        let manifest = RepositoryManifest::from_json(&slot.name, slot.priority, &content)?;

        write_json_atomic(&Self::cache_file(&self.repos_dir, &slot.name), &manifest)?;
        slot.manifest = Some(manifest);
        Ok(())
    }

    /// Refreshes every repository, one result per repository in lookup order.
    pub fn refresh_all(&mut self, transport: &dyn Transport) -> Vec<(String, Result<()>)> {
        let names: Vec<String> = self.slots.iter().map(|slot| slot.name.clone()).collect();
        self.refresh_each(names, transport)
    }

    /// Refreshes only the repositories that have no cached manifest yet.
    pub fn refresh_missing(&mut self, transport: &dyn Transport) -> Vec<(String, Result<()>)> {
        let names: Vec<String> = self
            .slots
            .iter()
            .filter(|slot| slot.manifest.is_none())
            .map(|slot| slot.name.clone())
            .collect();
        self.refresh_each(names, transport)
    }

    fn refresh_each(
        &mut self,
        names: Vec<String>,
        transport: &dyn Transport,
    ) -> Vec<(String, Result<()>)> {
        names
            .into_iter()
            .map(|name| {
                let result = self.refresh(&name, transport);
                (name, result)
            })
            .collect()
    }

    /// Every repository offering `name`, best first.
    #[must_use]
    pub fn find_package(&self, name: &str) -> Vec<PackageMatch<'_>> {
        self.slots
            .iter()
            .filter_map(|slot| {
                let manifest = slot.manifest.as_ref()?;
                manifest.get(name).map(|descriptor| PackageMatch {
                    descriptor,
                    repository: &slot.name,
                })
            })
            .collect()
    }

    /// The descriptor an install would use: from `pin` if given, otherwise
    /// the first repository in priority order.
    pub fn best_match(&self, name: &str, pin: Option<&str>) -> Result<PackageMatch<'_>> {
        if let Some(repo_name) = pin {
            let slot = self.slot(repo_name)?;
            let manifest = self.load(repo_name)?;
            return manifest
                .get(name)
                .map(|descriptor| PackageMatch {
                    descriptor,
                    repository: &slot.name,
                })
                .ok_or_else(|| PackageManagerError::PackageNotFound(name.to_string()));
        }

        self.find_package(name)
            .into_iter()
            .next()
            .ok_or_else(|| PackageManagerError::PackageNotFound(name.to_string()))
    }

    #[must_use]
    pub fn search(&self, query: &str) -> Vec<PackageMatch<'_>> {
        self.slots
            .iter()
            .filter_map(|slot| slot.manifest.as_ref().map(|m| (slot, m)))
            .flat_map(|(slot, manifest)| {
                manifest
                    .packages
                    .values()
                    .filter(move |descriptor| descriptor.matches_query(query))
                    .map(move |descriptor| PackageMatch {
                        descriptor,
                        repository: slot.name.as_str(),
                    })
            })
            .collect()
    }

    /// Deletes the cached manifest file for a repository that is being
    /// removed from the configuration.
    pub fn remove_cached(repos_dir: &Path, repo_name: &str) -> Result<()> {
        remove_path_if_exists(&Self::cache_file(repos_dir, repo_name))?;
        Ok(())
    }
}
