use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use pakt_constants::{
    DEFAULT_DOWNLOAD_TIMEOUT_SECS, DEFAULT_MAX_PARALLEL_DOWNLOADS, DEFAULT_REPOSITORIES,
};
use pakt_error::{PackageManagerError, Result};
use pakt_logger;
use pakt_utils::{read_json, validate_name, write_json_atomic};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    pub url: String,
    pub priority: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub auto_update_repos: bool,
    pub show_verbose_output: bool,
    pub default_repository: String,
    /// Per-request network timeout, in seconds.
    pub download_timeout: u64,
    /// Reserved. Downloads run one at a time.
    pub max_parallel_downloads: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_update_repos: true,
            show_verbose_output: false,
            default_repository: "main".to_string(),
            download_timeout: DEFAULT_DOWNLOAD_TIMEOUT_SECS,
            max_parallel_downloads: DEFAULT_MAX_PARALLEL_DOWNLOADS,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub repositories: IndexMap<String, RepositoryConfig>,
    #[serde(default)]
    pub settings: Settings,
}

impl Default for Config {
    fn default() -> Self {
        let repositories = DEFAULT_REPOSITORIES
            .iter()
            .map(|(name, url, priority)| {
                (
                    (*name).to_string(),
                    RepositoryConfig {
                        url: (*url).to_string(),
                        priority: *priority,
                    },
                )
            })
            .collect();

        Self {
            repositories,
            settings: Settings::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        read_json(path)?.ok_or_else(|| {
            PackageManagerError::ConfigError(format!("{} does not exist", path.display()))
        })
    }

    /// Loads the config, writing the defaults first if the file is absent.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if let Some(config) = read_json(path)? {
            return Ok(config);
        }

        pakt_logger::debug(&format!("Creating default config at {}", path.display()));
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_json_atomic(path, self)
    }

    /// Repositories in lookup order: ascending priority, ties broken by the
    /// order they appear in the file.
    #[must_use]
    pub fn repositories_by_priority(&self) -> Vec<(&str, &RepositoryConfig)> {
        let mut repos: Vec<_> = self
            .repositories
            .iter()
            .map(|(name, repo)| (name.as_str(), repo))
            .collect();
        repos.sort_by_key(|(_, repo)| repo.priority);
        repos
    }

    #[must_use]
    pub fn repository(&self, name: &str) -> Option<&RepositoryConfig> {
        self.repositories.get(name)
    }

    /// Appends a repository after the existing ones (priority = count + 1).
    pub fn add_repository(&mut self, name: &str, url: &str) -> Result<&RepositoryConfig> {
        validate_name(name)?;
        if self.repositories.contains_key(name) {
            return Err(PackageManagerError::RepositoryExists(name.to_string()));
        }

        url::Url::parse(url)
            .map_err(|e| PackageManagerError::ConfigError(format!("Invalid URL '{url}': {e}")))?;

        let priority = u32::try_from(self.repositories.len() + 1).unwrap_or(u32::MAX);
        let entry = self
            .repositories
            .entry(name.to_string())
            .or_insert(RepositoryConfig {
                url: url.to_string(),
                priority,
            });
        Ok(entry)
    }

    pub fn remove_repository(&mut self, name: &str) -> Result<RepositoryConfig> {
        self.repositories
            .shift_remove(name)
            .ok_or_else(|| PackageManagerError::RepositoryNotFound(name.to_string()))
    }
}
