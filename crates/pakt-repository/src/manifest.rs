use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use pakt_constants::{DEFAULT_PACKAGE_VERSION, MANIFEST_FILE};
use pakt_error::{PackageManagerError, Result};
use pakt_utils::validate_name;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PackageDescriptor {
    /// Filled from the manifest key when the manifest is parsed.
    #[serde(skip)]
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub description: String,
    /// Expected sha256 of the archive, hex encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

fn default_version() -> String {
    DEFAULT_PACKAGE_VERSION.to_string()
}

impl PackageDescriptor {
    /// The entry-point file inside the install directory.
    #[must_use]
    pub fn executable_name(&self) -> String {
        self.executable
            .clone()
            .unwrap_or_else(|| format!("{}{}", self.name, std::env::consts::EXE_SUFFIX))
    }

    /// Case-insensitive substring match over name and description.
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RepositoryManifest {
    #[serde(skip)]
    pub name: String,
    #[serde(skip)]
    pub priority: u32,
    #[serde(default)]
    pub packages: IndexMap<String, PackageDescriptor>,
}

impl RepositoryManifest {
    pub fn from_json(name: &str, priority: u32, content: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(content).map_err(|e| {
            PackageManagerError::ConfigError(format!("Invalid manifest for '{name}': {e}"))
        })?;
        Ok(manifest.with_origin(name, priority))
    }

    /// Attaches the repository name and priority, and copies each package key
    /// into its descriptor. Neither is stored in the manifest file itself.
    /// Entries whose key is not a usable package name are dropped.
    #[must_use]
    pub fn with_origin(mut self, name: &str, priority: u32) -> Self {
        name.clone_into(&mut self.name);
        self.priority = priority;
        self.packages.retain(|pkg_name, _| match validate_name(pkg_name) {
            Ok(()) => true,
            Err(e) => {
                pakt_logger::warn(&format!("Ignoring package in repository '{name}': {e}"));
                false
            }
        });
        for (pkg_name, descriptor) in &mut self.packages {
            pkg_name.clone_into(&mut descriptor.name);
        }
        self
    }

    #[must_use]
    pub fn get(&self, package: &str) -> Option<&PackageDescriptor> {
        self.packages.get(package)
    }
}

/// Location of a repository's manifest: the base URL joined with the fixed
/// manifest file name. A base without a trailing slash has its last path
/// segment replaced.
pub fn manifest_url(base: &str) -> Result<String> {
    let base = url::Url::parse(base)
        .map_err(|e| PackageManagerError::ConfigError(format!("Invalid URL '{base}': {e}")))?;
    base.join(MANIFEST_FILE)
        .map(String::from)
        .map_err(|e| PackageManagerError::ConfigError(format!("Invalid URL '{base}': {e}")))
}
