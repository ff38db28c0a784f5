use std::fmt;
use std::io;

#[derive(Debug)]
pub enum PackageManagerError {
    PackageNotFound(String),
    RepositoryNotFound(String),
    NotInstalled(String),
    ShimNotFound(String),
    AlreadyInstalled(String),
    RepositoryExists(String),
    VersionUnavailable(String, String, String),
    NetworkError(String),
    DownloadFailed(String, String),
    HashMismatch(String, String, String),
    ExtractFailed(String, String),
    ConfigError(String),
    /// A package or repository name that cannot be used as a single path
    /// component.
    InvalidName(String),
    CyclicDependency(Vec<String>),
    DependencyFailed(String, String),
    /// Reserved for version-range conflicts; nothing raises it yet.
    DependencyConflict(String, String),
    IoError(String),
}

impl PackageManagerError {
    /// True for the "something is absent" family (package, repository,
    /// installed entry, shim).
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PackageNotFound(_)
                | Self::RepositoryNotFound(_)
                | Self::NotInstalled(_)
                | Self::ShimNotFound(_)
        )
    }

    #[must_use]
    pub const fn is_fetch_error(&self) -> bool {
        matches!(self, Self::NetworkError(_) | Self::DownloadFailed(_, _))
    }
}

impl fmt::Display for PackageManagerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PackageNotFound(name) => {
                write!(f, "Package '{name}' not found in any repository")
            }
            Self::RepositoryNotFound(name) => {
                write!(f, "Repository '{name}' not found")
            }
            Self::NotInstalled(name) => {
                write!(f, "Package '{name}' is not installed")
            }
            Self::ShimNotFound(name) => {
                write!(f, "No shim exists for '{name}'")
            }
            Self::AlreadyInstalled(name) => {
                write!(f, "Package '{name}' is already installed")
            }
            Self::RepositoryExists(name) => {
                write!(f, "Repository '{name}' already exists")
            }
            Self::VersionUnavailable(name, requested, available) => {
                write!(
                    f,
                    "Version {requested} of '{name}' is not available (repository offers {available})"
                )
            }
            Self::NetworkError(msg) => {
                write!(f, "Network error: {msg}")
            }
            Self::DownloadFailed(url, reason) => {
                write!(f, "Failed to download {url}: {reason}")
            }
            Self::HashMismatch(name, expected, actual) => {
                write!(
                    f,
                    "Archive hash mismatch for '{name}': expected {expected}, got {actual}"
                )
            }
            Self::ExtractFailed(name, reason) => {
                write!(f, "Failed to extract '{name}': {reason}")
            }
            Self::ConfigError(msg) => {
                write!(f, "Configuration error: {msg}")
            }
            Self::InvalidName(name) => {
                write!(f, "Invalid name '{name}': names must be a single path component")
            }
            Self::CyclicDependency(path) => {
                write!(f, "Cyclic dependency detected: {}", path.join(" -> "))
            }
            Self::DependencyFailed(name, reason) => {
                write!(f, "Dependency '{name}' could not be installed: {reason}")
            }
            Self::DependencyConflict(name, details) => {
                write!(f, "Dependency conflict for '{name}': {details}")
            }
            Self::IoError(msg) => {
                write!(f, "IO error: {msg}")
            }
        }
    }
}

impl std::error::Error for PackageManagerError {}

impl From<io::Error> for PackageManagerError {
    fn from(err: io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for PackageManagerError {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PackageManagerError>;
