/// What to do when a dependency cannot be found or fails to install.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DependencyPolicy {
    /// Warn and still install the requested package.
    #[default]
    Lenient,
    /// Abort at the first missing or failed dependency.
    Strict,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallRequest {
    pub name: String,
    pub version: Option<String>,
    pub repository: Option<String>,
    pub policy: DependencyPolicy,
}

impl InstallRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn version(mut self, version: Option<String>) -> Self {
        self.version = version;
        self
    }

    #[must_use]
    pub fn repository(mut self, repository: Option<String>) -> Self {
        self.repository = repository;
        self
    }

    #[must_use]
    pub const fn policy(mut self, policy: DependencyPolicy) -> Self {
        self.policy = policy;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// Newly installed packages in install order, the requested one last.
    pub installed: Vec<String>,
    /// Dependencies that were already installed.
    pub skipped: Vec<String>,
    /// Dependencies that failed under the lenient policy, with the reason.
    pub failed: Vec<(String, String)>,
    /// Dependencies no repository provides.
    pub missing: Vec<String>,
}

impl InstallReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.missing.is_empty()
    }
}
