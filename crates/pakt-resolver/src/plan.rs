use pakt_repository::PackageDescriptor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedPackage {
    pub name: String,
    pub repository: String,
    pub descriptor: PackageDescriptor,
}

/// Packages to install, every dependency before its dependents. The root
/// request is the last entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallPlan {
    pub packages: Vec<PlannedPackage>,
    /// Dependency names no repository provides.
    pub missing: Vec<String>,
    /// Dependencies left out because they are already installed.
    pub satisfied: Vec<String>,
}

impl InstallPlan {
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.packages.iter().any(|pkg| pkg.name == name)
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.packages.iter().map(|pkg| pkg.name.as_str()).collect()
    }

    #[must_use]
    pub fn root(&self) -> Option<&PlannedPackage> {
        self.packages.last()
    }

    /// Everything except the root, in install order.
    #[must_use]
    pub fn dependencies(&self) -> &[PlannedPackage] {
        self.packages
            .split_last()
            .map(|(_, deps)| deps)
            .unwrap_or_default()
    }
}
