pub mod clean;
pub mod context;
pub mod download;
pub mod install;
pub mod list;
pub mod remove;
pub mod repo;
pub mod search;
pub mod update;

#[cfg(test)]
mod test_support;

pub use clean::CleanManager;
pub use context::Context;
pub use install::{DependencyPolicy, InstallManager, InstallReport, InstallRequest};
pub use list::{ListManager, RepositoryListing};
pub use pakt_registry::{InstalledPackage, RegistryState};
pub use pakt_store::CleanReport;
pub use remove::RemoveManager;
pub use repo::RepoManager;
pub use search::{SearchManager, SearchResult};
pub use update::{AvailableUpdate, UpdateManager, UpdateOutcome};

pub fn install(ctx: &Context, request: &InstallRequest) -> anyhow::Result<InstallReport> {
    let mut manager = InstallManager::new(ctx);
    manager.install(request).map_err(|e| anyhow::anyhow!(e))
}

pub fn uninstall(ctx: &Context, name: &str) -> anyhow::Result<InstalledPackage> {
    let manager = RemoveManager::new(ctx);
    manager.uninstall(name).map_err(|e| anyhow::anyhow!(e))
}

pub fn list_installed(ctx: &Context) -> anyhow::Result<RegistryState> {
    let manager = ListManager::new(ctx);
    manager.installed().map_err(|e| anyhow::anyhow!(e))
}

#[must_use]
pub fn list_repositories(ctx: &Context) -> Vec<RepositoryListing> {
    ListManager::new(ctx).repositories()
}

pub fn search(ctx: &Context, query: &str) -> anyhow::Result<Vec<SearchResult>> {
    let manager = SearchManager::new(ctx);
    manager.search(query).map_err(|e| anyhow::anyhow!(e))
}

/// Refreshes every repository, then reports which installed packages have a
/// different version available. Per-repository failures are logged, not
/// returned.
pub fn check_updates(ctx: &Context) -> anyhow::Result<Vec<AvailableUpdate>> {
    let mut manager = UpdateManager::new(ctx);
    manager.refresh_repositories();
    manager.check_updates().map_err(|e| anyhow::anyhow!(e))
}

pub fn update_package(ctx: &Context, name: &str) -> anyhow::Result<UpdateOutcome> {
    let mut manager = UpdateManager::new(ctx);
    manager.update(name).map_err(|e| anyhow::anyhow!(e))
}

pub fn add_repository(ctx: &mut Context, name: &str, url: &str) -> anyhow::Result<bool> {
    let mut manager = RepoManager::new(ctx);
    manager.add(name, url).map_err(|e| anyhow::anyhow!(e))
}

pub fn remove_repository(ctx: &mut Context, name: &str) -> anyhow::Result<()> {
    let mut manager = RepoManager::new(ctx);
    manager.remove(name).map_err(|e| anyhow::anyhow!(e))
}

pub fn clean_cache(ctx: &Context) -> anyhow::Result<CleanReport> {
    let manager = CleanManager::new(ctx);
    manager.clean_cache().map_err(|e| anyhow::anyhow!(e))
}
