use pakt_error::Result;
use pakt_registry::RegistryState;

use crate::context::Context;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryListing {
    pub name: String,
    pub url: String,
    pub priority: u32,
    /// A manifest has been fetched and cached locally.
    pub cached: bool,
    pub is_default: bool,
}

pub struct ListManager<'a> {
    ctx: &'a Context,
}

impl<'a> ListManager<'a> {
    #[must_use]
    pub const fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    /// Installed packages in the order they were installed.
    pub fn installed(&self) -> Result<RegistryState> {
        self.ctx.registry().all()
    }

    /// Configured repositories in lookup order.
    #[must_use]
    pub fn repositories(&self) -> Vec<RepositoryListing> {
        let default = self.ctx.config.settings.default_repository.as_str();
        self.ctx
            .config
            .repositories_by_priority()
            .into_iter()
            .map(|(name, repo)| RepositoryListing {
                name: name.to_string(),
                url: repo.url.clone(),
                priority: repo.priority,
                cached: self.ctx.paths.manifest_file(name).is_file(),
                is_default: name == default,
            })
            .collect()
    }
}
