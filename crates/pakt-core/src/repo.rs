use pakt_error::Result;
use pakt_logger;
use pakt_repository::RepositoryStore;

use crate::context::Context;
use crate::list::{ListManager, RepositoryListing};

pub struct RepoManager<'a> {
    ctx: &'a mut Context,
}

impl<'a> RepoManager<'a> {
    pub const fn new(ctx: &'a mut Context) -> Self {
        Self { ctx }
    }

    /// Adds a repository after the existing ones and fetches its manifest.
    ///
    /// Returns whether the manifest could be fetched. A failed fetch leaves the
    /// repository configured; `pakt update` retries it.
    pub fn add(&mut self, name: &str, url: &str) -> Result<bool> {
        let priority = self.ctx.config.add_repository(name, url)?.priority;
        self.ctx.save_config()?;
        pakt_logger::success(&format!("Added repository {name} (priority {priority})"));

        let mut store = self.ctx.repositories();
        match store.refresh(name, self.ctx.transport()) {
            Ok(()) => {
                pakt_logger::success(&format!("Fetched manifest for {name}"));
                Ok(true)
            }
            Err(e) => {
                pakt_logger::warn(&format!("Could not fetch manifest for {name}: {e}"));
                Ok(false)
            }
        }
    }

    /// Forgets a repository and deletes its cached manifest.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        self.ctx.config.remove_repository(name)?;
        self.ctx.save_config()?;
        RepositoryStore::remove_cached(&self.ctx.paths.repos_dir, name)?;
        pakt_logger::success(&format!("Removed repository {name}"));
        Ok(())
    }

    #[must_use]
    pub fn list(&self) -> Vec<RepositoryListing> {
        ListManager::new(&*self.ctx).repositories()
    }
}
