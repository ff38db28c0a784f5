use pakt_error::Result;

use crate::context::Context;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub name: String,
    pub version: String,
    pub description: String,
    pub repository: String,
    pub installed: bool,
}

pub struct SearchManager<'a> {
    ctx: &'a Context,
}

impl<'a> SearchManager<'a> {
    #[must_use]
    pub const fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    /// Case-insensitive match on package names and descriptions across all
    /// cached manifests, in repository priority order.
    pub fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let installed = self.ctx.registry().all()?;
        let store = self.ctx.repositories();

        Ok(store
            .search(query)
            .into_iter()
            .map(|found| SearchResult {
                name: found.descriptor.name.clone(),
                version: found.descriptor.version.clone(),
                description: found.descriptor.description.clone(),
                repository: found.repository.to_string(),
                installed: installed.contains_key(&found.descriptor.name),
            })
            .collect())
    }
}
