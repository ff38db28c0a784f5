use pakt_error::{PackageManagerError, Result};
use pakt_logger;

use crate::context::Context;
use crate::install::{DependencyPolicy, InstallManager, InstallReport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableUpdate {
    pub name: String,
    pub installed_version: String,
    pub available_version: String,
    pub repository: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    UpToDate,
    /// Same version, but the missing shim was written again.
    ShimRestored,
    Updated { from: String, to: String },
}

pub struct UpdateManager<'a> {
    ctx: &'a Context,
    installer: InstallManager<'a>,
}

impl<'a> UpdateManager<'a> {
    #[must_use]
    pub fn new(ctx: &'a Context) -> Self {
        Self {
            ctx,
            installer: InstallManager::new(ctx),
        }
    }

    /// Fetches every repository's manifest. One result per repository; a
    /// failure never stops the others.
    pub fn refresh_repositories(&mut self) -> Vec<(String, Result<()>)> {
        let results = self
            .installer
            .store_mut()
            .refresh_all(self.ctx.transport());

        let store = self.installer.store();
        for (repo, result) in &results {
            match result {
                Ok(()) => pakt_logger::success(&format!("Updated {repo}")),
                Err(e) => {
                    pakt_logger::error(&format!("Failed to update {repo}: {e}"));
                    if e.is_fetch_error() && store.has_manifest(repo) {
                        pakt_logger::info(&format!("Keeping the cached manifest for {repo}"));
                    }
                }
            }
        }
        results
    }

    /// Installed packages whose best available version differs from the
    /// installed one.
    pub fn check_updates(&self) -> Result<Vec<AvailableUpdate>> {
        let installed = self.installer.registry().all()?;
        let store = self.installer.store();

        let mut updates = Vec::new();
        for (name, entry) in installed {
            let pin = self.pinned_repository(&name, &entry.repository);
            match store.best_match(&name, pin.as_deref()) {
                Ok(found) if found.descriptor.version != entry.version => {
                    updates.push(AvailableUpdate {
                        available_version: found.descriptor.version.clone(),
                        repository: found.repository.to_string(),
                        installed_version: entry.version,
                        name,
                    });
                }
                Ok(_) => {}
                Err(e) => pakt_logger::debug(&format!("Skipping {name}: {e}")),
            }
        }
        Ok(updates)
    }

    /// The repository a package was installed from, as long as it still
    /// offers the package. Otherwise lookups fall back to priority order.
    fn pinned_repository(&self, name: &str, installed_from: &str) -> Option<String> {
        self.installer
            .store()
            .best_match(name, Some(installed_from))
            .is_ok()
            .then(|| installed_from.to_string())
    }

    /// Re-downloads `name` when its repository offers a different version.
    ///
    /// New dependencies are installed leniently. The old install directory is
    /// replaced only once the new archive has unpacked, after which the
    /// registry entry and the shim are rewritten.
    pub fn update(&mut self, name: &str) -> Result<UpdateOutcome> {
        let current = self.installer.registry().get(name)?;
        let pin = self.pinned_repository(name, &current.repository);
        let plan = self.installer.plan(name, pin.as_deref())?;
        let root = plan
            .root()
            .ok_or_else(|| PackageManagerError::PackageNotFound(name.to_string()))?;

        if root.descriptor.version == current.version {
            if self.installer.shims().exists(name) {
                pakt_logger::info(&format!("{name} {} is up to date", current.version));
                return Ok(UpdateOutcome::UpToDate);
            }

            self.installer
                .shims()
                .create(name, &current.entry_point)?;
            pakt_logger::success(&format!("Restored shim for {name}"));
            return Ok(UpdateOutcome::ShimRestored);
        }

        let mut report = InstallReport::default();
        self.installer
            .install_dependencies(&plan, DependencyPolicy::Lenient, &mut report)?;

        pakt_logger::info(&format!(
            "Updating {name} {} -> {}",
            current.version, root.descriptor.version
        ));
        let entry = self.installer.deploy(root)?;
        self.installer.registry().replace(name, entry.clone())?;
        self.installer.create_shim(name, &entry);

        pakt_logger::success(&format!(
            "Updated {name} {} -> {}",
            current.version, entry.version
        ));
        Ok(UpdateOutcome::Updated {
            from: current.version,
            to: entry.version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::install::InstallRequest;
    use crate::test_support::{Fixture, package_zip, package_zip_with};
    use std::fs;

    const V1: &str = r#"{"packages": {
        "jq": {"version": "1.6", "url": "https://dl.example/jq-1.6.zip", "executable": "jq"},
        "fd": {"version": "9.0", "url": "https://dl.example/fd.zip", "executable": "fd"}
    }}"#;

    const V2: &str = r#"{"packages": {
        "jq": {"version": "1.7", "url": "https://dl.example/jq-1.7.zip", "executable": "jq", "dependencies": ["oniguruma"]},
        "oniguruma": {"version": "6.9", "url": "https://dl.example/onig.zip", "executable": "onig"},
        "fd": {"version": "9.0", "url": "https://dl.example/fd.zip", "executable": "fd"}
    }}"#;

    fn fixture() -> Fixture {
        let fx = Fixture::builder()
            .repository("main", 1, Some(V1))
            .page("https://main.example/repository.json", V2)
            .archive("https://dl.example/jq-1.6.zip", package_zip_with("jq", "old"))
            .archive("https://dl.example/jq-1.7.zip", package_zip_with("jq", "new"))
            .archive("https://dl.example/onig.zip", package_zip("onig"))
            .archive("https://dl.example/fd.zip", package_zip("fd"))
            .build();
        for name in ["jq", "fd"] {
            InstallManager::new(&fx.ctx)
                .install(&InstallRequest::new(name))
                .unwrap();
        }
        fx
    }

    #[test]
    fn test_refresh_then_check_updates() {
        let fx = fixture();
        assert!(UpdateManager::new(&fx.ctx).check_updates().unwrap().is_empty());

        let mut updater = UpdateManager::new(&fx.ctx);
        let results = updater.refresh_repositories();
        assert_eq!(results.len(), 1);
        assert!(results[0].1.is_ok());

        let updates = updater.check_updates().unwrap();
        assert_eq!(
            updates,
            vec![AvailableUpdate {
                name: "jq".to_string(),
                installed_version: "1.6".to_string(),
                available_version: "1.7".to_string(),
                repository: "main".to_string(),
            }]
        );
    }

    #[test]
    fn test_refresh_failure_does_not_stop_others() {
        let fx = Fixture::builder()
            .repository("main", 1, Some(V1))
            .repository("gone", 2, None)
            .page("https://main.example/repository.json", V2)
            .build();

        let results = UpdateManager::new(&fx.ctx).refresh_repositories();
        let outcome: Vec<(&str, bool)> = results
            .iter()
            .map(|(repo, result)| (repo.as_str(), result.is_ok()))
            .collect();
        assert_eq!(outcome, vec![("main", true), ("gone", false)]);
    }

    #[test]
    fn test_unreachable_repository_keeps_cached_manifest() {
        let fx = Fixture::builder()
            .repository("main", 1, Some(V1))
            .build();

        let mut updater = UpdateManager::new(&fx.ctx);
        let results = updater.refresh_repositories();
        let err = results[0].1.as_ref().unwrap_err();
        assert!(err.is_fetch_error());

        assert!(updater.installer.store().has_manifest("main"));
        assert_eq!(
            fs::read_to_string(fx.ctx.paths.manifest_file("main")).unwrap(),
            V1
        );
    }

    #[test]
    fn test_update_replaces_package() {
        let fx = fixture();
        UpdateManager::new(&fx.ctx).refresh_repositories();

        let outcome = UpdateManager::new(&fx.ctx).update("jq").unwrap();
        assert_eq!(
            outcome,
            UpdateOutcome::Updated {
                from: "1.6".to_string(),
                to: "1.7".to_string()
            }
        );

        let entry = fx.ctx.registry().get("jq").unwrap();
        assert_eq!(entry.version, "1.7");
        assert_eq!(fs::read_to_string(&entry.entry_point).unwrap(), "new");
        assert!(fx.ctx.shims().exists("jq"));
        assert!(fx.ctx.registry().is_installed("oniguruma").unwrap());

        let names: Vec<String> = fx.ctx.registry().all().unwrap().into_keys().collect();
        assert_eq!(names, vec!["jq", "fd", "oniguruma"]);
    }

    #[test]
    fn test_update_up_to_date_and_shim_restore() {
        let fx = fixture();
        let mut updater = UpdateManager::new(&fx.ctx);
        assert_eq!(updater.update("fd").unwrap(), UpdateOutcome::UpToDate);

        fx.ctx.shims().remove("fd").unwrap();
        assert_eq!(updater.update("fd").unwrap(), UpdateOutcome::ShimRestored);
        assert!(fx.ctx.shims().exists("fd"));
    }

    #[test]
    fn test_failed_update_keeps_old_version() {
        let fx = Fixture::builder()
            .repository("main", 1, Some(V1))
            .archive("https://dl.example/jq-1.6.zip", package_zip_with("jq", "old"))
            .build();
        InstallManager::new(&fx.ctx)
            .install(&InstallRequest::new("jq"))
            .unwrap();
        fs::write(fx.ctx.paths.manifest_file("main"), V2).unwrap();

        let err = UpdateManager::new(&fx.ctx).update("jq").unwrap_err();
        assert!(matches!(err, PackageManagerError::DownloadFailed(..)));

        let entry = fx.ctx.registry().get("jq").unwrap();
        assert_eq!(entry.version, "1.6");
        assert_eq!(fs::read_to_string(&entry.entry_point).unwrap(), "old");
    }

    #[test]
    fn test_update_stays_with_source_repository() {
        let extras = r#"{"packages": {"jq": {"version": "2.0", "url": "https://dl.example/jq-2.0.zip", "executable": "jq"}}}"#;
        let extras_next = r#"{"packages": {"jq": {"version": "2.1", "url": "https://dl.example/jq-2.1.zip", "executable": "jq"}}}"#;
        let fx = Fixture::builder()
            .repository("main", 1, Some(V1))
            .repository("extras", 2, Some(extras))
            .archive("https://dl.example/jq-1.6.zip", package_zip_with("jq", "main"))
            .archive("https://dl.example/jq-2.0.zip", package_zip_with("jq", "2.0"))
            .archive("https://dl.example/jq-2.1.zip", package_zip_with("jq", "2.1"))
            .build();
        let request = InstallRequest::new("jq").repository(Some("extras".to_string()));
        InstallManager::new(&fx.ctx).install(&request).unwrap();

        assert!(UpdateManager::new(&fx.ctx).check_updates().unwrap().is_empty());
        assert_eq!(
            UpdateManager::new(&fx.ctx).update("jq").unwrap(),
            UpdateOutcome::UpToDate
        );
        assert_eq!(fx.ctx.registry().get("jq").unwrap().repository, "extras");

        fs::write(fx.ctx.paths.manifest_file("extras"), extras_next).unwrap();
        let updates = UpdateManager::new(&fx.ctx).check_updates().unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].available_version, "2.1");
        assert_eq!(updates[0].repository, "extras");

        UpdateManager::new(&fx.ctx).update("jq").unwrap();
        let entry = fx.ctx.registry().get("jq").unwrap();
        assert_eq!(entry.version, "2.1");
        assert_eq!(entry.repository, "extras");
        assert_eq!(fs::read_to_string(&entry.entry_point).unwrap(), "2.1");
        assert!(
            !fx.downloads()
                .contains(&"https://dl.example/jq-1.6.zip".to_string())
        );
    }

    #[test]
    fn test_update_requires_installed_package() {
        let fx = fixture();
        let err = UpdateManager::new(&fx.ctx).update("ripgrep").unwrap_err();
        assert!(matches!(err, PackageManagerError::NotInstalled(_)));
    }
}
