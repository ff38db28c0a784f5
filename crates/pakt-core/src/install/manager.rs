use chrono::Utc;

use pakt_error::{PackageManagerError, Result};
use pakt_logger;
use pakt_registry::{InstalledPackage, PackageRegistry};
use pakt_repository::RepositoryStore;
use pakt_resolver::{DependencyResolver, InstallPlan, PlannedPackage};
use pakt_shim::ShimManager;
use pakt_store::{PackageStore, hash_file, verify_archive};
use pakt_utils::validate_name;

use super::types::{DependencyPolicy, InstallReport, InstallRequest};
use crate::context::Context;
use crate::download::PackageDownloader;

pub struct InstallManager<'a> {
    ctx: &'a Context,
    store: RepositoryStore,
    registry: PackageRegistry,
    packages: PackageStore,
    shims: ShimManager,
    downloader: PackageDownloader<'a>,
}

impl<'a> InstallManager<'a> {
    #[must_use]
    pub fn new(ctx: &'a Context) -> Self {
        Self {
            ctx,
            store: ctx.repositories(),
            registry: ctx.registry(),
            packages: ctx.packages(),
            shims: ctx.shims(),
            downloader: PackageDownloader::new(ctx.transport(), ctx.cache()),
        }
    }

    pub(crate) const fn store(&self) -> &RepositoryStore {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut RepositoryStore {
        &mut self.store
    }

    pub(crate) const fn registry(&self) -> &PackageRegistry {
        &self.registry
    }

    pub(crate) const fn shims(&self) -> &ShimManager {
        &self.shims
    }

    /// Installs `request.name` and its dependencies.
    ///
    /// Nothing is touched when the package is already installed or cannot be
    /// resolved. Dependencies go in first. Under [`DependencyPolicy::Lenient`]
    /// a missing or failing dependency is reported and the package is still
    /// installed; under [`DependencyPolicy::Strict`] it aborts with
    /// `DependencyFailed`, keeping whatever dependencies were already
    /// complete.
    pub fn install(&mut self, request: &InstallRequest) -> Result<InstallReport> {
        let name = request.name.as_str();
        validate_name(name)?;
        if self.registry.is_installed(name)? {
            return Err(PackageManagerError::AlreadyInstalled(name.to_string()));
        }

        if self.ctx.config.settings.auto_update_repos {
            self.refresh_missing_repositories();
        }

        let plan = self.plan(name, request.repository.as_deref())?;
        let root = plan
            .root()
            .ok_or_else(|| PackageManagerError::PackageNotFound(name.to_string()))?;

        if let Some(wanted) = &request.version {
            if *wanted != root.descriptor.version {
                return Err(PackageManagerError::VersionUnavailable(
                    name.to_string(),
                    wanted.clone(),
                    root.descriptor.version.clone(),
                ));
            }
        }

        let mut report = InstallReport {
            skipped: plan.satisfied.clone(),
            missing: plan.missing.clone(),
            ..InstallReport::default()
        };

        if request.policy == DependencyPolicy::Strict {
            if let Some(missing) = plan.missing.first() {
                return Err(PackageManagerError::DependencyFailed(
                    missing.clone(),
                    "not found in any repository".to_string(),
                ));
            }
        }

        self.install_dependencies(&plan, request.policy, &mut report)?;

        self.install_planned(root)?;
        report.installed.push(root.name.clone());
        Ok(report)
    }

    /// Resolves `name` against the current repositories, leaving installed
    /// dependencies out of the plan.
    pub(crate) fn plan(&self, name: &str, pin: Option<&str>) -> Result<InstallPlan> {
        let installed = self.registry.all()?;
        DependencyResolver::new(&self.store)
            .with_installed(installed.into_keys())
            .resolve(name, pin)
    }

    pub(crate) fn install_dependencies(
        &self,
        plan: &InstallPlan,
        policy: DependencyPolicy,
        report: &mut InstallReport,
    ) -> Result<()> {
        for dep in plan.dependencies() {
            match self.install_planned(dep) {
                Ok(_) => report.installed.push(dep.name.clone()),
                Err(PackageManagerError::AlreadyInstalled(_)) => {
                    report.skipped.push(dep.name.clone());
                }
                Err(e) if policy == DependencyPolicy::Strict => {
                    return Err(PackageManagerError::DependencyFailed(
                        dep.name.clone(),
                        e.to_string(),
                    ));
                }
                Err(e) => {
                    pakt_logger::warn(&format!("Failed to install dependency {}: {e}", dep.name));
                    report.failed.push((dep.name.clone(), e.to_string()));
                }
            }
        }
        Ok(())
    }

    fn install_planned(&self, planned: &PlannedPackage) -> Result<InstalledPackage> {
        let name = planned.name.as_str();
        if self.registry.is_installed(name)? {
            return Err(PackageManagerError::AlreadyInstalled(name.to_string()));
        }

        pakt_logger::info(&format!(
            "Installing {name} {} from {}",
            planned.descriptor.version, planned.repository
        ));

        let entry = self.deploy(planned)?;
        if let Err(e) = self.registry.register(name, entry.clone()) {
            if let Err(cleanup) = self.packages.remove(name) {
                pakt_logger::debug(&format!("Cleanup of {name} failed: {cleanup}"));
            }
            return Err(e);
        }

        self.create_shim(name, &entry);
        pakt_logger::success(&format!("Installed {name} {}", entry.version));
        Ok(entry)
    }

    /// Downloads, verifies and extracts a planned package, returning the
    /// registry entry to commit. The registry itself is not touched.
    pub(crate) fn deploy(&self, planned: &PlannedPackage) -> Result<InstalledPackage> {
        let name = planned.name.as_str();
        let descriptor = &planned.descriptor;

        let archive = self.downloader.fetch(name, descriptor)?;
        let hash = match &descriptor.sha256 {
            Some(expected) => verify_archive(name, &archive, expected)?,
            None => hash_file(&archive)?,
        };

        let path = self.packages.extract(name, &archive)?;
        let executable = descriptor.executable_name();
        let entry_point = path.join(&executable);
        if !entry_point.is_file() {
            pakt_logger::warn(&format!(
                "{name}: executable {executable} not found in the archive"
            ));
        }

        Ok(InstalledPackage {
            version: descriptor.version.clone(),
            path,
            executable,
            entry_point,
            shim: self.shims.shim_path(name),
            repository: planned.repository.clone(),
            install_date: Utc::now(),
            hash,
        })
    }

    pub(crate) fn create_shim(&self, name: &str, entry: &InstalledPackage) {
        if let Err(e) = self.shims.create(name, &entry.entry_point) {
            pakt_logger::warn(&format!(
                "{e}. Run `pakt update {name}` to regenerate the shim"
            ));
        }
    }

    fn refresh_missing_repositories(&mut self) {
        for (repo, result) in self.store.refresh_missing(self.ctx.transport()) {
            match result {
                Ok(()) => pakt_logger::debug(&format!("Fetched manifest for {repo}")),
                Err(e) => pakt_logger::warn(&format!("Could not fetch {repo}: {e}")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Fixture, package_zip};
    use std::fs;

    const APP_REPO: &str = r#"{"packages": {
        "liba": {"version": "2.0.0", "url": "https://dl.example/liba.zip", "executable": "liba", "description": "Library A"},
        "app": {"version": "1.2.0", "url": "https://dl.example/app.zip", "executable": "app", "dependencies": ["liba"]},
        "solo": {"url": "https://dl.example/solo.zip", "executable": "solo"},
        "needy": {"url": "https://dl.example/needy.zip", "executable": "needy", "dependencies": ["missinglib"]},
        "broken": {"url": "https://dl.example/broken.zip", "executable": "broken"},
        "flaky": {"url": "https://dl.example/flaky.zip", "executable": "flaky", "dependencies": ["broken"]},
        "loop-a": {"url": "https://dl.example/loop-a.zip", "dependencies": ["loop-b"]},
        "loop-b": {"url": "https://dl.example/loop-b.zip", "dependencies": ["loop-a"]}
    }}"#;

    fn fixture() -> Fixture {
        Fixture::builder()
            .repository("main", 1, Some(APP_REPO))
            .archive("https://dl.example/liba.zip", package_zip("liba"))
            .archive("https://dl.example/app.zip", package_zip("app"))
            .archive("https://dl.example/solo.zip", package_zip("solo"))
            .archive("https://dl.example/needy.zip", package_zip("needy"))
            .archive("https://dl.example/flaky.zip", package_zip("flaky"))
            .archive("https://dl.example/broken.zip", b"definitely not a zip".to_vec())
            .build()
    }

    #[test]
    fn test_install_single_package() {
        let fx = fixture();
        let mut installer = InstallManager::new(&fx.ctx);

        let report = installer.install(&InstallRequest::new("solo")).unwrap();
        assert_eq!(report.installed, vec!["solo"]);
        assert!(report.is_complete());

        let registry = fx.ctx.registry().all().unwrap();
        assert_eq!(registry.len(), 1);
        let entry = &registry["solo"];
        assert_eq!(entry.version, "1.0.0");
        assert_eq!(entry.repository, "main");
        assert_eq!(entry.path, fx.ctx.paths.install_dir.join("solo"));
        assert!(entry.entry_point.is_file());
        assert_eq!(entry.hash.len(), 64);

        assert!(fx.ctx.shims().exists("solo"));
        assert_eq!(fs::read_dir(&fx.ctx.paths.shims_dir).unwrap().count(), 1);
        assert!(fx.ctx.cache().archive_path("solo", "1.0.0", "https://dl.example/solo.zip").is_file());
    }

    #[test]
    fn test_install_twice_is_rejected_without_changes() {
        let fx = fixture();
        InstallManager::new(&fx.ctx)
            .install(&InstallRequest::new("solo"))
            .unwrap();
        let before = fx.snapshot();
        let downloads = fx.downloads().len();

        let err = InstallManager::new(&fx.ctx)
            .install(&InstallRequest::new("solo"))
            .unwrap_err();

        assert!(matches!(err, PackageManagerError::AlreadyInstalled(ref n) if n == "solo"));
        assert_eq!(fx.snapshot(), before);
        assert_eq!(fx.downloads().len(), downloads);
    }

    #[test]
    fn test_dependencies_install_first() {
        let fx = fixture();
        let report = InstallManager::new(&fx.ctx)
            .install(&InstallRequest::new("app"))
            .unwrap();

        assert_eq!(report.installed, vec!["liba", "app"]);
        let names: Vec<String> = fx.ctx.registry().all().unwrap().into_keys().collect();
        assert_eq!(names, vec!["liba", "app"]);
        assert_eq!(
            fx.downloads(),
            vec!["https://dl.example/liba.zip", "https://dl.example/app.zip"]
        );
    }

    #[test]
    fn test_installed_dependency_is_not_reinstalled() {
        let fx = fixture();
        InstallManager::new(&fx.ctx)
            .install(&InstallRequest::new("liba"))
            .unwrap();
        let liba = fx.ctx.registry().get("liba").unwrap();

        let report = InstallManager::new(&fx.ctx)
            .install(&InstallRequest::new("app"))
            .unwrap();

        assert_eq!(report.installed, vec!["app"]);
        assert_eq!(report.skipped, vec!["liba"]);
        assert_eq!(fx.ctx.registry().get("liba").unwrap(), liba);
        assert_eq!(
            fx.downloads(),
            vec!["https://dl.example/liba.zip", "https://dl.example/app.zip"]
        );
    }

    #[test]
    fn test_missing_dependency_still_installs_package() {
        let fx = fixture();
        let report = InstallManager::new(&fx.ctx)
            .install(&InstallRequest::new("needy"))
            .unwrap();

        assert_eq!(report.installed, vec!["needy"]);
        assert_eq!(report.missing, vec!["missinglib"]);
        assert!(!report.is_complete());
        assert!(fx.ctx.registry().is_installed("needy").unwrap());
        assert!(!fx.ctx.registry().is_installed("missinglib").unwrap());
    }

    #[test]
    fn test_strict_policy_rejects_missing_dependency() {
        let fx = fixture();
        let request = InstallRequest::new("needy").policy(DependencyPolicy::Strict);
        let err = InstallManager::new(&fx.ctx).install(&request).unwrap_err();

        assert!(matches!(err, PackageManagerError::DependencyFailed(ref n, _) if n == "missinglib"));
        assert!(fx.ctx.registry().all().unwrap().is_empty());
        assert!(fx.downloads().is_empty());
    }

    #[test]
    fn test_failed_dependency_policies() {
        let fx = fixture();
        let report = InstallManager::new(&fx.ctx)
            .install(&InstallRequest::new("flaky"))
            .unwrap();
        assert_eq!(report.installed, vec!["flaky"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "broken");

        let fx = fixture();
        let request = InstallRequest::new("flaky").policy(DependencyPolicy::Strict);
        let err = InstallManager::new(&fx.ctx).install(&request).unwrap_err();
        assert!(matches!(err, PackageManagerError::DependencyFailed(ref n, _) if n == "broken"));
        assert!(!fx.ctx.registry().is_installed("flaky").unwrap());
    }

    #[test]
    fn test_extract_failure_leaves_nothing_behind() {
        let fx = fixture();
        let err = InstallManager::new(&fx.ctx)
            .install(&InstallRequest::new("broken"))
            .unwrap_err();

        assert!(matches!(err, PackageManagerError::ExtractFailed(..)));
        assert!(fx.ctx.registry().all().unwrap().is_empty());
        assert_eq!(fs::read_dir(&fx.ctx.paths.install_dir).unwrap().count(), 0);
        assert!(!fx.ctx.shims().exists("broken"));
    }

    #[test]
    fn test_download_failure_registers_nothing() {
        let fx = Fixture::builder()
            .repository("main", 1, Some(APP_REPO))
            .build();
        let err = InstallManager::new(&fx.ctx)
            .install(&InstallRequest::new("solo"))
            .unwrap_err();

        assert!(matches!(err, PackageManagerError::DownloadFailed(..)));
        assert!(fx.ctx.registry().all().unwrap().is_empty());
        assert!(!fx.ctx.packages().package_dir("solo").exists());
    }

    #[test]
    fn test_hash_mismatch_discards_archive() {
        let manifest = r#"{"packages": {"pinned": {"url": "https://dl.example/pinned.zip", "executable": "pinned",
            "sha256": "0000000000000000000000000000000000000000000000000000000000000000"}}}"#;
        let fx = Fixture::builder()
            .repository("main", 1, Some(manifest))
            .archive("https://dl.example/pinned.zip", package_zip("pinned"))
            .build();

        let err = InstallManager::new(&fx.ctx)
            .install(&InstallRequest::new("pinned"))
            .unwrap_err();

        assert!(matches!(err, PackageManagerError::HashMismatch(..)));
        assert_eq!(fs::read_dir(fx.ctx.cache().dir()).unwrap().count(), 0);
        assert!(fx.ctx.registry().all().unwrap().is_empty());
    }

    #[test]
    fn test_matching_hash_is_stored() {
        let bytes = package_zip("pinned");
        let digest = {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("a.zip");
            fs::write(&path, &bytes).unwrap();
            hash_file(&path).unwrap()
        };
        let manifest = format!(
            r#"{{"packages": {{"pinned": {{"url": "https://dl.example/pinned.zip", "executable": "pinned", "sha256": "{}"}}}}}}"#,
            digest.to_uppercase()
        );
        let fx = Fixture::builder()
            .repository("main", 1, Some(&manifest))
            .archive("https://dl.example/pinned.zip", bytes)
            .build();

        InstallManager::new(&fx.ctx)
            .install(&InstallRequest::new("pinned"))
            .unwrap();
        assert_eq!(fx.ctx.registry().get("pinned").unwrap().hash, digest);
    }

    #[test]
    fn test_version_must_match_manifest() {
        let fx = fixture();
        let request = InstallRequest::new("app").version(Some("9.9.9".to_string()));
        let err = InstallManager::new(&fx.ctx).install(&request).unwrap_err();
        assert!(matches!(
            err,
            PackageManagerError::VersionUnavailable(ref n, ref want, ref have)
                if n == "app" && want == "9.9.9" && have == "1.2.0"
        ));

        let request = InstallRequest::new("app").version(Some("1.2.0".to_string()));
        InstallManager::new(&fx.ctx).install(&request).unwrap();
    }

    #[test]
    fn test_cycle_aborts_before_side_effects() {
        let fx = fixture();
        let before = fx.snapshot();
        let err = InstallManager::new(&fx.ctx)
            .install(&InstallRequest::new("loop-a"))
            .unwrap_err();

        assert!(matches!(err, PackageManagerError::CyclicDependency(ref path)
            if path == &["loop-a", "loop-b", "loop-a"]));
        assert_eq!(fx.snapshot(), before);
        assert!(fx.downloads().is_empty());
    }

    #[test]
    fn test_unknown_package() {
        let fx = fixture();
        let err = InstallManager::new(&fx.ctx)
            .install(&InstallRequest::new("nope"))
            .unwrap_err();
        assert!(matches!(err, PackageManagerError::PackageNotFound(_)));
    }

    #[test]
    fn test_path_like_manifest_entry_cannot_touch_state() {
        let hostile = r#"{"packages": {
            "..": {"url": "https://dl.example/dots.zip", "executable": "x"},
            "wrapper": {"url": "https://dl.example/wrapper.zip", "executable": "wrapper", "dependencies": [".."]}
        }}"#;
        let fx = Fixture::builder()
            .repository("main", 1, Some(hostile))
            .archive("https://dl.example/dots.zip", package_zip("x"))
            .archive("https://dl.example/wrapper.zip", package_zip("wrapper"))
            .build();
        let before = fx.snapshot();

        let err = InstallManager::new(&fx.ctx)
            .install(&InstallRequest::new(".."))
            .unwrap_err();
        assert!(matches!(err, PackageManagerError::InvalidName(_)));
        assert_eq!(fx.snapshot(), before);
        assert!(fx.ctx.paths.config_file.is_file());
        assert!(fx.downloads().is_empty());

        let report = InstallManager::new(&fx.ctx)
            .install(&InstallRequest::new("wrapper"))
            .unwrap();
        assert_eq!(report.installed, vec!["wrapper"]);
        assert_eq!(report.missing, vec![".."]);
        assert_eq!(fx.downloads(), vec!["https://dl.example/wrapper.zip"]);
        assert!(fx.ctx.paths.config_file.is_file());
        assert!(fx.ctx.paths.registry_file.is_file());
    }

    #[test]
    fn test_repository_pin() {
        let extras = r#"{"packages": {"solo": {"version": "3.0.0", "url": "https://dl.example/solo3.zip", "executable": "solo"}}}"#;
        let fx = Fixture::builder()
            .repository("main", 1, Some(APP_REPO))
            .repository("extras", 2, Some(extras))
            .archive("https://dl.example/solo3.zip", package_zip("solo"))
            .build();

        let request = InstallRequest::new("solo").repository(Some("extras".to_string()));
        InstallManager::new(&fx.ctx).install(&request).unwrap();

        let entry = fx.ctx.registry().get("solo").unwrap();
        assert_eq!(entry.repository, "extras");
        assert_eq!(entry.version, "3.0.0");
    }

    #[test]
    fn test_auto_update_fetches_missing_manifests() {
        let fx = Fixture::builder()
            .repository("main", 1, None)
            .auto_update(true)
            .page("https://main.example/repository.json", APP_REPO)
            .archive("https://dl.example/solo.zip", package_zip("solo"))
            .build();

        InstallManager::new(&fx.ctx)
            .install(&InstallRequest::new("solo"))
            .unwrap();

        assert!(fx.ctx.paths.manifest_file("main").is_file());
        assert!(fx.ctx.registry().is_installed("solo").unwrap());
    }
}
