use std::collections::HashSet;

use pakt_error::{PackageManagerError, Result};
use pakt_logger;
use pakt_repository::RepositoryStore;

use crate::plan::{InstallPlan, PlannedPackage};

pub struct DependencyResolver<'a> {
    store: &'a RepositoryStore,
    installed: HashSet<String>,
}

impl<'a> DependencyResolver<'a> {
    #[must_use]
    pub fn new(store: &'a RepositoryStore) -> Self {
        Self {
            store,
            installed: HashSet::new(),
        }
    }

    /// Names that are already installed. They are left out of plans, except
    /// for the root itself.
    #[must_use]
    pub fn with_installed<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.installed = names.into_iter().map(Into::into).collect();
        self
    }

    /// Builds the install plan for `root`. `pin` restricts the root lookup to
    /// one repository; dependencies always use priority order.
    pub fn resolve(&self, root: &str, pin: Option<&str>) -> Result<InstallPlan> {
        let mut plan = InstallPlan::default();
        let mut visiting = Vec::new();
        self.visit(root, pin, true, &mut visiting, &mut plan)?;
        Ok(plan)
    }

    fn visit(
        &self,
        name: &str,
        pin: Option<&str>,
        is_root: bool,
        visiting: &mut Vec<String>,
        plan: &mut InstallPlan,
    ) -> Result<()> {
        if visiting.iter().any(|n| n == name) {
            let mut cycle: Vec<String> = visiting
                .iter()
                .skip_while(|n| n.as_str() != name)
                .cloned()
                .collect();
            cycle.push(name.to_string());
            return Err(PackageManagerError::CyclicDependency(cycle));
        }

        if plan.contains(name) {
            return Ok(());
        }

        if !is_root && self.installed.contains(name) {
            if !plan.satisfied.iter().any(|s| s == name) {
                plan.satisfied.push(name.to_string());
            }
            return Ok(());
        }

        let found = match self.store.best_match(name, pin) {
            Ok(found) => found,
            Err(e) if is_root => return Err(e),
            Err(_) => {
                pakt_logger::warn(&format!("Dependency {name} not found"));
                if !plan.missing.iter().any(|m| m == name) {
                    plan.missing.push(name.to_string());
                }
                return Ok(());
            }
        };

        visiting.push(name.to_string());
        for dep in &found.descriptor.dependencies {
            self.visit(dep, None, false, visiting, plan)?;
        }
        visiting.pop();

        plan.packages.push(PlannedPackage {
            name: name.to_string(),
            repository: found.repository.to_string(),
            descriptor: found.descriptor.clone(),
        });
        Ok(())
    }
}
