use pakt_error::Result;
use pakt_logger;
use pakt_registry::{InstalledPackage, PackageRegistry};
use pakt_shim::ShimManager;
use pakt_utils::remove_path_if_exists;

use crate::context::Context;

pub struct RemoveManager {
    registry: PackageRegistry,
    shims: ShimManager,
}

impl RemoveManager {
    #[must_use]
    pub fn new(ctx: &Context) -> Self {
        Self {
            registry: ctx.registry(),
            shims: ctx.shims(),
        }
    }

    /// Deletes the install directory and shim, then forgets the package.
    /// Leftovers that are already gone are not errors.
    pub fn uninstall(&self, name: &str) -> Result<InstalledPackage> {
        let entry = self.registry.get(name)?;

        pakt_logger::status(&format!("Removing {name} {}...", entry.version));
        if let Err(e) = remove_path_if_exists(&entry.path) {
            pakt_logger::warn(&format!(
                "Could not remove {}: {e}",
                entry.path.display()
            ));
        }

        match self.shims.remove(name) {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {}
            Err(e) => pakt_logger::warn(&format!("Could not remove shim for {name}: {e}")),
        }

        let removed = self.registry.unregister(name)?;
        pakt_logger::success(&format!("Uninstalled {name}"));
        Ok(removed)
    }
}
