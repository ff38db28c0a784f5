use pakt_error::Result;
use pakt_logger;
use pakt_store::CleanReport;

use crate::context::Context;

pub struct CleanManager<'a> {
    ctx: &'a Context,
}

impl<'a> CleanManager<'a> {
    #[must_use]
    pub const fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    /// Deletes every downloaded archive. Installed packages, the registry,
    /// configuration and cached manifests are left alone.
    pub fn clean_cache(&self) -> Result<CleanReport> {
        let cache = self.ctx.cache();
        pakt_logger::debug(&format!("Cleaning cache at {}", cache.dir().display()));
        pakt_logger::status("Cleaning download cache...");

        let report = cache.clean()?;

        #[allow(clippy::cast_precision_loss)]
        let size_mb = report.bytes as f64 / 1024.0 / 1024.0;
        pakt_logger::finish(&format!(
            "Removed {} cached file(s), {size_mb:.2} MB",
            report.entries
        ));
        Ok(report)
    }
}
