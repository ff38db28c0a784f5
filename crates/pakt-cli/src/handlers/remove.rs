use anyhow::Result;

use pakt_core::Context;

use super::print_header;

pub struct UninstallHandler;

impl UninstallHandler {
    pub fn handle_uninstall(ctx: &Context, package: &str) -> Result<()> {
        print_header("uninstall", Some(package));
        pakt_core::uninstall(ctx, package)?;
        Ok(())
    }
}
