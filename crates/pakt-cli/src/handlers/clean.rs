use anyhow::Result;

use pakt_core::Context;

use super::print_header;

pub struct CleanupHandler;

impl CleanupHandler {
    pub fn handle_cleanup(ctx: &Context) -> Result<()> {
        print_header("cleanup", None);
        pakt_core::clean_cache(ctx)?;
        Ok(())
    }
}
