use anyhow::Result;

use pakt_core::Context;

use super::{ListHandler, print_header};

pub struct RepoHandler;

impl RepoHandler {
    pub fn handle_add(ctx: &mut Context, name: &str, url: &str) -> Result<()> {
        print_header("repo add", Some(name));
        pakt_core::add_repository(ctx, name, url)?;
        Ok(())
    }

    pub fn handle_list(ctx: &Context) -> Result<()> {
        ListHandler::print_repositories(&pakt_core::list_repositories(ctx));
        Ok(())
    }

    pub fn handle_remove(ctx: &mut Context, name: &str) -> Result<()> {
        print_header("repo remove", Some(name));
        pakt_core::remove_repository(ctx, name)?;
        Ok(())
    }
}
