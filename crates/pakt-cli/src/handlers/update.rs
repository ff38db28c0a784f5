use anyhow::Result;
use owo_colors::OwoColorize;

use pakt_core::{Context, UpdateOutcome};
use pakt_logger;

use super::print_header;

pub struct UpdateHandler;

impl UpdateHandler {
    pub fn handle_update(ctx: &Context, package: Option<&str>) -> Result<()> {
        print_header("update", package);

        match package {
            Some(name) => Self::update_one(ctx, name),
            None => Self::check_all(ctx),
        }
    }

    fn update_one(ctx: &Context, name: &str) -> Result<()> {
        match pakt_core::update_package(ctx, name)? {
            UpdateOutcome::Updated { from, to } => {
                pakt_logger::finish(&format!("{name} {from} -> {to}"));
            }
            UpdateOutcome::ShimRestored | UpdateOutcome::UpToDate => {}
        }
        Ok(())
    }

    fn check_all(ctx: &Context) -> Result<()> {
        let updates = pakt_core::check_updates(ctx)?;
        println!();
        if updates.is_empty() {
            pakt_logger::success("All packages are up to date");
            return Ok(());
        }

        println!("{}", "Updates available:".bright_magenta().bold());
        for update in &updates {
            println!(
                "  {} {} -> {} {}",
                update.name.bright_cyan().bold(),
                update.installed_version.bright_black(),
                update.available_version.bright_green(),
                format!("({})", update.repository).bright_black()
            );
        }
        println!();
        println!(
            "Run {} to update a package",
            "pakt update <package>".bright_cyan()
        );
        Ok(())
    }
}
