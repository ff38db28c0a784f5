use anyhow::Result;
use owo_colors::OwoColorize;

use pakt_core::{Context, RepositoryListing};

pub struct ListHandler;

impl ListHandler {
    pub fn handle_list(ctx: &Context, repositories: bool) -> Result<()> {
        if repositories {
            Self::print_repositories(&pakt_core::list_repositories(ctx));
            return Ok(());
        }

        let installed = pakt_core::list_installed(ctx)?;
        if installed.is_empty() {
            println!("{}", "No packages installed.".bright_black());
            return Ok(());
        }

        println!("{}", "Installed packages:".bright_magenta().bold());
        let width = installed.keys().map(String::len).max().unwrap_or(0);
        for (name, entry) in &installed {
            println!(
                "  {}  {}  {}  {}",
                format!("{name:width$}").bright_cyan().bold(),
                entry.version.bright_white(),
                format!("({})", entry.repository).bright_black(),
                entry
                    .install_date
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .bright_black()
            );
        }
        println!();
        println!("{} package(s)", installed.len());
        Ok(())
    }

    pub(crate) fn print_repositories(repositories: &[RepositoryListing]) {
        if repositories.is_empty() {
            println!("{}", "No repositories configured.".bright_black());
            return;
        }

        println!("{}", "Repositories:".bright_magenta().bold());
        let width = repositories.iter().map(|r| r.name.len()).max().unwrap_or(0);
        for repo in repositories {
            let mut flags = Vec::new();
            if repo.is_default {
                flags.push("default");
            }
            if !repo.cached {
                flags.push("not fetched");
            }
            let flags = if flags.is_empty() {
                String::new()
            } else {
                format!(" ({})", flags.join(", "))
            };

            println!(
                "  {}  {}  {}{}",
                format!("{:width$}", repo.name).bright_cyan().bold(),
                format!("[{}]", repo.priority).bright_black(),
                repo.url.bright_white(),
                flags.bright_black()
            );
        }
    }
}
