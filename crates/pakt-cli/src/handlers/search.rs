use anyhow::Result;
use owo_colors::OwoColorize;

use pakt_core::Context;

pub struct SearchHandler;

impl SearchHandler {
    pub fn handle_search(ctx: &Context, query: &str) -> Result<()> {
        let results = pakt_core::search(ctx, query)?;
        if results.is_empty() {
            println!("No packages matching '{}'", query.bright_white());
            return Ok(());
        }

        for result in &results {
            let marker = if result.installed {
                " [installed]".bright_green().to_string()
            } else {
                String::new()
            };
            println!(
                "{} {} {}{}",
                result.name.bright_cyan().bold(),
                result.version.bright_white(),
                format!("({})", result.repository).bright_black(),
                marker
            );
            if !result.description.is_empty() {
                println!("    {}", result.description.bright_black());
            }
        }
        println!();
        println!("{} result(s)", results.len());
        Ok(())
    }
}
