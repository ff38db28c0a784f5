pub mod commands;
pub mod handlers;

use clap::Parser;

use commands::{Cli, Commands, RepoCommands};
use handlers::{
    CleanupHandler, HelpHandler, InstallHandler, ListHandler, RepoHandler, SearchHandler,
    UninstallHandler, UpdateHandler,
};
use pakt_core::Context;

pub fn run_cli() -> anyhow::Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => return Err(e.into()),
    };

    let command = match cli.command {
        None => return HelpHandler::handle_help(None),
        Some(Commands::Help { command }) => return HelpHandler::handle_help(command.as_deref()),
        Some(command) => command,
    };

    let mut ctx = Context::from_env()?;
    pakt_logger::init_logger(false, cli.verbose || ctx.config.settings.show_verbose_output);
    pakt_logger::debug(&format!("Data root: {}", ctx.paths.root.display()));

    match command {
        Commands::Install {
            package,
            version,
            repo,
            strict,
        } => InstallHandler::handle_install(&ctx, &package, version, repo, strict),
        Commands::Uninstall { package } => UninstallHandler::handle_uninstall(&ctx, &package),
        Commands::List { repo } => ListHandler::handle_list(&ctx, repo),
        Commands::Search { query } => SearchHandler::handle_search(&ctx, &query),
        Commands::Update { package } => UpdateHandler::handle_update(&ctx, package.as_deref()),
        Commands::Repo { command } => match command {
            RepoCommands::Add { name, url } => RepoHandler::handle_add(&mut ctx, &name, &url),
            RepoCommands::List => RepoHandler::handle_list(&ctx),
            RepoCommands::Remove { name } => RepoHandler::handle_remove(&mut ctx, &name),
        },
        Commands::Cleanup => CleanupHandler::handle_cleanup(&ctx),
        Commands::Help { command } => HelpHandler::handle_help(command.as_deref()),
    }
}
