use clap::{Parser, Subcommand};

use pakt_constants::DESCRIPTION;

#[derive(Parser)]
#[command(name = "pakt")]
#[command(version)]
#[command(about = DESCRIPTION, long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Print debug output
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Installs a package and its dependencies
    #[command(aliases = ["i", "add"])]
    Install {
        /// The package to install (e.g. python or python@3.12.1)
        package: String,
        /// Require this exact version
        #[arg(short = 'v', long = "version")]
        version: Option<String>,
        /// Only look the package up in this repository
        #[arg(short = 'r', long = "repo")]
        repo: Option<String>,
        /// Abort when a dependency is missing or fails to install
        #[arg(long)]
        strict: bool,
    },
    /// Uninstalls a package
    #[command(aliases = ["rm", "remove"])]
    Uninstall {
        /// The package to uninstall
        package: String,
    },
    /// Lists installed packages
    #[command(alias = "ls")]
    List {
        /// List configured repositories instead
        #[arg(long)]
        repo: bool,
    },
    /// Searches package names and descriptions
    #[command(alias = "s")]
    Search {
        /// Case-insensitive text to look for
        query: String,
    },
    /// Refreshes repositories and reports updates, or updates one package
    #[command(aliases = ["up", "upgrade"])]
    Update {
        /// The package to update (if omitted, only checks for updates)
        package: Option<String>,
    },
    /// Manages repositories
    Repo {
        #[command(subcommand)]
        command: RepoCommands,
    },
    /// Deletes downloaded archives from the cache
    #[command(alias = "clean")]
    Cleanup,
    /// Shows help information for pakt or a specific command
    Help {
        /// The command to show help for (optional)
        command: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum RepoCommands {
    /// Adds a repository and fetches its manifest
    Add {
        /// Name to refer to the repository by
        name: String,
        /// Base URL; `repository.json` is resolved against it
        url: String,
    },
    /// Lists configured repositories
    #[command(alias = "ls")]
    List,
    /// Removes a repository and its cached manifest
    #[command(alias = "rm")]
    Remove {
        /// The repository to remove
        name: String,
    },
}
