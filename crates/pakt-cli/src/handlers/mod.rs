pub mod clean;
pub mod help;
pub mod install;
pub mod list;
pub mod remove;
pub mod repo;
pub mod search;
pub mod update;

pub use clean::CleanupHandler;
pub use help::HelpHandler;
pub use install::InstallHandler;
pub use list::ListHandler;
pub use remove::UninstallHandler;
pub use repo::RepoHandler;
pub use search::SearchHandler;
pub use update::UpdateHandler;

use owo_colors::OwoColorize;

pub(crate) fn print_header(command: &str, subject: Option<&str>) {
    match subject {
        Some(subject) => println!(
            "{} {} {}",
            "pakt".bright_cyan().bold(),
            command.bright_white(),
            subject.bright_black()
        ),
        None => println!("{} {}", "pakt".bright_cyan().bold(), command.bright_white()),
    }
    println!();
}
