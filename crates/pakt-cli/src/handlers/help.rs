use anyhow::Result;
use clap::CommandFactory;
use owo_colors::OwoColorize;

use crate::commands::Cli;
use pakt_constants::{BIN_NAME, COMMANDS, DESCRIPTION, EXAMPLES, REPOSITORY_URL, VERSION};

pub struct HelpHandler;

impl HelpHandler {
    pub fn handle_help(command: Option<&str>) -> Result<()> {
        match command {
            Some(cmd) => Self::show_command_help(cmd),
            None => {
                Self::show_general_help();
                Ok(())
            }
        }
    }

    fn show_command_help(command: &str) -> Result<()> {
        let mut cli = Cli::command();
        let canonical = Self::canonical_name(command).unwrap_or(command);

        if let Some(subcommand) = cli.find_subcommand_mut(canonical) {
            subcommand.print_help()?;
        } else {
            println!(
                "{}: Unknown command '{}'",
                "Error".bright_red().bold(),
                command
            );
            println!();
            Self::show_general_help();
        }

        println!();
        Ok(())
    }

    fn canonical_name(command: &str) -> Option<&'static str> {
        COMMANDS
            .iter()
            .find(|(name, _, aliases)| *name == command || aliases.contains(&command))
            .map(|(name, _, _)| *name)
    }

    fn show_general_help() {
        println!("{}", DESCRIPTION.bright_white().bold());
        println!(
            "{} {}",
            "Version:".bright_white().bold(),
            VERSION.bright_black().bold()
        );
        println!();

        println!("{}", "Usage:".bright_magenta().bold());
        println!(
            "  {} {} {} {}",
            BIN_NAME.bright_cyan().bold(),
            "<COMMAND>".bright_white(),
            "<OPTIONS>".bright_black().bold(),
            "[ARGS]".bright_black().bold()
        );
        println!();

        println!("{}", "Commands:".bright_magenta().bold());
        let labels: Vec<(String, &str, &str)> = COMMANDS
            .iter()
            .map(|(cmd, desc, aliases)| {
                let alias_str = if aliases.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", aliases.join(", "))
                };
                (alias_str, *cmd, *desc)
            })
            .collect();
        let max_cmd_width = labels
            .iter()
            .map(|(alias_str, cmd, _)| cmd.len() + alias_str.len())
            .max()
            .unwrap_or(0);

        for (alias_str, cmd, desc) in &labels {
            let plain_len = cmd.len() + alias_str.len();
            let colored_cmd = format!(
                "{}{}",
                cmd.bright_cyan().bold(),
                alias_str.bright_black().bold()
            );
            println!(
                "  {:width$}  # {}",
                colored_cmd,
                desc.bright_black().bold(),
                width = max_cmd_width + (colored_cmd.len() - plain_len)
            );
        }
        println!();

        println!("{}", "Options:".bright_magenta().bold());
        for (option, desc) in [("-V, --version", "Print version"), ("--verbose", "Print debug output")] {
            let colored_option = option.bright_cyan().bold().to_string();
            println!(
                "  {:width$}  # {}",
                colored_option,
                desc.bright_black().bold(),
                width = 13 + (colored_option.len() - option.len())
            );
        }
        println!();

        Self::show_examples();
    }

    fn show_examples() {
        println!("{}", "Examples:".bright_magenta().bold());

        let max_example_width = EXAMPLES.iter().map(|(cmd, _)| cmd.len()).max().unwrap_or(0);

        for (cmd, desc) in EXAMPLES {
            let formatted_cmd = cmd
                .split_whitespace()
                .enumerate()
                .map(|(i, part)| {
                    if i == 0 {
                        part.bright_cyan().bold().to_string()
                    } else if part.starts_with('-') {
                        part.bright_black().bold().to_string()
                    } else {
                        part.bright_white().to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(" ");

            let visual_width_diff = formatted_cmd.len() - cmd.len();
            println!(
                "  {:width$}  # {}",
                formatted_cmd,
                desc.bright_black().bold(),
                width = max_example_width + visual_width_diff
            );
        }

        println!();
        println!(
            "{}",
            "For more information about a specific command, use:".bright_magenta()
        );
        println!(
            "  {} {} {}",
            BIN_NAME.bright_cyan().bold(),
            "help".bright_white(),
            "<command>".bright_black().bold()
        );
        println!();
        println!(
            "Visit {} for more information",
            REPOSITORY_URL.bright_cyan().underline()
        );
    }
}
