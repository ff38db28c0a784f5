use crossterm::{ExecutableCommand, cursor, terminal};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

pub struct Logger {
    start_time: Instant,
    quiet: bool,
    verbose: bool,
    line_open: Mutex<bool>,
}

pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
    Debug,
}

impl Logger {
    #[must_use]
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            start_time: Instant::now(),
            quiet,
            verbose,
            line_open: Mutex::new(false),
        }
    }

    #[must_use]
    pub const fn is_verbose(&self) -> bool {
        self.verbose
    }

    fn set_line_open(&self, open: bool) {
        if let Ok(mut line) = self.line_open.lock() {
            *line = open;
        }
    }

    fn clear_current_line(&self) {
        let open = self.line_open.lock().map(|line| *line).unwrap_or(false);
        if self.quiet || !open {
            return;
        }

        let mut stdout = io::stdout();
        let _ = stdout.execute(cursor::MoveToColumn(0));
        let _ = stdout.execute(terminal::Clear(terminal::ClearType::CurrentLine));
        let _ = stdout.flush();
    }

    pub fn update_line(&self, message: &str) {
        if self.quiet {
            return;
        }

        self.clear_current_line();
        print!("{message}");
        let _ = io::stdout().flush();
        self.set_line_open(true);
    }

    pub fn finish_line(&self, message: &str) {
        if self.quiet {
            return;
        }

        self.clear_current_line();
        println!("{message}");
        self.set_line_open(false);
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Error => {}
            LogLevel::Debug if !self.verbose => return,
            _ if self.quiet => return,
            _ => {}
        }

        self.clear_current_line();

        let (prefix, colored_message) = match level {
            LogLevel::Info => (
                "pakt".bright_cyan().bold().to_string(),
                message.white().to_string(),
            ),
            LogLevel::Success => (
                "✓".bright_green().bold().to_string(),
                message.bright_green().to_string(),
            ),
            LogLevel::Warning => (
                "⚠".bright_yellow().bold().to_string(),
                message.bright_yellow().to_string(),
            ),
            LogLevel::Error => (
                "✗".bright_red().bold().to_string(),
                message.bright_red().to_string(),
            ),
            LogLevel::Debug => (
                "•".bright_black().bold().to_string(),
                message.bright_black().to_string(),
            ),
        };

        if matches!(level, LogLevel::Error) {
            eprintln!("{prefix} {colored_message}");
        } else {
            println!("{prefix} {colored_message}");
        }
        self.set_line_open(false);
    }

    pub fn finish(&self, message: &str) {
        let elapsed = self.start_time.elapsed();
        let time_str = if elapsed.as_millis() < 1000 {
            format!("{}ms", elapsed.as_millis())
        } else {
            format!("{:.2}s", elapsed.as_secs_f64())
        };

        let final_message = format!(
            "{} {} {}",
            "✓".bright_green().bold(),
            message.bright_green(),
            format!("[{time_str}]").bright_black()
        );

        self.finish_line(&final_message);
    }

    /// Byte-level progress for a streaming download. `total` is the
    /// advertised content length, when the server sent one.
    pub fn download_progress(&self, label: &str, downloaded: u64, total: Option<u64>) {
        if self.quiet {
            return;
        }

        let text = match total {
            Some(total) if total > 0 => {
                #[allow(clippy::cast_precision_loss)]
                let percent = downloaded as f64 / total as f64 * 100.0;
                format!(
                    "{} {} {} ({}/{} bytes)",
                    "↓".bright_cyan(),
                    label.bright_white(),
                    format!("{percent:.1}%").bright_cyan().bold(),
                    downloaded,
                    total
                )
            }
            _ => format!(
                "{} {} ({} bytes)",
                "↓".bright_cyan(),
                label.bright_white(),
                downloaded
            ),
        };

        self.update_line(&text);
    }

    pub fn status(&self, message: &str) {
        if self.quiet {
            return;
        }

        let status_msg = format!("{} {}", "◦".bright_cyan(), message.bright_white());
        self.update_line(&status_msg);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn success(&self, message: &str) {
        self.log(LogLevel::Success, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warning, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Installs the process-wide logger. Later calls are ignored.
pub fn init_logger(quiet: bool, verbose: bool) {
    let _ = LOGGER.set(Logger::new(quiet, verbose));
}

// Library code and tests may log before (or without) the CLI initialising
// the logger; they get a quiet one.
fn get_logger() -> &'static Logger {
    LOGGER.get_or_init(|| Logger::new(true, false))
}

#[must_use]
pub fn is_verbose() -> bool {
    get_logger().is_verbose()
}

pub fn status(message: &str) {
    get_logger().status(message);
}

pub fn info(message: &str) {
    get_logger().info(message);
}

pub fn success(message: &str) {
    get_logger().success(message);
}

pub fn warn(message: &str) {
    get_logger().warn(message);
}

pub fn error(message: &str) {
    get_logger().error(message);
}

pub fn debug(message: &str) {
    get_logger().debug(message);
}

pub fn download_progress(label: &str, downloaded: u64, total: Option<u64>) {
    get_logger().download_progress(label, downloaded, total);
}

pub fn finish(message: &str) {
    get_logger().finish(message);
}
