//! User-facing output formatting

use crate::cli::args::VerbosityLevel;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Verbosity-gated console output, separate from the tracing log stream.
/// Warnings and errors go to stderr so they survive stdout redirection.
#[derive(Debug, Clone)]
pub struct Reporter {
    verbosity: VerbosityLevel,
}

impl Reporter {
    pub fn new(verbosity: VerbosityLevel) -> Self {
        Self { verbosity }
    }

    pub fn info(&self, message: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            println!("{}", message);
        }
    }

    pub fn success(&self, message: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            println!("{} {}", "✓".green().bold(), message);
        }
    }

    pub fn warning(&self, message: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            eprintln!("{} {}", "warning:".yellow().bold(), message);
        }
    }

    pub fn tip(&self, message: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            println!("{} {}", "tip:".cyan().bold(), message);
        }
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "error:".red().bold(), message);
    }

    /// Spinner for auxiliary queries (metadata, format listing). Returns
    /// `None` when quiet; callers clear it once the query resolves.
    pub fn spinner(&self, message: &str) -> Option<ProgressBar> {
        if self.verbosity == VerbosityLevel::Quiet {
            return None;
        }
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        Some(spinner)
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(VerbosityLevel::Normal)
    }
}
