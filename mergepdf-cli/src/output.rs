//! Message formatting and display.
//!
//! Status messages go to stdout and are silenced by `--quiet`; warnings and
//! errors go to stderr and are always shown. Machine-readable output is
//! printed separately by the caller.

use mergepdf::config::Config;
use mergepdf::page::PageEntry;
use std::io::{self, IsTerminal};

/// Level of output message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Informational message.
    Info,
    /// Success message.
    Success,
    /// Warning message.
    Warning,
    /// Error message.
    Error,
    /// Debug/verbose message.
    Debug,
}

/// Output formatter with configurable verbosity.
pub struct OutputFormatter {
    quiet: bool,
    verbose: bool,
    colored: bool,
}

impl OutputFormatter {
    /// Create a new output formatter.
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            quiet,
            verbose,
            colored: Self::should_use_color(),
        }
    }

    /// Create a formatter from configuration.
    ///
    /// JSON mode keeps stdout for the JSON document, so status messages are
    /// silenced there too.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.quiet || config.json, config.verbose)
    }

    /// Create a quiet formatter (only warnings and errors).
    pub fn quiet() -> Self {
        Self::new(true, false)
    }

    fn should_use_color() -> bool {
        io::stdout().is_terminal() && std::env::var("TERM").is_ok()
    }

    /// Print an informational message.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            self.print_message(MessageLevel::Info, message);
        }
    }

    /// Print a success message.
    pub fn success(&self, message: &str) {
        if !self.quiet {
            self.print_message(MessageLevel::Success, message);
        }
    }

    /// Print a warning message, even in quiet mode.
    pub fn warning(&self, message: &str) {
        self.print_message(MessageLevel::Warning, message);
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        self.print_message(MessageLevel::Error, message);
    }

    /// Print a message only shown in verbose mode.
    pub fn debug(&self, message: &str) {
        if self.verbose && !self.quiet {
            self.print_message(MessageLevel::Debug, message);
        }
    }

    fn print_message(&self, level: MessageLevel, message: &str) {
        let (prefix, color_code) = match level {
            MessageLevel::Info => ("", ""),
            MessageLevel::Success => ("✓ ", "\x1b[32m"), // Green
            MessageLevel::Warning => ("⚠ ", "\x1b[33m"), // Yellow
            MessageLevel::Error => ("✗ ", "\x1b[31m"),   // Red
            MessageLevel::Debug => ("→ ", "\x1b[36m"),   // Cyan
        };
        let line = if self.colored && !color_code.is_empty() {
            format!("{color_code}{prefix}{message}\x1b[0m")
        } else {
            format!("{prefix}{message}")
        };

        match level {
            MessageLevel::Warning | MessageLevel::Error => eprintln!("{line}"),
            _ => println!("{line}"),
        }
    }

    /// Print a section header.
    pub fn section(&self, title: &str) {
        if !self.quiet {
            println!("\n{title}");
        }
    }

    /// Print a labelled value, in verbose mode only.
    pub fn detail(&self, label: &str, value: &str) {
        if self.verbose && !self.quiet {
            println!("  {label}: {value}");
        }
    }

    /// Print the pages in order, numbered from 1.
    pub fn page_list(&self, entries: &[PageEntry]) {
        if self.quiet {
            return;
        }
        for (position, entry) in entries.iter().enumerate() {
            println!("  {:>3}. {}", position + 1, entry.page);
        }
    }

    /// Print a blank line.
    pub fn blank_line(&self) {
        if !self.quiet {
            println!();
        }
    }

    /// Check if status output should be shown.
    pub fn should_print(&self) -> bool {
        !self.quiet
    }

    /// Check if verbose output should be shown.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new(false, false)
    }
}
