//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

use crate::infrastructure::traits::Diagnostics;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Default diagnostic sink: coloured lines on stderr.
#[derive(Debug, Default)]
pub struct TerminalDiagnostics;

impl Diagnostics for TerminalDiagnostics {
    fn warning(&self, message: &str) {
        warning(message);
    }

    fn error(&self, message: &str) {
        error(message);
    }
}
