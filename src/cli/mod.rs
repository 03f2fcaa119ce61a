//! CLI layer: argument parsing and command dispatch

pub mod args;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;

pub use args::{Cli, Commands, ConfigCommands};
pub use commands::{execute_command, execute_standalone};
pub use error::{CliError, CliResult};
