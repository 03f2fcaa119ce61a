//! Command line client for Model Context Protocol servers.
//!
//! Connects to a server over stdio (a shell command) or streamable HTTP (a
//! URL), performs exactly one request per invocation and prints the result.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

/// Crate version, as printed by `mcp-tool version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
