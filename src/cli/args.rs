//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::config::Settings;

/// Command line tool for interacting with an MCP server.
#[derive(Parser, Debug)]
#[command(name = "mcp-tool")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// MCP Server - either a URL or a command to run over stdio
    #[arg(long, global = true, value_name = "TARGET")]
    pub server: Option<String>,

    /// Enable debug logging including stdio server stderr output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Bearer token for HTTP server authentication
    #[arg(long, global = true, value_name = "TOKEN")]
    pub bearer_token: Option<String>,

    /// Settings file (default: $XDG_CONFIG_HOME/mcp-tool/mcp-tool.toml)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available tools
    Tools,

    /// Call a tool with parameters
    Call {
        /// Name of the tool to call
        tool_name: String,
        /// JSON string of parameters to pass to the tool (default: {})
        #[arg(long, value_name = "JSON")]
        params: Option<String>,
        /// JSON file of parameters to pass to the tool
        #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
        params_file: Option<PathBuf>,
    },

    /// List available resources
    Resources,

    /// List available prompts
    Prompts,

    /// Print the version
    Version,

    /// Inspect settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged settings (bearer token redacted)
    Show,

    /// Show settings file path
    Path,
}

impl Cli {
    /// Layer command-line flags on top of loaded settings.
    ///
    /// `--debug` can only switch debug on; it never turns off a debug
    /// setting that came from a file or the environment.
    pub fn apply_to(&self, settings: Settings) -> Settings {
        Settings {
            server: self.server.clone().or(settings.server),
            bearer_token: self.bearer_token.clone().or(settings.bearer_token),
            debug: self.debug || settings.debug,
            shell: settings.shell,
        }
    }
}
