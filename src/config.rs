//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Settings file: `--config <path>`, else `$XDG_CONFIG_HOME/mcp-tool/mcp-tool.toml`
//! 3. Environment variables: `MCP_TOOL_*` prefix
//! 4. Command-line flags (applied by the CLI layer)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

const APP_NAME: &str = "mcp-tool";
const ENV_PREFIX: &str = "MCP_TOOL";
const DEFAULT_SHELL: &str = "sh";
const REDACTED: &str = "<redacted>";

/// Unified configuration for mcp-tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Server target: URL or shell command line
    pub server: Option<String>,
    /// Bearer token for HTTP servers
    pub bearer_token: Option<String>,
    /// Debug logging and subprocess stderr passthrough
    pub debug: bool,
    /// Interpreter used to run command targets (`<shell> -c <target>`)
    pub shell: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: None,
            bearer_token: None,
            debug: false,
            shell: DEFAULT_SHELL.into(),
        }
    }
}

/// Raw settings for intermediate parsing (`None` = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub server: Option<String>,
    pub bearer_token: Option<String>,
    pub debug: Option<bool>,
    pub shell: Option<String>,
}

/// Get the XDG config directory for mcp-tool.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join(format!("{}.toml", APP_NAME)))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// Unset keys inherit; a value that is set but unusable is an error.
fn optional<T>(value: Result<T, ConfigError>) -> Result<Option<T>, ApplicationError> {
    match value {
        Ok(v) => Ok(Some(v)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

impl Settings {
    /// Merge overlay config onto self (base): overlay wins where specified.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            server: overlay.server.clone().or_else(|| self.server.clone()),
            bearer_token: overlay
                .bearer_token
                .clone()
                .or_else(|| self.bearer_token.clone()),
            debug: overlay.debug.unwrap_or(self.debug),
            shell: overlay.shell.clone().unwrap_or_else(|| self.shell.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Explicit settings file; must exist. When `None` the
    ///   global file is used if present.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        match config_file {
            Some(path) => {
                current = current.merge_with(&load_raw_settings(path)?);
            }
            None => {
                if let Some(global_path) = global_config_path() {
                    if global_path.exists() {
                        current = current.merge_with(&load_raw_settings(&global_path)?);
                    }
                }
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Apply MCP_TOOL_* environment variables as explicit overrides.
    fn apply_env_overrides(settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .map_err(config_err)?;

        let overlay = RawSettings {
            server: optional(config.get_string("server"))?,
            bearer_token: optional(config.get_string("bearer_token"))?,
            debug: optional(config.get_bool("debug"))?,
            shell: optional(config.get_string("shell"))?,
        };

        Ok(settings.merge_with(&overlay))
    }

    /// Copy safe to print: the bearer token is masked.
    pub fn redacted(&self) -> Self {
        Self {
            bearer_token: self.bearer_token.as_ref().map(|_| REDACTED.to_string()),
            ..self.clone()
        }
    }

    /// Render as TOML (used by `config show`).
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}
