//! Tool call parameter resolution
//!
//! Parameters come either inline (`--params`) or from a file
//! (`--params-file`), never both.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{parse_tool_arguments, ToolArguments};

/// Where the JSON parameters for `call` come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamsSource {
    Inline(String),
    File(PathBuf),
}

impl Default for ParamsSource {
    fn default() -> Self {
        Self::Inline("{}".to_string())
    }
}

impl ParamsSource {
    /// Pick the source from the two mutually exclusive options.
    ///
    /// Neither given means `{}`.
    pub fn from_options(inline: Option<&str>, file: Option<&Path>) -> ApplicationResult<Self> {
        match (inline, file) {
            (Some(_), Some(_)) => Err(ApplicationError::ConflictingParams),
            (Some(json), None) => Ok(Self::Inline(json.to_string())),
            (None, Some(path)) => Ok(Self::File(path.to_path_buf())),
            (None, None) => Ok(Self::default()),
        }
    }

    /// Read (if needed) and parse the parameters.
    #[instrument(level = "debug")]
    pub fn load(&self) -> ApplicationResult<ToolArguments> {
        let arguments = match self {
            Self::Inline(json) => parse_tool_arguments(json)?,
            Self::File(path) => {
                let content =
                    std::fs::read_to_string(path).map_err(|source| ApplicationError::ParamsFile {
                        path: path.clone(),
                        source,
                    })?;
                parse_tool_arguments(&content)?
            }
        };
        debug!("load: {} argument(s)", arguments.len());
        Ok(arguments)
    }
}
