//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("No server specified. Use --server to specify an MCP server.")]
    MissingServer,

    #[error("--params and --params-file are mutually exclusive")]
    ConflictingParams,

    #[error("cannot read parameters file {path}: {source}")]
    ParamsFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("failed to connect to MCP server '{target}': {message}")]
    Connect { target: String, message: String },

    #[error("{operation} failed: {message}")]
    Protocol {
        operation: &'static str,
        message: String,
    },

    #[error("failed to close MCP session: {message}")]
    Disconnect { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
