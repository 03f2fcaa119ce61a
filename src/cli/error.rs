//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::exitcode;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => exitcode::USAGE,
            CliError::Infra(InfraError::Io { .. }) => exitcode::IOERR,
            CliError::Infra(InfraError::Application(e)) => match e {
                ApplicationError::MissingServer | ApplicationError::ConflictingParams => {
                    exitcode::USAGE
                }
                ApplicationError::ParamsFile { .. } => exitcode::NOINPUT,
                ApplicationError::Domain(
                    DomainError::MalformedParams(_) | DomainError::ParamsNotObject { .. },
                ) => exitcode::DATAERR,
                ApplicationError::Config { .. } => exitcode::CONFIG,
                ApplicationError::Connect { .. } => exitcode::UNAVAILABLE,
                ApplicationError::Protocol { .. } | ApplicationError::Disconnect { .. } => {
                    exitcode::SOFTWARE
                }
            },
        }
    }
}
