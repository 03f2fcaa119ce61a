//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent invalid user input independent of any transport.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("malformed JSON parameters: {0}")]
    MalformedParams(#[from] serde_json::Error),

    #[error("tool parameters must be a JSON object, got {kind}")]
    ParamsNotObject { kind: &'static str },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
