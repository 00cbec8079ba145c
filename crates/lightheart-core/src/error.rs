//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The story content violates a structural rule.
    #[error("validation error: {0}")]
    Validation(String),

    /// A storage or I/O failure.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
