//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Repository error: {0}")]
    Repository(String),

    /// A simulated wait was interrupted before it finished.
    #[error("Operation cancelled")]
    Cancelled,

    #[error("Validation error: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn repository<E: std::fmt::Display>(err: E) -> Self {
        Self::Repository(err.to_string())
    }
}
