//! Domain error model.

use thiserror::Error;

/// Result type used across the catalog crates.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Validation and conflict errors are field-level and recoverable: the caller
/// shows them next to the offending input and lets the user re-enter.
/// `GenerationExhausted` is the one hard failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed code).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A catalog invariant was violated (e.g. duplicate value code within an axis).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A code or SKU collides with one already in use.
    #[error("conflict: {0}")]
    Conflict(String),

    /// No free code could be found within the attempt cap.
    #[error("code generation exhausted after {attempts} attempts")]
    GenerationExhausted { attempts: u32 },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn exhausted(attempts: u32) -> Self {
        Self::GenerationExhausted { attempts }
    }

    /// True for the field-level failures a form can recover from.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::GenerationExhausted { .. })
    }
}
