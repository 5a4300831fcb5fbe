//! Domain error model.

use thiserror::Error;

/// Result type used across the availability domain.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only deterministic failures live here: malformed facts, rejected manual
/// edits, lookups of unknown variants and overlapping runs. None of them is
/// fatal; callers decide whether to surface or retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed variant facts).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (empty or unparsable).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A referenced variant or product does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A conflicting operation is already in progress.
    #[error("conflict: {0}")]
    Conflict(String),
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

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        assert_eq!(
            DomainError::validation("minimum_order_quantity must be >= 1").to_string(),
            "validation failed: minimum_order_quantity must be >= 1"
        );
        assert_eq!(
            DomainError::not_found("variant v-9").to_string(),
            "not found: variant v-9"
        );
        assert_eq!(
            DomainError::conflict("run in flight").to_string(),
            "conflict: run in flight"
        );
    }
}
