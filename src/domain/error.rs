//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::node::NodeKind;

/// Domain errors represent structural violations of the node hierarchy.
/// These are independent of formatting and I/O concerns.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("invalid operation on '{label}': {reason}")]
    InvalidOperation { label: String, reason: String },

    #[error("operation has no handler for node kind: {0}")]
    UnhandledVariant(NodeKind),

    #[error("invalid payload for '{label}': {reason}")]
    InvalidPayload { label: String, reason: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
