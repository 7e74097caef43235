//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::ResourceKind;

/// Domain errors represent business logic violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{kind} {name} doesn't exist")]
    ResourceNotFound { kind: ResourceKind, name: String },

    #[error("invalid selector {selector}: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("invalid ssh public key: {message}")]
    InvalidPublicKey { message: String },
}
