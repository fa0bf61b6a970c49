//! Error types for audit field mutation and marker parsing.

use super::AuditField;
use thiserror::Error;

/// Result type returned by individual audit field mutators.
pub type AuditFieldResult = Result<(), AuditFieldError>;

/// Errors raised while writing a single audit field onto an entity.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuditFieldError {
    /// The entity does not carry the audit field.
    #[error("entity does not support audit field {0}")]
    Unsupported(AuditField),

    /// The entity refused the value for the audit field.
    #[error("entity rejected audit field {field}: {reason}")]
    Rejected {
        /// The field that could not be written.
        field: AuditField,
        /// Entity-supplied explanation.
        reason: String,
    },
}

impl AuditFieldError {
    /// Builds a rejection error for `field`.
    #[must_use]
    pub fn rejected(field: AuditField, reason: impl Into<String>) -> Self {
        Self::Rejected {
            field,
            reason: reason.into(),
        }
    }

    /// Returns the audit field the error refers to.
    #[must_use]
    pub const fn field(&self) -> AuditField {
        match self {
            Self::Unsupported(field) | Self::Rejected { field, .. } => *field,
        }
    }
}

/// Error returned while parsing an operation marker from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown operation type: {0}")]
pub struct ParseOperationTypeError(pub String);
