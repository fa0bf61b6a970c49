//! Errors raised by the auto-fill interceptor and its marker registry.

use crate::audit::domain::{AuditFieldError, OperationType};
use thiserror::Error;

/// Result type for interceptor operations.
pub type AutoFillResult<T> = Result<T, AutoFillError>;

/// Errors returned by [`AutoFill`](super::AutoFill).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AutoFillError {
    /// One or more audit fields could not be written while the interceptor
    /// runs with [`FailurePolicy::FailClosed`](super::FailurePolicy::FailClosed).
    #[error("auto-fill for {marker} left {} field(s) unset", failures.len())]
    Incomplete {
        /// Marker of the intercepted operation.
        marker: OperationType,
        /// Per-field failures in stamping order.
        failures: Vec<AuditFieldError>,
    },
}

/// Errors returned while registering operation markers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MarkerError {
    /// The operation name does not belong to the data-access surface.
    #[error("operation '{operation}' is outside data-access surface '{surface}'")]
    OutsideSurface {
        /// Rejected operation name.
        operation: String,
        /// Configured surface namespace.
        surface: String,
    },

    /// The operation already carries a marker.
    #[error("operation '{operation}' is already marked {existing}")]
    AlreadyMarked {
        /// Operation name.
        operation: String,
        /// Marker registered first.
        existing: OperationType,
    },
}
