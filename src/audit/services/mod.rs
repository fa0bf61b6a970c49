//! Interceptor services for audit-field auto-fill.

mod auto_fill;
mod config;
mod error;
mod registry;

pub use auto_fill::{AutoFill, FillOutcome, FillReport};
pub use config::{AutoFillConfig, FailurePolicy};
pub use error::{AutoFillError, AutoFillResult, MarkerError};
pub use registry::MarkedOperations;
