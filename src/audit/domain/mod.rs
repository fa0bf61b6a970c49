//! Domain model for audit-field auto-fill.
//!
//! These types carry no infrastructure concerns: the operation marker, the
//! audit field catalogue, and the actor identity of the current unit of work.

mod actor;
mod error;
mod field;
mod operation;

pub use actor::{ActorContext, ActorId};
pub use error::{AuditFieldError, AuditFieldResult, ParseOperationTypeError};
pub use field::AuditField;
pub use operation::OperationType;
