//! Capability contract for entities that carry audit fields.

use crate::audit::domain::{ActorId, AuditFieldResult};
use chrono::{DateTime, Utc};

/// Entity capable of receiving audit metadata.
///
/// Each mutator writes one audit field. Implementations return
/// [`AuditFieldError::Unsupported`] for a field they do not carry and
/// [`AuditFieldError::Rejected`] when they refuse a value; the interceptor
/// isolates such failures per field.
///
/// Actor mutators receive `None` when the unit of work has no actor.
///
/// [`AuditFieldError::Unsupported`]: crate::audit::domain::AuditFieldError::Unsupported
/// [`AuditFieldError::Rejected`]: crate::audit::domain::AuditFieldError::Rejected
#[cfg_attr(test, mockall::automock)]
pub trait Auditable {
    /// Writes the creation timestamp.
    ///
    /// # Errors
    ///
    /// Returns an [`AuditFieldError`](crate::audit::domain::AuditFieldError)
    /// when the field is unsupported or the value is refused.
    fn set_create_time(&mut self, at: DateTime<Utc>) -> AuditFieldResult;

    /// Writes the last-modification timestamp.
    ///
    /// # Errors
    ///
    /// Returns an [`AuditFieldError`](crate::audit::domain::AuditFieldError)
    /// when the field is unsupported or the value is refused.
    fn set_update_time(&mut self, at: DateTime<Utc>) -> AuditFieldResult;

    /// Writes the creating actor.
    ///
    /// # Errors
    ///
    /// Returns an [`AuditFieldError`](crate::audit::domain::AuditFieldError)
    /// when the field is unsupported or the value is refused.
    fn set_create_user(&mut self, actor: Option<ActorId>) -> AuditFieldResult;

    /// Writes the last-modifying actor.
    ///
    /// # Errors
    ///
    /// Returns an [`AuditFieldError`](crate::audit::domain::AuditFieldError)
    /// when the field is unsupported or the value is refused.
    fn set_update_user(&mut self, actor: Option<ActorId>) -> AuditFieldResult;
}
