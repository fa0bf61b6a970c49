//! Catalogue of the audit fields stamped by auto-fill.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four audit fields carried by auditable entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditField {
    /// Instant the entity was created.
    CreateTime,
    /// Instant the entity was last modified.
    UpdateTime,
    /// Actor that created the entity.
    CreateUser,
    /// Actor that last modified the entity.
    UpdateUser,
}

impl AuditField {
    /// Returns the canonical column-style name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateTime => "create_time",
            Self::UpdateTime => "update_time",
            Self::CreateUser => "create_user",
            Self::UpdateUser => "update_user",
        }
    }

    /// Returns `true` for the timestamp fields.
    #[must_use]
    pub const fn is_time(self) -> bool {
        matches!(self, Self::CreateTime | Self::UpdateTime)
    }
}

impl fmt::Display for AuditField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
