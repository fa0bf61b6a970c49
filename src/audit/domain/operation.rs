//! Operation marker attached to data-access operations at registration time.

use super::{AuditField, ParseOperationTypeError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker describing which audit-field set a data-access operation needs.
///
/// # Examples
///
/// ```
/// use ordering::audit::domain::{AuditField, OperationType};
///
/// assert_eq!(OperationType::Update.fields(), &[AuditField::UpdateTime, AuditField::UpdateUser]);
/// assert_eq!(OperationType::try_from("INSERT"), Ok(OperationType::Insert));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    /// The operation creates a new entity.
    Insert,
    /// The operation modifies an existing entity.
    Update,
}

const INSERT_FIELDS: [AuditField; 4] = [
    AuditField::CreateTime,
    AuditField::UpdateTime,
    AuditField::CreateUser,
    AuditField::UpdateUser,
];

const UPDATE_FIELDS: [AuditField; 2] = [AuditField::UpdateTime, AuditField::UpdateUser];

impl OperationType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Update => "update",
        }
    }

    /// Returns the audit fields stamped for this marker, in stamping order.
    #[must_use]
    pub const fn fields(self) -> &'static [AuditField] {
        match self {
            Self::Insert => &INSERT_FIELDS,
            Self::Update => &UPDATE_FIELDS,
        }
    }
}

impl TryFrom<&str> for OperationType {
    type Error = ParseOperationTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "insert" => Ok(Self::Insert),
            "update" => Ok(Self::Update),
            _ => Err(ParseOperationTypeError(value.to_owned())),
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
