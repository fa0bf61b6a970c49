//! Identifier and validated scalar types for the order domain.

use super::OrderDomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an order record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Creates a new random order identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an order identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the customer who placed an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(i64);

impl CustomerId {
    /// Wraps a raw customer identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human-facing order number, unique across orders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Longest order number accepted by the storage schema.
    pub const MAX_LENGTH: usize = 50;

    /// Creates a validated order number.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::InvalidOrderNumber`] when the value is
    /// empty, longer than [`Self::MAX_LENGTH`] or contains whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, OrderDomainError> {
        let raw = value.into();
        let is_valid = !raw.is_empty()
            && raw.len() <= Self::MAX_LENGTH
            && !raw.chars().any(char::is_whitespace);
        if !is_valid {
            return Err(OrderDomainError::InvalidOrderNumber(raw));
        }
        Ok(Self(raw))
    }

    /// Generates a number from the placement instant plus a random suffix.
    #[must_use]
    pub fn generate(at: DateTime<Utc>) -> Self {
        let suffix: String = Uuid::new_v4().simple().to_string().chars().take(6).collect();
        Self(format!("{}{suffix}", at.format("%Y%m%d%H%M%S%3f")))
    }

    /// Returns the order number as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for OrderNumber {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
