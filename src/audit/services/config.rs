//! Configuration for the auto-fill interceptor.

/// How the interceptor reacts when an audit field cannot be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log the failure, skip the field and let the operation proceed.
    #[default]
    FailOpen,
    /// Attempt every field, then refuse the operation if any field failed.
    FailClosed,
}

/// Configuration for audit-field auto-fill.
///
/// # Examples
///
/// ```
/// use ordering::audit::services::{AutoFillConfig, FailurePolicy};
///
/// let config = AutoFillConfig::default();
/// assert_eq!(config.failure_policy, FailurePolicy::FailOpen);
/// assert_eq!(config.surface, "repository");
///
/// let strict = AutoFillConfig::strict();
/// assert_eq!(strict.failure_policy, FailurePolicy::FailClosed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoFillConfig {
    /// Namespace prefix of the data-access operations that may be marked.
    pub surface: String,
    /// Reaction to per-field failures.
    pub failure_policy: FailurePolicy,
}

impl Default for AutoFillConfig {
    fn default() -> Self {
        Self {
            surface: "repository".to_owned(),
            failure_policy: FailurePolicy::FailOpen,
        }
    }
}

impl AutoFillConfig {
    /// Creates a fail-open configuration for the default surface.
    #[must_use]
    pub fn lenient() -> Self {
        Self::default()
    }

    /// Creates a fail-closed configuration for the default surface.
    ///
    /// Useful where incomplete audit metadata must never reach storage.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            failure_policy: FailurePolicy::FailClosed,
            ..Self::default()
        }
    }

    /// Replaces the data-access surface namespace.
    #[must_use]
    pub fn with_surface(mut self, surface: impl Into<String>) -> Self {
        self.surface = surface.into();
        self
    }
}
