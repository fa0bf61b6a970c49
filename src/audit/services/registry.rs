//! Registration-time catalogue of marked data-access operations.

use super::MarkerError;
use crate::audit::domain::OperationType;
use std::collections::HashMap;

/// Operation markers keyed by operation name, scoped to one data-access
/// surface.
///
/// Operation names take the form `<surface>.<entity>.<operation>`; only
/// names under the surface namespace can be marked, and each operation
/// carries at most one marker.
///
/// # Example
///
/// ```
/// use ordering::audit::{domain::OperationType, services::MarkedOperations};
///
/// let markers = MarkedOperations::new("repository")
///     .mark("repository.order.insert", OperationType::Insert)?;
///
/// assert_eq!(markers.marker_for("repository.order.insert"), Some(OperationType::Insert));
/// assert_eq!(markers.marker_for("repository.order.find_by_id"), None);
/// # Ok::<(), ordering::audit::services::MarkerError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkedOperations {
    surface: String,
    markers: HashMap<String, OperationType>,
}

impl MarkedOperations {
    /// Creates an empty registry for `surface`.
    #[must_use]
    pub fn new(surface: impl Into<String>) -> Self {
        Self {
            surface: surface.into(),
            markers: HashMap::new(),
        }
    }

    /// Returns the surface namespace.
    #[must_use]
    pub fn surface(&self) -> &str {
        &self.surface
    }

    /// Attaches `marker` to `operation`.
    ///
    /// # Errors
    ///
    /// Returns [`MarkerError::OutsideSurface`] when the operation is not
    /// part of the surface and [`MarkerError::AlreadyMarked`] when it
    /// already carries a marker.
    pub fn mark(
        mut self,
        operation: impl Into<String>,
        marker: OperationType,
    ) -> Result<Self, MarkerError> {
        let name = operation.into();
        if !self.belongs_to_surface(&name) {
            return Err(MarkerError::OutsideSurface {
                operation: name,
                surface: self.surface,
            });
        }
        if let Some(existing) = self.markers.get(&name) {
            return Err(MarkerError::AlreadyMarked {
                operation: name,
                existing: *existing,
            });
        }
        self.markers.insert(name, marker);
        Ok(self)
    }

    /// Returns `true` when `operation` lives under the surface namespace.
    #[must_use]
    pub fn belongs_to_surface(&self, operation: &str) -> bool {
        operation
            .strip_prefix(self.surface.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
            .is_some_and(|rest| !rest.is_empty() && !rest.starts_with('.'))
    }

    /// Returns the marker of `operation` when it is inside the surface and
    /// marked.
    #[must_use]
    pub fn marker_for(&self, operation: &str) -> Option<OperationType> {
        if !self.belongs_to_surface(operation) {
            return None;
        }
        self.markers.get(operation).copied()
    }

    /// Returns the number of marked operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Returns `true` when nothing is marked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
