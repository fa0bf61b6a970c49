//! Interceptor that stamps audit fields before marked operations run.

use super::{
    AutoFillConfig, AutoFillError, AutoFillResult, FailurePolicy, MarkedOperations, MarkerError,
};
use crate::audit::{
    domain::{ActorContext, ActorId, AuditField, AuditFieldError, OperationType},
    ports::Auditable,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;

/// Summary of one auto-fill pass over an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillReport {
    /// Marker that selected the field set.
    pub marker: OperationType,
    /// Instant written to the timestamp fields.
    pub at: DateTime<Utc>,
    /// Actor written to the actor fields.
    pub actor: Option<ActorId>,
    /// Fields written successfully, in stamping order.
    pub filled: Vec<AuditField>,
    /// Fields left untouched and the reason for each.
    pub skipped: Vec<AuditFieldError>,
}

impl FillReport {
    const fn new(marker: OperationType, at: DateTime<Utc>, actor: Option<ActorId>) -> Self {
        Self {
            marker,
            at,
            actor,
            filled: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Returns `true` when every field of the marker was written.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Result of intercepting one data-access call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillOutcome {
    /// The operation is unmarked or outside the surface; nothing was touched.
    NotTriggered,
    /// The operation is marked but received no entity argument.
    NoEntity,
    /// The first argument was stamped.
    Filled(FillReport),
}

impl FillOutcome {
    /// Returns the fill report when the entity was stamped.
    #[must_use]
    pub const fn report(&self) -> Option<&FillReport> {
        match self {
            Self::Filled(report) => Some(report),
            Self::NotTriggered | Self::NoEntity => None,
        }
    }
}

/// Audit-field interceptor.
///
/// `AutoFill` is configured once at start-up with the operations it guards
/// and is then shared by every unit of work. Each call samples the clock
/// once and reads the actor context once, so an insert stamps identical
/// creation and update values.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use ordering::audit::{
///     domain::OperationType,
///     services::{AutoFill, AutoFillConfig},
/// };
///
/// let auto_fill = AutoFill::new(Arc::new(DefaultClock), AutoFillConfig::default())
///     .mark("repository.order.insert", OperationType::Insert)?;
///
/// assert_eq!(auto_fill.markers().len(), 1);
/// # Ok::<(), ordering::audit::services::MarkerError>(())
/// ```
#[derive(Debug)]
pub struct AutoFill<C>
where
    C: Clock + Send + Sync,
{
    clock: Arc<C>,
    config: AutoFillConfig,
    markers: MarkedOperations,
}

impl<C> AutoFill<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an interceptor with no marked operations.
    #[must_use]
    pub fn new(clock: Arc<C>, config: AutoFillConfig) -> Self {
        let markers = MarkedOperations::new(config.surface.clone());
        Self {
            clock,
            config,
            markers,
        }
    }

    /// Marks `operation` so that calls to it are auto-filled.
    ///
    /// # Errors
    ///
    /// Returns [`MarkerError`] when the operation is outside the configured
    /// surface or already marked.
    pub fn mark(
        mut self,
        operation: impl Into<String>,
        marker: OperationType,
    ) -> Result<Self, MarkerError> {
        self.markers = self.markers.mark(operation, marker)?;
        Ok(self)
    }

    /// Returns the interceptor configuration.
    #[must_use]
    pub const fn config(&self) -> &AutoFillConfig {
        &self.config
    }

    /// Returns the registered operation markers.
    #[must_use]
    pub const fn markers(&self) -> &MarkedOperations {
        &self.markers
    }

    /// Intercepts a call to `operation` with argument list `args`.
    ///
    /// Only the first argument is stamped. Unmarked operations and empty
    /// argument lists pass through untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AutoFillError::Incomplete`] when a field could not be
    /// written and the policy is [`FailurePolicy::FailClosed`].
    pub fn intercept<E>(
        &self,
        operation: &str,
        args: &mut [E],
        context: &ActorContext,
    ) -> AutoFillResult<FillOutcome>
    where
        E: Auditable,
    {
        let Some(marker) = self.markers.marker_for(operation) else {
            tracing::trace!(operation, "operation not marked for auto-fill");
            return Ok(FillOutcome::NotTriggered);
        };
        let Some(entity) = args.first_mut() else {
            tracing::error!(
                operation,
                %marker,
                "marked operation invoked without an entity argument; audit fields not filled"
            );
            return Ok(FillOutcome::NoEntity);
        };

        tracing::debug!(operation, %marker, "auto-filling audit fields");
        self.apply(marker, entity, context).map(FillOutcome::Filled)
    }

    /// Stamps the field set of `marker` onto `entity`.
    ///
    /// Every field of the set is attempted even when an earlier one fails.
    ///
    /// # Errors
    ///
    /// Returns [`AutoFillError::Incomplete`] when a field could not be
    /// written and the policy is [`FailurePolicy::FailClosed`].
    pub fn apply<E>(
        &self,
        marker: OperationType,
        entity: &mut E,
        context: &ActorContext,
    ) -> AutoFillResult<FillReport>
    where
        E: Auditable + ?Sized,
    {
        let at = self.clock.utc();
        let actor = context.current_actor();
        if actor.is_none() {
            tracing::debug!(%marker, "no actor in context; actor fields receive none");
        }

        let mut report = FillReport::new(marker, at, actor);
        for &field in marker.fields() {
            match write_field(entity, field, at, actor) {
                Ok(()) => report.filled.push(field),
                Err(error) => {
                    tracing::warn!(%marker, %field, %error, "audit field not filled");
                    report.skipped.push(error);
                }
            }
        }

        if self.config.failure_policy == FailurePolicy::FailClosed && !report.is_complete() {
            return Err(AutoFillError::Incomplete {
                marker,
                failures: report.skipped,
            });
        }
        Ok(report)
    }
}

fn write_field<E>(
    entity: &mut E,
    field: AuditField,
    at: DateTime<Utc>,
    actor: Option<ActorId>,
) -> Result<(), AuditFieldError>
where
    E: Auditable + ?Sized,
{
    match field {
        AuditField::CreateTime => entity.set_create_time(at),
        AuditField::UpdateTime => entity.set_update_time(at),
        AuditField::CreateUser => entity.set_create_user(actor),
        AuditField::UpdateUser => entity.set_update_user(actor),
    }
}
