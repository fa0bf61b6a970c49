//! Actor identity for the current unit of work.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the actor (employee, customer, system job) performing an
/// operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(i64);

impl ActorId {
    /// Wraps a raw actor identifier.
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

impl From<i64> for ActorId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Holder of the actor performing the current request or command.
///
/// The context is created when a unit of work starts, passed by reference to
/// every data-access call that may be auto-filled, and dropped (or
/// [`cleared`](Self::clear)) when the unit of work ends. Reading an empty
/// context yields `None`, never an error.
///
/// # Example
///
/// ```
/// use ordering::audit::domain::{ActorContext, ActorId};
///
/// let mut context = ActorContext::anonymous();
/// assert_eq!(context.current_actor(), None);
///
/// context.set_current_actor(ActorId::new(77));
/// assert_eq!(context.current_actor(), Some(ActorId::new(77)));
///
/// context.clear();
/// assert!(context.is_anonymous());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActorContext {
    actor: Option<ActorId>,
}

impl ActorContext {
    /// Creates a context with no actor set.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { actor: None }
    }

    /// Sets the actor of the unit of work.
    #[must_use]
    pub const fn with_actor(mut self, actor: ActorId) -> Self {
        self.actor = Some(actor);
        self
    }

    /// Stores `actor`, replacing any previous value.
    pub const fn set_current_actor(&mut self, actor: ActorId) {
        self.actor = Some(actor);
    }

    /// Returns the stored actor, or `None` when none was set.
    #[must_use]
    pub const fn current_actor(&self) -> Option<ActorId> {
        self.actor
    }

    /// Removes the stored actor.
    pub const fn clear(&mut self) {
        self.actor = None;
    }

    /// Returns `true` when no actor is set.
    #[must_use]
    pub const fn is_anonymous(&self) -> bool {
        self.actor.is_none()
    }
}
