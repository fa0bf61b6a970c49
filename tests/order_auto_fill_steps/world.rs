//! Shared world state for order auto-fill BDD scenarios.

use std::sync::Arc;

use crate::test_helpers::{SteppedClock, TestOrderService, order_service};
use chrono::{DateTime, Utc};
use ordering::{
    audit::{domain::ActorContext, services::AutoFillConfig},
    order::{domain::Order, services::PlaceOrderRequest},
};
use rstest::fixture;

/// Scenario world for order auto-fill behaviour tests.
pub struct OrderWorld {
    pub clock: Arc<SteppedClock>,
    pub service: TestOrderService,
    pub context: ActorContext,
    pub order: Option<Order>,
    pub looked_up: Option<Order>,
}

impl OrderWorld {
    /// Creates a world with an anonymous context and no order.
    ///
    /// # Panics
    ///
    /// Panics when the order markers cannot be registered.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(SteppedClock::at(DateTime::<Utc>::UNIX_EPOCH));
        let service =
            order_service(&clock, AutoFillConfig::default()).expect("order markers register");
        Self {
            clock,
            service,
            context: ActorContext::anonymous(),
            order: None,
            looked_up: None,
        }
    }

    /// Returns the order placed in this scenario.
    pub fn placed(&self) -> Result<&Order, eyre::Report> {
        self.order
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no order placed in scenario world"))
    }
}

impl Default for OrderWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> OrderWorld {
    OrderWorld::default()
}

/// Request used for every scenario order.
pub fn lunch_request() -> PlaceOrderRequest {
    PlaceOrderRequest::new(21, "Barbara", "13600136000", "4 Liskov Lane").with_line("rice", 1, 900)
}

/// Parses an RFC 3339 instant from a step argument.
pub fn parse_instant(raw: &str) -> Result<DateTime<Utc>, eyre::Report> {
    Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
