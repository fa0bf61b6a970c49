//! Shared test helpers for `PostgreSQL` integration tests.

use std::sync::Arc;

use crate::test_helpers::{SteppedClock, instant};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use ordering::{
    audit::domain::{ActorContext, ActorId},
    audit::services::{AutoFill, AutoFillConfig},
    order::{
        adapters::{audited::register_order_markers, postgres::PostgresOrderRepository},
        services::{OrderService, PlaceOrderRequest},
    },
};
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::fixture;
use tokio::runtime::Runtime;

/// SQL creating the order tables.
pub const CREATE_ORDERS_SQL: &str =
    include_str!("../../migrations/2026-10-16-000000_create_orders/up.sql");

/// Template database name for pre-migrated schema.
pub const TEMPLATE_DB: &str = "ordering_test_template";

/// Order service backed by the `PostgreSQL` repository.
pub type PgOrderService = OrderService<PostgresOrderRepository, SteppedClock>;

/// Creates a tokio runtime for async operations in tests.
///
/// # Panics
///
/// Panics when the runtime cannot be built.
pub fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

/// Ensures the template database exists with the schema applied.
///
/// # Errors
///
/// Returns an error when the template cannot be created or migrated.
pub fn ensure_template(cluster: &TestCluster) -> eyre::Result<()> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            conn.batch_execute(CREATE_ORDERS_SQL)
                .map_err(|e| eyre::eyre!("migration failed: {e}"))?;
            Ok(())
        })
        .map_err(|e| eyre::eyre!("template setup failed: {e}"))
}

/// Drops the per-test database once everything using it is gone.
pub struct CleanupGuard {
    cluster: &'static TestCluster,
    db_name: String,
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        if let Err(err) = self.cluster.drop_database(self.db_name.as_str()) {
            tracing::warn!(db_name = %self.db_name, error = %err, "failed to drop test database");
        }
    }
}

/// Repository, service and clock over a fresh database.
///
/// Fields drop in declaration order, so the pool closes before the
/// database is dropped.
pub struct PgHarness {
    /// Clock driving order times and audit stamps.
    pub clock: Arc<SteppedClock>,
    /// Repository shared with the service.
    pub repository: Arc<PostgresOrderRepository>,
    /// Service under test.
    pub service: PgOrderService,
    /// Runtime driving the async calls.
    pub runtime: Runtime,
    database: CleanupGuard,
}

/// Start of the test day; the harness clock begins here.
pub fn opening() -> chrono::DateTime<chrono::Utc> {
    instant(2026, 10, 16, 9, 0)
}

/// Provides a service over a database cloned from the migrated template.
///
/// # Panics
///
/// Panics when the template, database or pool cannot be set up.
#[fixture]
pub fn pg(shared_test_cluster: &'static TestCluster) -> PgHarness {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_orders_{}", uuid::Uuid::new_v4().simple());
    shared_test_cluster
        .create_database_from_template(db_name.as_str(), TEMPLATE_DB)
        .expect("database from template");
    let database = CleanupGuard {
        cluster: shared_test_cluster,
        db_name,
    };

    let url = shared_test_cluster
        .connection()
        .database_url(&database.db_name);
    let pool = Pool::builder()
        .max_size(1)
        .build(ConnectionManager::<PgConnection>::new(url))
        .expect("connection pool");
    let repository = Arc::new(PostgresOrderRepository::new(pool));

    let clock = Arc::new(SteppedClock::at(opening()));
    let auto_fill = register_order_markers(AutoFill::new(
        Arc::clone(&clock),
        AutoFillConfig::default(),
    ))
    .expect("order markers register");
    let service = OrderService::new(
        Arc::clone(&repository),
        Arc::new(auto_fill),
        Arc::clone(&clock),
    );

    PgHarness {
        clock,
        repository,
        service,
        runtime: test_runtime(),
        database,
    }
}

/// Returns a context acting as `id`.
pub fn acting_as(id: i64) -> ActorContext {
    ActorContext::anonymous().with_actor(ActorId::new(id))
}

/// Returns an order request for `customer` with the given lines.
pub fn basket(customer: i64, phone: &str, lines: &[(&str, u32, i64)]) -> PlaceOrderRequest {
    lines.iter().fold(
        PlaceOrderRequest::new(customer, "Grace", phone, "7 Harbour Road"),
        |request, &(name, quantity, amount)| request.with_line(name, quantity, amount),
    )
}
