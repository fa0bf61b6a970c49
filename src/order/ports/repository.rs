//! Repository port for order persistence, lookup and reporting.

use crate::audit::services::AutoFillError;
use crate::order::domain::{
    GoodsSales, Order, OrderId, OrderMetricsFilter, OrderNumber, OrderPageQuery, OrderStatus, Page,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for order repository operations.
pub type OrderRepositoryResult<T> = Result<T, OrderRepositoryError>;

/// Stable operation names for the order repository surface.
///
/// Audit markers are registered against these names; see
/// [`crate::order::adapters::audited::register_order_markers`].
pub mod operations {
    /// Surface every order repository operation belongs to.
    pub const SURFACE: &str = "repository";
    /// [`super::OrderRepository::insert`].
    pub const INSERT: &str = "repository.order.insert";
    /// [`super::OrderRepository::update`].
    pub const UPDATE: &str = "repository.order.update";
}

/// Order persistence contract.
///
/// Write operations take the order mutably so that decorators may stamp
/// audit fields onto the caller's instance before it is stored.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Stores a new order with its lines.
    ///
    /// # Errors
    ///
    /// Returns [`OrderRepositoryError::DuplicateOrder`] when the identifier
    /// exists or [`OrderRepositoryError::DuplicateNumber`] when the order
    /// number is taken.
    async fn insert(&self, order: &mut Order) -> OrderRepositoryResult<()>;

    /// Persists changes to an existing order.
    ///
    /// Lines are fixed at placement and are not rewritten.
    ///
    /// # Errors
    ///
    /// Returns [`OrderRepositoryError::NotFound`] when the order does not
    /// exist.
    async fn update(&self, order: &mut Order) -> OrderRepositoryResult<()>;

    /// Finds an order by identifier.
    async fn find_by_id(&self, id: OrderId) -> OrderRepositoryResult<Option<Order>>;

    /// Finds an order by its number.
    async fn find_by_number(&self, number: &OrderNumber) -> OrderRepositoryResult<Option<Order>>;

    /// Returns one page of orders matching the query, newest first.
    async fn page_query(&self, query: &OrderPageQuery) -> OrderRepositoryResult<Page<Order>>;

    /// Counts orders in the given status.
    async fn count_by_status(&self, status: OrderStatus) -> OrderRepositoryResult<u64>;

    /// Returns orders in `status` placed strictly before `before`.
    async fn find_by_status_and_order_time_before(
        &self,
        status: OrderStatus,
        before: DateTime<Utc>,
    ) -> OrderRepositoryResult<Vec<Order>>;

    /// Sums order totals matching the filter; zero when nothing matches.
    async fn sum_amount(&self, filter: &OrderMetricsFilter) -> OrderRepositoryResult<i64>;

    /// Counts orders matching the filter.
    async fn count(&self, filter: &OrderMetricsFilter) -> OrderRepositoryResult<u64>;

    /// Returns up to ten best-selling item names by quantity for orders
    /// matching the filter, highest first and ties broken by name.
    async fn sales_top10(&self, filter: &OrderMetricsFilter) -> OrderRepositoryResult<Vec<GoodsSales>>;
}

/// Errors returned by order repository implementations.
#[derive(Debug, Clone, Error)]
pub enum OrderRepositoryError {
    /// An order with the same identifier already exists.
    #[error("duplicate order identifier: {0}")]
    DuplicateOrder(OrderId),

    /// An order with the same number already exists.
    #[error("duplicate order number: {0}")]
    DuplicateNumber(OrderNumber),

    /// The order was not found.
    #[error("order not found: {0}")]
    NotFound(OrderId),

    /// Audit auto-fill refused the write.
    #[error(transparent)]
    AutoFill(#[from] AutoFillError),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl OrderRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
