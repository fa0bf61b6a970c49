//! Order repository decorator that applies audit auto-fill to marked
//! operations.
//!
//! The decorator is built per unit of work around a shared repository and
//! a shared [`AutoFill`] interceptor, and carries the actor of that unit
//! of work as an explicit [`ActorContext`] value.

use crate::audit::{
    domain::{ActorContext, OperationType},
    services::{AutoFill, MarkerError},
};
use crate::order::{
    domain::{GoodsSales, Order, OrderId, OrderMetricsFilter, OrderNumber, OrderPageQuery, OrderStatus, Page},
    ports::{OrderRepository, OrderRepositoryResult, operations},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;

/// Registers the insert and update markers of the order repository on
/// `auto_fill`.
///
/// # Errors
///
/// Returns [`MarkerError`] when the interceptor is scoped to a surface
/// other than [`operations::SURFACE`] or the operations are already marked.
pub fn register_order_markers<C>(auto_fill: AutoFill<C>) -> Result<AutoFill<C>, MarkerError>
where
    C: Clock + Send + Sync,
{
    auto_fill
        .mark(operations::INSERT, OperationType::Insert)?
        .mark(operations::UPDATE, OperationType::Update)
}

/// Order repository wrapper that stamps audit fields before writes.
pub struct AuditedOrderRepository<R, C>
where
    R: OrderRepository,
    C: Clock + Send + Sync,
{
    inner: Arc<R>,
    auto_fill: Arc<AutoFill<C>>,
    context: ActorContext,
}

impl<R, C> AuditedOrderRepository<R, C>
where
    R: OrderRepository,
    C: Clock + Send + Sync,
{
    /// Wraps `inner` for one unit of work performed by `context`.
    #[must_use]
    pub const fn new(inner: Arc<R>, auto_fill: Arc<AutoFill<C>>, context: ActorContext) -> Self {
        Self {
            inner,
            auto_fill,
            context,
        }
    }

    /// Returns the actor context of this unit of work.
    #[must_use]
    pub const fn context(&self) -> &ActorContext {
        &self.context
    }

    fn fill(&self, operation: &str, order: &mut Order) -> OrderRepositoryResult<()> {
        self.auto_fill
            .intercept(operation, std::slice::from_mut(order), &self.context)?;
        Ok(())
    }
}

#[async_trait]
impl<R, C> OrderRepository for AuditedOrderRepository<R, C>
where
    R: OrderRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    async fn insert(&self, order: &mut Order) -> OrderRepositoryResult<()> {
        self.fill(operations::INSERT, order)?;
        self.inner.insert(order).await
    }

    async fn update(&self, order: &mut Order) -> OrderRepositoryResult<()> {
        self.fill(operations::UPDATE, order)?;
        self.inner.update(order).await
    }

    async fn find_by_id(&self, id: OrderId) -> OrderRepositoryResult<Option<Order>> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_number(&self, number: &OrderNumber) -> OrderRepositoryResult<Option<Order>> {
        self.inner.find_by_number(number).await
    }

    async fn page_query(&self, query: &OrderPageQuery) -> OrderRepositoryResult<Page<Order>> {
        self.inner.page_query(query).await
    }

    async fn count_by_status(&self, status: OrderStatus) -> OrderRepositoryResult<u64> {
        self.inner.count_by_status(status).await
    }

    async fn find_by_status_and_order_time_before(
        &self,
        status: OrderStatus,
        before: DateTime<Utc>,
    ) -> OrderRepositoryResult<Vec<Order>> {
        self.inner
            .find_by_status_and_order_time_before(status, before)
            .await
    }

    async fn sum_amount(&self, filter: &OrderMetricsFilter) -> OrderRepositoryResult<i64> {
        self.inner.sum_amount(filter).await
    }

    async fn count(&self, filter: &OrderMetricsFilter) -> OrderRepositoryResult<u64> {
        self.inner.count(filter).await
    }

    async fn sales_top10(
        &self,
        filter: &OrderMetricsFilter,
    ) -> OrderRepositoryResult<Vec<GoodsSales>> {
        self.inner.sales_top10(filter).await
    }
}
