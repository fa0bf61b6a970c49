//! Service layer for placing, updating and reporting on orders.

use crate::audit::{domain::ActorContext, services::AutoFill};
use crate::order::{
    adapters::audited::AuditedOrderRepository,
    domain::{
        CustomerId, DeliveryContact, GoodsSales, NewOrder, Order, OrderDomainError, OrderId,
        OrderLine, OrderMetricsFilter, OrderNumber, OrderPageQuery, OrderStatus, Page,
    },
    ports::{OrderRepository, OrderRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

const PAYMENT_TIMEOUT_REASON: &str = "payment timed out";

/// Request payload for placing an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOrderRequest {
    customer_id: i64,
    consignee: String,
    phone: String,
    address: String,
    lines: Vec<(String, u32, i64)>,
    remark: Option<String>,
}

impl PlaceOrderRequest {
    /// Creates a request with the required delivery fields and no lines.
    #[must_use]
    pub fn new(
        customer_id: i64,
        consignee: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            customer_id,
            consignee: consignee.into(),
            phone: phone.into(),
            address: address.into(),
            lines: Vec::new(),
            remark: None,
        }
    }

    /// Adds a purchased line; `amount` is the line total in minor units.
    #[must_use]
    pub fn with_line(mut self, name: impl Into<String>, quantity: u32, amount: i64) -> Self {
        self.lines.push((name.into(), quantity, amount));
        self
    }

    /// Sets the customer remark.
    #[must_use]
    pub fn with_remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = Some(remark.into());
        self
    }
}

/// Service-level errors for order operations.
#[derive(Debug, Error)]
pub enum OrderServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] OrderDomainError),
    /// Repository operation failed, including auto-fill refusals.
    #[error(transparent)]
    Repository(#[from] OrderRepositoryError),
}

/// Result type for order service operations.
pub type OrderServiceResult<T> = Result<T, OrderServiceError>;

/// Order orchestration service.
///
/// Every mutating call takes the [`ActorContext`] of the current unit of
/// work and routes writes through [`AuditedOrderRepository`], so the audit
/// fields of the stored order reflect the clock and that actor.
#[derive(Clone)]
pub struct OrderService<R, C>
where
    R: OrderRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    repository: Arc<R>,
    auto_fill: Arc<AutoFill<C>>,
    clock: Arc<C>,
}

impl<R, C> OrderService<R, C>
where
    R: OrderRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a new order service.
    ///
    /// `auto_fill` must carry the order markers; see
    /// [`register_order_markers`](crate::order::adapters::audited::register_order_markers).
    #[must_use]
    pub const fn new(repository: Arc<R>, auto_fill: Arc<AutoFill<C>>, clock: Arc<C>) -> Self {
        Self {
            repository,
            auto_fill,
            clock,
        }
    }

    fn audited(&self, context: &ActorContext) -> AuditedOrderRepository<R, C> {
        AuditedOrderRepository::new(
            Arc::clone(&self.repository),
            Arc::clone(&self.auto_fill),
            *context,
        )
    }

    /// Places a pending-payment order with a generated number.
    ///
    /// # Errors
    ///
    /// Returns [`OrderServiceError::Domain`] when the request is invalid and
    /// [`OrderServiceError::Repository`] when the insert is rejected.
    pub async fn place_order(
        &self,
        request: PlaceOrderRequest,
        context: &ActorContext,
    ) -> OrderServiceResult<Order> {
        let lines = request
            .lines
            .into_iter()
            .map(|(name, quantity, amount)| OrderLine::new(name, quantity, amount))
            .collect::<Result<Vec<_>, _>>()?;
        let data = NewOrder {
            number: OrderNumber::generate(self.clock.utc()),
            customer_id: CustomerId::new(request.customer_id),
            contact: DeliveryContact::new(request.consignee, request.phone, request.address)?,
            lines,
            remark: request.remark,
        };

        let mut order = Order::place(data, &*self.clock)?;
        self.audited(context).insert(&mut order).await?;
        tracing::info!(
            order_id = %order.id(),
            number = %order.number(),
            amount = order.amount(),
            "order placed"
        );
        Ok(order)
    }

    /// Persists changes made to `order`, stamping its update fields.
    ///
    /// # Errors
    ///
    /// Returns [`OrderServiceError::Repository`] when the order does not
    /// exist or auto-fill refuses the write.
    pub async fn save(&self, order: &mut Order, context: &ActorContext) -> OrderServiceResult<()> {
        self.audited(context).update(order).await?;
        Ok(())
    }

    /// Retrieves an order by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`OrderServiceError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, id: OrderId) -> OrderServiceResult<Option<Order>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Retrieves an order by number.
    ///
    /// # Errors
    ///
    /// Returns [`OrderServiceError::Repository`] when lookup fails.
    pub async fn find_by_number(&self, number: &OrderNumber) -> OrderServiceResult<Option<Order>> {
        Ok(self.repository.find_by_number(number).await?)
    }

    /// Returns one page of order history, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`OrderServiceError::Repository`] when the query fails.
    pub async fn history(&self, query: &OrderPageQuery) -> OrderServiceResult<Page<Order>> {
        Ok(self.repository.page_query(query).await?)
    }

    /// Counts orders in `status`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderServiceError::Repository`] when the query fails.
    pub async fn count_by_status(&self, status: OrderStatus) -> OrderServiceResult<u64> {
        Ok(self.repository.count_by_status(status).await?)
    }

    /// Returns orders in `status` placed before `before`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderServiceError::Repository`] when the query fails.
    pub async fn overdue(
        &self,
        status: OrderStatus,
        before: DateTime<Utc>,
    ) -> OrderServiceResult<Vec<Order>> {
        Ok(self
            .repository
            .find_by_status_and_order_time_before(status, before)
            .await?)
    }

    /// Sums order totals matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderServiceError::Repository`] when the query fails.
    pub async fn turnover(&self, filter: &OrderMetricsFilter) -> OrderServiceResult<i64> {
        Ok(self.repository.sum_amount(filter).await?)
    }

    /// Counts orders matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderServiceError::Repository`] when the query fails.
    pub async fn order_count(&self, filter: &OrderMetricsFilter) -> OrderServiceResult<u64> {
        Ok(self.repository.count(filter).await?)
    }

    /// Returns the ten best-selling items among orders completed in
    /// `[begin, end)`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderServiceError::Repository`] when the query fails.
    pub async fn top_sales(
        &self,
        begin: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> OrderServiceResult<Vec<GoodsSales>> {
        let filter = OrderMetricsFilter::between(begin, end).with_status(OrderStatus::Completed);
        Ok(self.repository.sales_top10(&filter).await?)
    }

    /// Cancels every order still awaiting payment that was placed before
    /// `cutoff`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderServiceError::Repository`] on the first failed lookup
    /// or save; orders saved before the failure stay cancelled.
    pub async fn cancel_unpaid_before(
        &self,
        cutoff: DateTime<Utc>,
        context: &ActorContext,
    ) -> OrderServiceResult<Vec<OrderId>> {
        let now = self.clock.utc();
        self.sweep(OrderStatus::PendingPayment, cutoff, context, |order| {
            order.set_status(OrderStatus::Cancelled);
            order.record_cancellation(PAYMENT_TIMEOUT_REASON, now);
        })
        .await
    }

    /// Completes every order still in delivery that was placed before
    /// `cutoff`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderServiceError::Repository`] on the first failed lookup
    /// or save.
    pub async fn complete_delivering_before(
        &self,
        cutoff: DateTime<Utc>,
        context: &ActorContext,
    ) -> OrderServiceResult<Vec<OrderId>> {
        self.sweep(OrderStatus::Delivering, cutoff, context, |order| {
            order.set_status(OrderStatus::Completed);
        })
        .await
    }

    async fn sweep<F>(
        &self,
        status: OrderStatus,
        cutoff: DateTime<Utc>,
        context: &ActorContext,
        change: F,
    ) -> OrderServiceResult<Vec<OrderId>>
    where
        F: Fn(&mut Order) + Send + Sync,
    {
        let stale = self
            .repository
            .find_by_status_and_order_time_before(status, cutoff)
            .await?;
        let repository = self.audited(context);
        let mut swept = Vec::with_capacity(stale.len());
        for mut order in stale {
            change(&mut order);
            repository.update(&mut order).await?;
            swept.push(order.id());
        }
        if !swept.is_empty() {
            tracing::info!(from = ?status, count = swept.len(), "swept overdue orders");
        }
        Ok(swept)
    }
}
