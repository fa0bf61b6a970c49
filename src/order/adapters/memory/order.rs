//! In-memory repository for order tests and local runs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::order::{
    domain::{
        GoodsSales, Order, OrderId, OrderMetricsFilter, OrderNumber, OrderPageQuery, OrderStatus,
        Page,
    },
    ports::{OrderRepository, OrderRepositoryError, OrderRepositoryResult},
};

/// Thread-safe in-memory order repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderRepository {
    state: Arc<RwLock<InMemoryOrderState>>,
}

#[derive(Debug, Default)]
struct InMemoryOrderState {
    orders: HashMap<OrderId, Order>,
    number_index: HashMap<OrderNumber, OrderId>,
}

impl InMemoryOrderRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> OrderRepositoryResult<RwLockReadGuard<'_, InMemoryOrderState>> {
        self.state.read().map_err(|err| {
            OrderRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> OrderRepositoryResult<RwLockWriteGuard<'_, InMemoryOrderState>> {
        self.state.write().map_err(|err| {
            OrderRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

fn matches_page_query(order: &Order, query: &OrderPageQuery) -> bool {
    let contact = order.contact();
    query.customer_id().is_none_or(|id| id == order.customer_id())
        && query.status().is_none_or(|status| status == order.status())
        && query
            .number()
            .is_none_or(|fragment| order.number().as_str().contains(fragment))
        && query
            .phone()
            .is_none_or(|fragment| contact.phone().contains(fragment))
        && query.begin().is_none_or(|begin| order.order_time() >= begin)
        && query.end().is_none_or(|end| order.order_time() < end)
}

fn newest_first(orders: &mut [Order]) {
    orders.sort_by_key(|order| Reverse(order.order_time()));
}

fn matching<'a>(
    state: &'a InMemoryOrderState,
    filter: &'a OrderMetricsFilter,
) -> impl Iterator<Item = &'a Order> + 'a {
    state
        .orders
        .values()
        .filter(|order| filter.matches(order.status(), order.order_time()))
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn insert(&self, order: &mut Order) -> OrderRepositoryResult<()> {
        let mut state = self.write()?;
        if state.orders.contains_key(&order.id()) {
            return Err(OrderRepositoryError::DuplicateOrder(order.id()));
        }
        if state.number_index.contains_key(order.number()) {
            return Err(OrderRepositoryError::DuplicateNumber(order.number().clone()));
        }

        state.number_index.insert(order.number().clone(), order.id());
        state.orders.insert(order.id(), order.clone());
        Ok(())
    }

    async fn update(&self, order: &mut Order) -> OrderRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .orders
            .get_mut(&order.id())
            .ok_or(OrderRepositoryError::NotFound(order.id()))?;
        *stored = order.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: OrderId) -> OrderRepositoryResult<Option<Order>> {
        let state = self.read()?;
        Ok(state.orders.get(&id).cloned())
    }

    async fn find_by_number(&self, number: &OrderNumber) -> OrderRepositoryResult<Option<Order>> {
        let state = self.read()?;
        Ok(state
            .number_index
            .get(number)
            .and_then(|id| state.orders.get(id))
            .cloned())
    }

    async fn page_query(&self, query: &OrderPageQuery) -> OrderRepositoryResult<Page<Order>> {
        let state = self.read()?;
        let mut matched: Vec<Order> = state
            .orders
            .values()
            .filter(|order| matches_page_query(order, query))
            .cloned()
            .collect();
        newest_first(&mut matched);

        let total = u64::try_from(matched.len()).map_err(OrderRepositoryError::persistence)?;
        let skip = usize::try_from(query.offset()).map_err(OrderRepositoryError::persistence)?;
        let take = usize::try_from(query.page_size()).map_err(OrderRepositoryError::persistence)?;
        let records = matched.into_iter().skip(skip).take(take).collect();
        Ok(Page { total, records })
    }

    async fn count_by_status(&self, status: OrderStatus) -> OrderRepositoryResult<u64> {
        let state = self.read()?;
        let count = state
            .orders
            .values()
            .filter(|order| order.status() == status)
            .count();
        u64::try_from(count).map_err(OrderRepositoryError::persistence)
    }

    async fn find_by_status_and_order_time_before(
        &self,
        status: OrderStatus,
        before: DateTime<Utc>,
    ) -> OrderRepositoryResult<Vec<Order>> {
        let state = self.read()?;
        let mut matched: Vec<Order> = state
            .orders
            .values()
            .filter(|order| order.status() == status && order.order_time() < before)
            .cloned()
            .collect();
        matched.sort_by_key(Order::order_time);
        Ok(matched)
    }

    async fn sum_amount(&self, filter: &OrderMetricsFilter) -> OrderRepositoryResult<i64> {
        let state = self.read()?;
        matching(&state, filter).try_fold(0_i64, |total, order| {
            total.checked_add(order.amount()).ok_or_else(|| {
                OrderRepositoryError::persistence(std::io::Error::other("order amount overflow"))
            })
        })
    }

    async fn count(&self, filter: &OrderMetricsFilter) -> OrderRepositoryResult<u64> {
        let state = self.read()?;
        u64::try_from(matching(&state, filter).count()).map_err(OrderRepositoryError::persistence)
    }

    async fn sales_top10(
        &self,
        filter: &OrderMetricsFilter,
    ) -> OrderRepositoryResult<Vec<GoodsSales>> {
        let state = self.read()?;
        let mut totals: HashMap<&str, u64> = HashMap::new();
        for line in matching(&state, filter).flat_map(Order::lines) {
            *totals.entry(line.name()).or_default() += u64::from(line.quantity());
        }

        let mut ranked: Vec<GoodsSales> = totals
            .into_iter()
            .map(|(name, quantity)| GoodsSales {
                name: name.to_owned(),
                quantity,
            })
            .collect();
        ranked.sort_by(|a, b| b.quantity.cmp(&a.quantity).then_with(|| a.name.cmp(&b.name)));
        ranked.truncate(10);
        Ok(ranked)
    }
}
