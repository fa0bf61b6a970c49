//! `PostgreSQL` repository implementation for order storage.

use super::{
    models::{GoodsSalesRow, NewOrderDetailRow, NewOrderRow, OrderChangeset, OrderDetailRow, OrderRow},
    schema::{order_details, orders},
};
use crate::audit::domain::ActorId;
use crate::order::{
    domain::{
        CustomerId, DeliveryContact, GoodsSales, Order, OrderId, OrderLine, OrderMetricsFilter,
        OrderNumber, OrderPageQuery, OrderStatus, Page, PayMethod, PayStatus, PersistedOrderData,
    },
    ports::{OrderRepository, OrderRepositoryError, OrderRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::{count_star, sql};
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::{BigInt, Nullable, SmallInt, Timestamptz};
use std::collections::HashMap;

/// `PostgreSQL` connection pool type used by order adapters.
pub type OrderPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed order repository.
#[derive(Debug, Clone)]
pub struct PostgresOrderRepository {
    pool: OrderPgPool,
}

impl PostgresOrderRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: OrderPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> OrderRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> OrderRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(OrderRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(OrderRepositoryError::persistence)?
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn insert(&self, order: &mut Order) -> OrderRepositoryResult<()> {
        let order_id = order.id();
        let number = order.number().clone();
        let new_row = to_new_row(order);
        let detail_rows = to_detail_rows(order)?;

        self.run_blocking(move |connection| {
            // Friendlier error for the common case; the unique constraint
            // still decides under concurrent inserts.
            let taken = orders::table
                .filter(orders::number.eq(number.as_str()))
                .select(orders::id)
                .first::<uuid::Uuid>(connection)
                .optional()
                .map_err(OrderRepositoryError::persistence)?;
            if taken.is_some() {
                return Err(OrderRepositoryError::DuplicateNumber(number));
            }

            connection
                .transaction::<_, DieselError, _>(|tx| {
                    diesel::insert_into(orders::table)
                        .values(&new_row)
                        .execute(tx)?;
                    diesel::insert_into(order_details::table)
                        .values(&detail_rows)
                        .execute(tx)?;
                    Ok(())
                })
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_number_unique_violation(info.as_ref()) =>
                    {
                        OrderRepositoryError::DuplicateNumber(number.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        OrderRepositoryError::DuplicateOrder(order_id)
                    }
                    _ => OrderRepositoryError::persistence(err),
                })
        })
        .await
    }

    async fn update(&self, order: &mut Order) -> OrderRepositoryResult<()> {
        let order_id = order.id();
        let changes = to_changeset(order);

        self.run_blocking(move |connection| {
            let affected = diesel::update(orders::table.find(order_id.into_inner()))
                .set(&changes)
                .execute(connection)
                .map_err(OrderRepositoryError::persistence)?;
            if affected == 0 {
                return Err(OrderRepositoryError::NotFound(order_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: OrderId) -> OrderRepositoryResult<Option<Order>> {
        self.run_blocking(move |connection| {
            let row = orders::table
                .find(id.into_inner())
                .select(OrderRow::as_select())
                .first::<OrderRow>(connection)
                .optional()
                .map_err(OrderRepositoryError::persistence)?;
            Ok(attach_lines(connection, row.into_iter().collect())?.pop())
        })
        .await
    }

    async fn find_by_number(&self, number: &OrderNumber) -> OrderRepositoryResult<Option<Order>> {
        let lookup = number.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = orders::table
                .filter(orders::number.eq(lookup))
                .select(OrderRow::as_select())
                .first::<OrderRow>(connection)
                .optional()
                .map_err(OrderRepositoryError::persistence)?;
            Ok(attach_lines(connection, row.into_iter().collect())?.pop())
        })
        .await
    }

    async fn page_query(&self, query: &OrderPageQuery) -> OrderRepositoryResult<Page<Order>> {
        let page = query.clone();
        self.run_blocking(move |connection| {
            let total = filter_page(orders::table.select(count_star()).into_boxed(), &page)
                .get_result::<i64>(connection)
                .map_err(OrderRepositoryError::persistence)?;
            let limit = i64::from(page.page_size());
            let offset = i64::try_from(page.offset()).map_err(OrderRepositoryError::persistence)?;
            let rows = filter_page(orders::table.select(OrderRow::as_select()).into_boxed(), &page)
                .order(orders::order_time.desc())
                .limit(limit)
                .offset(offset)
                .load::<OrderRow>(connection)
                .map_err(OrderRepositoryError::persistence)?;

            Ok(Page {
                total: to_count(total)?,
                records: attach_lines(connection, rows)?,
            })
        })
        .await
    }

    async fn count_by_status(&self, status: OrderStatus) -> OrderRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let count = orders::table
                .filter(orders::status.eq(status.code()))
                .count()
                .get_result::<i64>(connection)
                .map_err(OrderRepositoryError::persistence)?;
            to_count(count)
        })
        .await
    }

    async fn find_by_status_and_order_time_before(
        &self,
        status: OrderStatus,
        before: DateTime<Utc>,
    ) -> OrderRepositoryResult<Vec<Order>> {
        self.run_blocking(move |connection| {
            let rows = orders::table
                .filter(orders::status.eq(status.code()))
                .filter(orders::order_time.lt(before))
                .order(orders::order_time.asc())
                .select(OrderRow::as_select())
                .load::<OrderRow>(connection)
                .map_err(OrderRepositoryError::persistence)?;
            attach_lines(connection, rows)
        })
        .await
    }

    async fn sum_amount(&self, filter: &OrderMetricsFilter) -> OrderRepositoryResult<i64> {
        let metrics = *filter;
        self.run_blocking(move |connection| {
            let selection = sql::<BigInt>("COALESCE(SUM(amount), 0)::BIGINT");
            filter_metrics(orders::table.select(selection).into_boxed(), &metrics)
                .get_result::<i64>(connection)
                .map_err(OrderRepositoryError::persistence)
        })
        .await
    }

    async fn count(&self, filter: &OrderMetricsFilter) -> OrderRepositoryResult<u64> {
        let metrics = *filter;
        self.run_blocking(move |connection| {
            let count = filter_metrics(orders::table.select(count_star()).into_boxed(), &metrics)
                .get_result::<i64>(connection)
                .map_err(OrderRepositoryError::persistence)?;
            to_count(count)
        })
        .await
    }

    async fn sales_top10(
        &self,
        filter: &OrderMetricsFilter,
    ) -> OrderRepositoryResult<Vec<GoodsSales>> {
        let metrics = *filter;
        self.run_blocking(move |connection| {
            let rows = diesel::sql_query(concat!(
                "SELECT d.name AS name, SUM(d.quantity)::BIGINT AS quantity ",
                "FROM order_details d JOIN orders o ON o.id = d.order_id ",
                "WHERE ($1::SMALLINT IS NULL OR o.status = $1) ",
                "AND ($2::TIMESTAMPTZ IS NULL OR o.order_time >= $2) ",
                "AND ($3::TIMESTAMPTZ IS NULL OR o.order_time < $3) ",
                "GROUP BY d.name ",
                "ORDER BY quantity DESC, name ASC ",
                "LIMIT 10",
            ))
            .bind::<Nullable<SmallInt>, _>(metrics.status().map(OrderStatus::code))
            .bind::<Nullable<Timestamptz>, _>(metrics.begin())
            .bind::<Nullable<Timestamptz>, _>(metrics.end())
            .load::<GoodsSalesRow>(connection)
            .map_err(OrderRepositoryError::persistence)?;

            rows.into_iter()
                .map(|row| {
                    Ok(GoodsSales {
                        name: row.name,
                        quantity: to_count(row.quantity)?,
                    })
                })
                .collect()
        })
        .await
    }
}

fn filter_page<'a, ST>(
    mut query: orders::BoxedQuery<'a, Pg, ST>,
    page: &OrderPageQuery,
) -> orders::BoxedQuery<'a, Pg, ST> {
    if let Some(customer_id) = page.customer_id() {
        query = query.filter(orders::customer_id.eq(customer_id.value()));
    }
    if let Some(status) = page.status() {
        query = query.filter(orders::status.eq(status.code()));
    }
    if let Some(fragment) = page.number() {
        query = query.filter(orders::number.like(contains_pattern(fragment)));
    }
    if let Some(fragment) = page.phone() {
        query = query.filter(orders::phone.like(contains_pattern(fragment)));
    }
    if let Some(begin) = page.begin() {
        query = query.filter(orders::order_time.ge(begin));
    }
    if let Some(end) = page.end() {
        query = query.filter(orders::order_time.lt(end));
    }
    query
}

fn filter_metrics<'a, ST>(
    mut query: orders::BoxedQuery<'a, Pg, ST>,
    filter: &OrderMetricsFilter,
) -> orders::BoxedQuery<'a, Pg, ST> {
    if let Some(status) = filter.status() {
        query = query.filter(orders::status.eq(status.code()));
    }
    if let Some(begin) = filter.begin() {
        query = query.filter(orders::order_time.ge(begin));
    }
    if let Some(end) = filter.end() {
        query = query.filter(orders::order_time.lt(end));
    }
    query
}

/// Builds a `LIKE` pattern matching `fragment` anywhere, with wildcards in
/// the fragment matched literally.
pub(super) fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for ch in fragment.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn to_count(value: i64) -> OrderRepositoryResult<u64> {
    u64::try_from(value).map_err(OrderRepositoryError::persistence)
}

fn attach_lines(
    connection: &mut PgConnection,
    rows: Vec<OrderRow>,
) -> OrderRepositoryResult<Vec<Order>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<uuid::Uuid> = rows.iter().map(|row| row.id).collect();
    let details = order_details::table
        .filter(order_details::order_id.eq_any(ids))
        .order(order_details::id.asc())
        .select(OrderDetailRow::as_select())
        .load::<OrderDetailRow>(connection)
        .map_err(OrderRepositoryError::persistence)?;

    let mut by_order: HashMap<uuid::Uuid, Vec<OrderDetailRow>> = HashMap::new();
    for detail in details {
        by_order.entry(detail.order_id).or_default().push(detail);
    }

    rows.into_iter()
        .map(|row| {
            let lines = by_order.remove(&row.id).unwrap_or_default();
            row_to_order(row, lines)
        })
        .collect()
}

pub(super) fn to_new_row(order: &Order) -> NewOrderRow {
    let contact = order.contact();
    NewOrderRow {
        id: order.id().into_inner(),
        number: order.number().as_str().to_owned(),
        status: order.status().code(),
        customer_id: order.customer_id().value(),
        order_time: order.order_time(),
        checkout_time: order.checkout_time(),
        pay_method: order.pay_method().map(PayMethod::code),
        pay_status: order.pay_status().code(),
        amount: order.amount(),
        remark: order.remark().map(str::to_owned),
        consignee: contact.consignee().to_owned(),
        phone: contact.phone().to_owned(),
        address: contact.address().to_owned(),
        cancel_reason: order.cancel_reason().map(str::to_owned),
        rejection_reason: order.rejection_reason().map(str::to_owned),
        cancel_time: order.cancel_time(),
        estimated_delivery_time: order.estimated_delivery_time(),
        delivery_time: order.delivery_time(),
        create_time: order.create_time(),
        update_time: order.update_time(),
        create_user: order.create_user().map(ActorId::value),
        update_user: order.update_user().map(ActorId::value),
    }
}

pub(super) fn to_changeset(order: &Order) -> OrderChangeset {
    let row = to_new_row(order);
    OrderChangeset {
        status: row.status,
        checkout_time: row.checkout_time,
        pay_method: row.pay_method,
        pay_status: row.pay_status,
        amount: row.amount,
        remark: row.remark,
        consignee: row.consignee,
        phone: row.phone,
        address: row.address,
        cancel_reason: row.cancel_reason,
        rejection_reason: row.rejection_reason,
        cancel_time: row.cancel_time,
        estimated_delivery_time: row.estimated_delivery_time,
        delivery_time: row.delivery_time,
        create_time: row.create_time,
        update_time: row.update_time,
        create_user: row.create_user,
        update_user: row.update_user,
    }
}

pub(super) fn to_detail_rows(order: &Order) -> OrderRepositoryResult<Vec<NewOrderDetailRow>> {
    let order_id = order.id().into_inner();
    order
        .lines()
        .iter()
        .map(|line| {
            Ok(NewOrderDetailRow {
                order_id,
                name: line.name().to_owned(),
                quantity: i32::try_from(line.quantity())
                    .map_err(OrderRepositoryError::persistence)?,
                amount: line.amount(),
            })
        })
        .collect()
}

pub(super) fn row_to_order(
    row: OrderRow,
    details: Vec<OrderDetailRow>,
) -> OrderRepositoryResult<Order> {
    let lines = details
        .into_iter()
        .map(|detail| {
            let quantity =
                u32::try_from(detail.quantity).map_err(OrderRepositoryError::persistence)?;
            OrderLine::new(detail.name, quantity, detail.amount)
                .map_err(OrderRepositoryError::persistence)
        })
        .collect::<OrderRepositoryResult<Vec<_>>>()?;

    let data = PersistedOrderData {
        id: OrderId::from_uuid(row.id),
        number: OrderNumber::new(row.number).map_err(OrderRepositoryError::persistence)?,
        status: OrderStatus::try_from(row.status).map_err(OrderRepositoryError::persistence)?,
        customer_id: CustomerId::new(row.customer_id),
        order_time: row.order_time,
        checkout_time: row.checkout_time,
        pay_method: row
            .pay_method
            .map(PayMethod::try_from)
            .transpose()
            .map_err(OrderRepositoryError::persistence)?,
        pay_status: PayStatus::try_from(row.pay_status)
            .map_err(OrderRepositoryError::persistence)?,
        amount: row.amount,
        remark: row.remark,
        contact: DeliveryContact::new(row.consignee, row.phone, row.address)
            .map_err(OrderRepositoryError::persistence)?,
        cancel_reason: row.cancel_reason,
        rejection_reason: row.rejection_reason,
        cancel_time: row.cancel_time,
        estimated_delivery_time: row.estimated_delivery_time,
        delivery_time: row.delivery_time,
        lines,
        create_time: row.create_time,
        update_time: row.update_time,
        create_user: row.create_user.map(ActorId::new),
        update_user: row.update_user.map(ActorId::new),
    };
    Ok(Order::from_persisted(data))
}

fn is_number_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "orders_number_key")
}
