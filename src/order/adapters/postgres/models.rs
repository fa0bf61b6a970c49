//! Diesel row models for order persistence.

use super::schema::{order_details, orders};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for order records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    /// Internal order identifier.
    pub id: uuid::Uuid,
    /// Order number.
    pub number: String,
    /// Lifecycle status code.
    pub status: i16,
    /// Customer identifier.
    pub customer_id: i64,
    /// Placement time.
    pub order_time: DateTime<Utc>,
    /// Payment time.
    pub checkout_time: Option<DateTime<Utc>>,
    /// Payment method code.
    pub pay_method: Option<i16>,
    /// Payment status code.
    pub pay_status: i16,
    /// Order total.
    pub amount: i64,
    /// Customer remark.
    pub remark: Option<String>,
    /// Delivery consignee.
    pub consignee: String,
    /// Delivery phone number.
    pub phone: String,
    /// Delivery address.
    pub address: String,
    /// Cancellation reason.
    pub cancel_reason: Option<String>,
    /// Merchant rejection reason.
    pub rejection_reason: Option<String>,
    /// Cancellation time.
    pub cancel_time: Option<DateTime<Utc>>,
    /// Estimated delivery time.
    pub estimated_delivery_time: Option<DateTime<Utc>>,
    /// Actual delivery time.
    pub delivery_time: Option<DateTime<Utc>>,
    /// Audit creation time.
    pub create_time: Option<DateTime<Utc>>,
    /// Audit modification time.
    pub update_time: Option<DateTime<Utc>>,
    /// Audit creating actor.
    pub create_user: Option<i64>,
    /// Audit modifying actor.
    pub update_user: Option<i64>,
}

/// Insert model for order records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    /// Internal order identifier.
    pub id: uuid::Uuid,
    /// Order number.
    pub number: String,
    /// Lifecycle status code.
    pub status: i16,
    /// Customer identifier.
    pub customer_id: i64,
    /// Placement time.
    pub order_time: DateTime<Utc>,
    /// Payment time.
    pub checkout_time: Option<DateTime<Utc>>,
    /// Payment method code.
    pub pay_method: Option<i16>,
    /// Payment status code.
    pub pay_status: i16,
    /// Order total.
    pub amount: i64,
    /// Customer remark.
    pub remark: Option<String>,
    /// Delivery consignee.
    pub consignee: String,
    /// Delivery phone number.
    pub phone: String,
    /// Delivery address.
    pub address: String,
    /// Cancellation reason.
    pub cancel_reason: Option<String>,
    /// Merchant rejection reason.
    pub rejection_reason: Option<String>,
    /// Cancellation time.
    pub cancel_time: Option<DateTime<Utc>>,
    /// Estimated delivery time.
    pub estimated_delivery_time: Option<DateTime<Utc>>,
    /// Actual delivery time.
    pub delivery_time: Option<DateTime<Utc>>,
    /// Audit creation time.
    pub create_time: Option<DateTime<Utc>>,
    /// Audit modification time.
    pub update_time: Option<DateTime<Utc>>,
    /// Audit creating actor.
    pub create_user: Option<i64>,
    /// Audit modifying actor.
    pub update_user: Option<i64>,
}

/// Columns rewritten on every order update.
///
/// `None` clears the column rather than leaving it untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = orders)]
#[diesel(treat_none_as_null = true)]
pub struct OrderChangeset {
    /// Lifecycle status code.
    pub status: i16,
    /// Payment time.
    pub checkout_time: Option<DateTime<Utc>>,
    /// Payment method code.
    pub pay_method: Option<i16>,
    /// Payment status code.
    pub pay_status: i16,
    /// Order total.
    pub amount: i64,
    /// Customer remark.
    pub remark: Option<String>,
    /// Delivery consignee.
    pub consignee: String,
    /// Delivery phone number.
    pub phone: String,
    /// Delivery address.
    pub address: String,
    /// Cancellation reason.
    pub cancel_reason: Option<String>,
    /// Merchant rejection reason.
    pub rejection_reason: Option<String>,
    /// Cancellation time.
    pub cancel_time: Option<DateTime<Utc>>,
    /// Estimated delivery time.
    pub estimated_delivery_time: Option<DateTime<Utc>>,
    /// Actual delivery time.
    pub delivery_time: Option<DateTime<Utc>>,
    /// Audit creation time.
    pub create_time: Option<DateTime<Utc>>,
    /// Audit modification time.
    pub update_time: Option<DateTime<Utc>>,
    /// Audit creating actor.
    pub create_user: Option<i64>,
    /// Audit modifying actor.
    pub update_user: Option<i64>,
}

/// Query result row for order lines.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = order_details)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderDetailRow {
    /// Surrogate line identifier.
    pub id: i64,
    /// Owning order.
    pub order_id: uuid::Uuid,
    /// Item name.
    pub name: String,
    /// Purchased quantity.
    pub quantity: i32,
    /// Line total.
    pub amount: i64,
}

/// Insert model for order lines; the identifier is assigned by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = order_details)]
pub struct NewOrderDetailRow {
    /// Owning order.
    pub order_id: uuid::Uuid,
    /// Item name.
    pub name: String,
    /// Purchased quantity.
    pub quantity: i32,
    /// Line total.
    pub amount: i64,
}

/// Aggregated quantity sold per item name.
#[derive(Debug, Clone, QueryableByName)]
pub struct GoodsSalesRow {
    /// Item name.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub name: String,
    /// Total quantity sold.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub quantity: i64,
}
