//! Order aggregate, its lines and delivery contact.

use super::{CustomerId, OrderDomainError, OrderId, OrderNumber, OrderStatus, PayMethod, PayStatus};
use crate::audit::domain::{ActorId, AuditFieldResult};
use crate::audit::ports::Auditable;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// One purchased item within an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    name: String,
    quantity: u32,
    amount: i64,
}

impl OrderLine {
    /// Creates a validated order line.
    ///
    /// `amount` is the line total in minor currency units.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError`] when the name is blank, the quantity is
    /// zero or the amount is negative.
    pub fn new(name: impl Into<String>, quantity: u32, amount: i64) -> Result<Self, OrderDomainError> {
        let raw: String = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(OrderDomainError::EmptyLineName);
        }
        if quantity == 0 {
            return Err(OrderDomainError::ZeroQuantity);
        }
        if amount < 0 {
            return Err(OrderDomainError::NegativeAmount(amount));
        }
        Ok(Self {
            name: trimmed.to_owned(),
            quantity,
            amount,
        })
    }

    /// Returns the item name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the purchased quantity.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the line total in minor currency units.
    #[must_use]
    pub const fn amount(&self) -> i64 {
        self.amount
    }
}

/// Where and to whom an order is delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryContact {
    consignee: String,
    phone: String,
    address: String,
}

impl DeliveryContact {
    /// Creates a delivery contact with every field trimmed and non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::EmptyContactField`] naming the first
    /// blank field.
    pub fn new(
        consignee: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Result<Self, OrderDomainError> {
        Ok(Self {
            consignee: required("consignee", consignee.into())?,
            phone: required("phone", phone.into())?,
            address: required("address", address.into())?,
        })
    }

    /// Returns the consignee name.
    #[must_use]
    pub fn consignee(&self) -> &str {
        &self.consignee
    }

    /// Returns the contact phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Returns the delivery address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }
}

fn required(field: &'static str, value: String) -> Result<String, OrderDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(OrderDomainError::EmptyContactField(field));
    }
    Ok(trimmed.to_owned())
}

/// Parameter object for placing a new order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    /// Order number assigned at placement.
    pub number: OrderNumber,
    /// Customer placing the order.
    pub customer_id: CustomerId,
    /// Delivery contact.
    pub contact: DeliveryContact,
    /// Purchased lines; must not be empty.
    pub lines: Vec<OrderLine>,
    /// Optional free-text remark.
    pub remark: Option<String>,
}

/// Order aggregate root.
///
/// Audit fields start empty and are written only through [`Auditable`], so
/// a freshly placed order carries no creation or modification stamp until
/// it passes through an audited repository operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    number: OrderNumber,
    status: OrderStatus,
    customer_id: CustomerId,
    order_time: DateTime<Utc>,
    checkout_time: Option<DateTime<Utc>>,
    pay_method: Option<PayMethod>,
    pay_status: PayStatus,
    amount: i64,
    remark: Option<String>,
    contact: DeliveryContact,
    cancel_reason: Option<String>,
    rejection_reason: Option<String>,
    cancel_time: Option<DateTime<Utc>>,
    estimated_delivery_time: Option<DateTime<Utc>>,
    delivery_time: Option<DateTime<Utc>>,
    lines: Vec<OrderLine>,
    create_time: Option<DateTime<Utc>>,
    update_time: Option<DateTime<Utc>>,
    create_user: Option<ActorId>,
    update_user: Option<ActorId>,
}

/// Parameter object for reconstructing a persisted order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedOrderData {
    /// Persisted identifier.
    pub id: OrderId,
    /// Persisted order number.
    pub number: OrderNumber,
    /// Persisted lifecycle status.
    pub status: OrderStatus,
    /// Persisted customer.
    pub customer_id: CustomerId,
    /// Persisted placement time.
    pub order_time: DateTime<Utc>,
    /// Persisted payment time.
    pub checkout_time: Option<DateTime<Utc>>,
    /// Persisted payment method.
    pub pay_method: Option<PayMethod>,
    /// Persisted payment status.
    pub pay_status: PayStatus,
    /// Persisted total in minor currency units.
    pub amount: i64,
    /// Persisted remark.
    pub remark: Option<String>,
    /// Persisted delivery contact.
    pub contact: DeliveryContact,
    /// Persisted cancellation reason.
    pub cancel_reason: Option<String>,
    /// Persisted merchant rejection reason.
    pub rejection_reason: Option<String>,
    /// Persisted cancellation time.
    pub cancel_time: Option<DateTime<Utc>>,
    /// Persisted estimated delivery time.
    pub estimated_delivery_time: Option<DateTime<Utc>>,
    /// Persisted delivery time.
    pub delivery_time: Option<DateTime<Utc>>,
    /// Persisted lines.
    pub lines: Vec<OrderLine>,
    /// Persisted creation stamp.
    pub create_time: Option<DateTime<Utc>>,
    /// Persisted modification stamp.
    pub update_time: Option<DateTime<Utc>>,
    /// Persisted creating actor.
    pub create_user: Option<ActorId>,
    /// Persisted modifying actor.
    pub update_user: Option<ActorId>,
}

impl Order {
    /// Places a new order awaiting payment.
    ///
    /// The total is the sum of line amounts.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::NoLines`] when `data.lines` is empty and
    /// [`OrderDomainError::AmountOverflow`] when the line amounts do not fit
    /// in the total.
    pub fn place(data: NewOrder, clock: &impl Clock) -> Result<Self, OrderDomainError> {
        if data.lines.is_empty() {
            return Err(OrderDomainError::NoLines);
        }
        let amount = data
            .lines
            .iter()
            .try_fold(0_i64, |total, line| total.checked_add(line.amount()))
            .ok_or(OrderDomainError::AmountOverflow)?;

        Ok(Self {
            id: OrderId::new(),
            number: data.number,
            status: OrderStatus::PendingPayment,
            customer_id: data.customer_id,
            order_time: clock.utc(),
            checkout_time: None,
            pay_method: None,
            pay_status: PayStatus::Unpaid,
            amount,
            remark: data.remark,
            contact: data.contact,
            cancel_reason: None,
            rejection_reason: None,
            cancel_time: None,
            estimated_delivery_time: None,
            delivery_time: None,
            lines: data.lines,
            create_time: None,
            update_time: None,
            create_user: None,
            update_user: None,
        })
    }

    /// Reconstructs an order from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedOrderData) -> Self {
        Self {
            id: data.id,
            number: data.number,
            status: data.status,
            customer_id: data.customer_id,
            order_time: data.order_time,
            checkout_time: data.checkout_time,
            pay_method: data.pay_method,
            pay_status: data.pay_status,
            amount: data.amount,
            remark: data.remark,
            contact: data.contact,
            cancel_reason: data.cancel_reason,
            rejection_reason: data.rejection_reason,
            cancel_time: data.cancel_time,
            estimated_delivery_time: data.estimated_delivery_time,
            delivery_time: data.delivery_time,
            lines: data.lines,
            create_time: data.create_time,
            update_time: data.update_time,
            create_user: data.create_user,
            update_user: data.update_user,
        }
    }

    /// Returns the order identifier.
    #[must_use]
    pub const fn id(&self) -> OrderId {
        self.id
    }

    /// Returns the order number.
    #[must_use]
    pub const fn number(&self) -> &OrderNumber {
        &self.number
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns the customer who placed the order.
    #[must_use]
    pub const fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    /// Returns the placement time.
    #[must_use]
    pub const fn order_time(&self) -> DateTime<Utc> {
        self.order_time
    }

    /// Returns the payment time, if paid.
    #[must_use]
    pub const fn checkout_time(&self) -> Option<DateTime<Utc>> {
        self.checkout_time
    }

    /// Returns the payment method, if paid.
    #[must_use]
    pub const fn pay_method(&self) -> Option<PayMethod> {
        self.pay_method
    }

    /// Returns the payment status.
    #[must_use]
    pub const fn pay_status(&self) -> PayStatus {
        self.pay_status
    }

    /// Returns the order total in minor currency units.
    #[must_use]
    pub const fn amount(&self) -> i64 {
        self.amount
    }

    /// Returns the customer remark.
    #[must_use]
    pub fn remark(&self) -> Option<&str> {
        self.remark.as_deref()
    }

    /// Returns the delivery contact.
    #[must_use]
    pub const fn contact(&self) -> &DeliveryContact {
        &self.contact
    }

    /// Returns the cancellation reason.
    #[must_use]
    pub fn cancel_reason(&self) -> Option<&str> {
        self.cancel_reason.as_deref()
    }

    /// Returns the merchant rejection reason.
    #[must_use]
    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection_reason.as_deref()
    }

    /// Returns the cancellation time.
    #[must_use]
    pub const fn cancel_time(&self) -> Option<DateTime<Utc>> {
        self.cancel_time
    }

    /// Returns the estimated delivery time.
    #[must_use]
    pub const fn estimated_delivery_time(&self) -> Option<DateTime<Utc>> {
        self.estimated_delivery_time
    }

    /// Returns the actual delivery time.
    #[must_use]
    pub const fn delivery_time(&self) -> Option<DateTime<Utc>> {
        self.delivery_time
    }

    /// Returns the purchased lines.
    #[must_use]
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Returns the creation stamp.
    #[must_use]
    pub const fn create_time(&self) -> Option<DateTime<Utc>> {
        self.create_time
    }

    /// Returns the last modification stamp.
    #[must_use]
    pub const fn update_time(&self) -> Option<DateTime<Utc>> {
        self.update_time
    }

    /// Returns the creating actor.
    #[must_use]
    pub const fn create_user(&self) -> Option<ActorId> {
        self.create_user
    }

    /// Returns the last modifying actor.
    #[must_use]
    pub const fn update_user(&self) -> Option<ActorId> {
        self.update_user
    }

    /// Sets the lifecycle status.
    pub const fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }

    /// Records a completed payment.
    pub const fn record_payment(&mut self, method: PayMethod, at: DateTime<Utc>) {
        self.pay_method = Some(method);
        self.pay_status = PayStatus::Paid;
        self.checkout_time = Some(at);
    }

    /// Sets the payment status.
    pub const fn set_pay_status(&mut self, pay_status: PayStatus) {
        self.pay_status = pay_status;
    }

    /// Records a cancellation with its reason.
    pub fn record_cancellation(&mut self, reason: impl Into<String>, at: DateTime<Utc>) {
        self.cancel_reason = Some(reason.into());
        self.cancel_time = Some(at);
    }

    /// Records a merchant rejection reason.
    pub fn record_rejection(&mut self, reason: impl Into<String>) {
        self.rejection_reason = Some(reason.into());
    }

    /// Sets the estimated delivery time.
    pub const fn set_estimated_delivery_time(&mut self, at: Option<DateTime<Utc>>) {
        self.estimated_delivery_time = at;
    }

    /// Records the actual delivery time.
    pub const fn record_delivery(&mut self, at: DateTime<Utc>) {
        self.delivery_time = Some(at);
    }
}

impl Auditable for Order {
    fn set_create_time(&mut self, at: DateTime<Utc>) -> AuditFieldResult {
        self.create_time = Some(at);
        Ok(())
    }

    fn set_update_time(&mut self, at: DateTime<Utc>) -> AuditFieldResult {
        self.update_time = Some(at);
        Ok(())
    }

    fn set_create_user(&mut self, actor: Option<ActorId>) -> AuditFieldResult {
        self.create_user = actor;
        Ok(())
    }

    fn set_update_user(&mut self, actor: Option<ActorId>) -> AuditFieldResult {
        self.update_user = actor;
        Ok(())
    }
}
