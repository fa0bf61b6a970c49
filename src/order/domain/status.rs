//! Order and payment status codes.

use super::OrderDomainError;
use serde::{Deserialize, Serialize};

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed and awaiting payment.
    PendingPayment,
    /// Paid and awaiting merchant confirmation.
    AwaitingConfirmation,
    /// Accepted by the merchant.
    Confirmed,
    /// Out for delivery.
    Delivering,
    /// Delivered.
    Completed,
    /// Cancelled by the customer, the merchant or a timeout.
    Cancelled,
}

impl OrderStatus {
    /// Returns the persisted status code.
    #[must_use]
    pub const fn code(self) -> i16 {
        match self {
            Self::PendingPayment => 1,
            Self::AwaitingConfirmation => 2,
            Self::Confirmed => 3,
            Self::Delivering => 4,
            Self::Completed => 5,
            Self::Cancelled => 6,
        }
    }
}

impl TryFrom<i16> for OrderStatus {
    type Error = OrderDomainError;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::PendingPayment),
            2 => Ok(Self::AwaitingConfirmation),
            3 => Ok(Self::Confirmed),
            4 => Ok(Self::Delivering),
            5 => Ok(Self::Completed),
            6 => Ok(Self::Cancelled),
            _ => Err(OrderDomainError::UnknownOrderStatus(code)),
        }
    }
}

/// Payment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayStatus {
    /// Not paid yet.
    Unpaid,
    /// Paid in full.
    Paid,
    /// Payment returned to the customer.
    Refunded,
}

impl PayStatus {
    /// Returns the persisted status code.
    #[must_use]
    pub const fn code(self) -> i16 {
        match self {
            Self::Unpaid => 0,
            Self::Paid => 1,
            Self::Refunded => 2,
        }
    }
}

impl TryFrom<i16> for PayStatus {
    type Error = OrderDomainError;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Unpaid),
            1 => Ok(Self::Paid),
            2 => Ok(Self::Refunded),
            _ => Err(OrderDomainError::UnknownPayStatus(code)),
        }
    }
}

/// Channel used to pay an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayMethod {
    /// `WeChat` Pay.
    WeChat,
    /// Alipay.
    Alipay,
}

impl PayMethod {
    /// Returns the persisted method code.
    #[must_use]
    pub const fn code(self) -> i16 {
        match self {
            Self::WeChat => 1,
            Self::Alipay => 2,
        }
    }
}

impl TryFrom<i16> for PayMethod {
    type Error = OrderDomainError;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::WeChat),
            2 => Ok(Self::Alipay),
            _ => Err(OrderDomainError::UnknownPayMethod(code)),
        }
    }
}
