//! Error types for order domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or parsing order values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderDomainError {
    /// The order number is empty, too long or contains whitespace.
    #[error("invalid order number '{0}'")]
    InvalidOrderNumber(String),

    /// An order line has an empty name.
    #[error("order line name must not be empty")]
    EmptyLineName,

    /// An order line quantity is zero.
    #[error("order line quantity must be positive")]
    ZeroQuantity,

    /// A monetary amount is negative.
    #[error("amount must not be negative, got {0}")]
    NegativeAmount(i64),

    /// The line amounts of an order exceed the representable total.
    #[error("order total overflows")]
    AmountOverflow,

    /// An order has no lines.
    #[error("order must contain at least one line")]
    NoLines,

    /// A delivery contact field is empty after trimming.
    #[error("delivery contact field '{0}' must not be empty")]
    EmptyContactField(&'static str),

    /// Pagination parameters are out of range.
    #[error("invalid page {page} with size {page_size}, both must be positive")]
    InvalidPage {
        /// Requested 1-based page.
        page: u32,
        /// Requested page size.
        page_size: u32,
    },

    /// A persisted order status code is unknown.
    #[error("unknown order status code: {0}")]
    UnknownOrderStatus(i16),

    /// A persisted payment status code is unknown.
    #[error("unknown pay status code: {0}")]
    UnknownPayStatus(i16),

    /// A persisted payment method code is unknown.
    #[error("unknown pay method code: {0}")]
    UnknownPayMethod(i16),
}
