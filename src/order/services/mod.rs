//! Application services for order placement, updates and reporting.

mod order;

pub use order::{OrderService, OrderServiceError, OrderServiceResult, PlaceOrderRequest};
