//! Domain model for orders.
//!
//! Order state-transition rules are deliberately absent: the aggregate
//! exposes plain mutators and leaves workflow decisions to callers.

mod error;
mod ids;
mod order;
mod query;
mod status;

pub use error::OrderDomainError;
pub use ids::{CustomerId, OrderId, OrderNumber};
pub use order::{DeliveryContact, NewOrder, Order, OrderLine, PersistedOrderData};
pub use query::{GoodsSales, OrderMetricsFilter, OrderPageQuery, Page};
pub use status::{OrderStatus, PayMethod, PayStatus};
