//! Order records and their data-access surface.
//!
//! Orders are the first entities stamped by audit auto-fill: the insert and
//! update operations of [`ports::OrderRepository`] are marked, and
//! [`adapters::audited::AuditedOrderRepository`] applies the interceptor
//! before delegating to a storage adapter. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
