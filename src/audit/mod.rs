//! Automatic audit-field stamping for persisted entities.
//!
//! Data-access operations are registered with an [`domain::OperationType`]
//! marker. Before a marked operation runs, the [`services::AutoFill`]
//! interceptor stamps creation and update timestamps and actor identifiers
//! onto the entity passed as the first argument. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - The interceptor and marker registry in [`services`]

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
