//! Port contracts for audit-field auto-fill.
//!
//! Entities opt into auto-fill by implementing [`Auditable`].

pub mod auditable;

pub use auditable::Auditable;

#[cfg(test)]
pub use auditable::MockAuditable;
