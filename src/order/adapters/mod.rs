//! Adapter implementations for the order repository port.

pub mod audited;
pub mod memory;
pub mod postgres;
