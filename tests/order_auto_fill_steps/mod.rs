//! Step definitions for order auto-fill scenarios.

mod when;
pub mod world;
