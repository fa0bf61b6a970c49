//! Ordering: order management with automatic audit-field stamping.
//!
//! Entities persisted through the data-access surface carry four audit
//! fields: creation time, last modification time, creating actor and last
//! modifying actor. Callers never set them by hand; operations marked as
//! inserts or updates are intercepted and the fields are stamped from the
//! shared clock and the actor of the current unit of work.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`audit`]: Operation markers, the auditable capability and the
//!   auto-fill interceptor
//! - [`order`]: Order records, their repository and the audited decorator

pub mod audit;
pub mod order;
