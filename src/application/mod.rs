//! Application layer - use-case orchestration over domain logic and ports.
//!
//! Handlers subscribe to domain events and drive the refund workflow through
//! the ports; no wire protocol or transport detail lives here.

pub mod handlers;
