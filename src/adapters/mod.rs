//! Adapters - concrete implementations of the ports.
//!
//! Each submodule binds one external concern: the commerce service's REST
//! API, the Zendesk support desk, the in-process event bus, and the
//! request-scoped context handlers read acting users from.

pub mod auth;
pub mod commerce;
pub mod events;
pub mod support;
