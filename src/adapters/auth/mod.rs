//! Request-context adapters.

mod request_context;

pub use request_context::RequestScope;
