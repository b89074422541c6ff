//! Commerce service adapters.

mod rest_gateway;

pub use rest_gateway::RestRefundGateway;
