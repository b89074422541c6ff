//! Domain layer - core business types, free of transport concerns.

pub mod foundation;
pub mod refund;
