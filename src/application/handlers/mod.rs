//! Event handlers grouped by workflow.

pub mod refund;

pub use refund::{EntitlementRefundHandler, RefundOrchestrator, UnenrollmentRefundHandler};
