//! Refund workflow: orchestrator plus the two inbound event handlers.

mod entitlement;
mod orchestrator;
mod unenrollment;

pub use entitlement::EntitlementRefundHandler;
pub use orchestrator::RefundOrchestrator;
pub use unenrollment::UnenrollmentRefundHandler;
