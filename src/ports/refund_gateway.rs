//! RefundGateway port - refund calls against the external commerce service.
//!
//! The gateway owns the wire protocol; callers only see typed payloads,
//! refund ids, and the error taxonomy below.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::RefundId;
use crate::domain::refund::RefundRequest;

/// Errors from refund gateway operations.
///
/// Remote failures are split into the classes the orchestrator cares about;
/// none of them is retried by this crate.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The commerce service did not answer in time.
    #[error("commerce service request timed out: {0}")]
    Timeout(String),

    /// The request never completed (connection refused, DNS, TLS, ...).
    #[error("commerce service transport error: {0}")]
    Transport(String),

    /// The commerce service answered with a non-success status.
    #[error("commerce service returned {status}: {message}")]
    Service { status: u16, message: String },

    /// The response body could not be interpreted.
    #[error("unexpected response from commerce service: {0}")]
    InvalidResponse(String),
}

/// Port for the commerce service's refund API.
///
/// Implementations authenticate as the configured service worker; token
/// acquisition is their concern, not the caller's.
#[async_trait]
pub trait RefundGateway: Send + Sync {
    /// Open refunds for a product.
    ///
    /// Returns the ids of any refunds the commerce service created. An empty
    /// list is a valid "nothing to refund" outcome, not an error.
    async fn open_refund(&self, request: &RefundRequest) -> Result<Vec<RefundId>, GatewayError>;

    /// Approve the payment side of a single refund.
    ///
    /// Payment-only because the unenrollment has already happened by the
    /// time this crate runs; approving unenrollment side effects as well
    /// would tie up a commerce-service worker re-unenrolling the learner.
    /// May fail per-id independently of other ids in the same batch.
    async fn approve_refund_payment_only(&self, refund_id: RefundId) -> Result<(), GatewayError>;
}
