//! SupportNotifier port - filing refund tickets with the support queue.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::RefundId;
use crate::domain::refund::RefundableProduct;

/// Errors from support notification.
///
/// Ordinary ticketing failures (unreachable endpoint, unexpected status,
/// missing configuration) are handled inside implementations and never
/// surface here; the only error a caller sees is the unsupported-context
/// fail-fast below.
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    /// Refund tickets cannot be filed for requests originating on themed
    /// (white-labeled) sites. Callers downgrade this to a warning.
    #[error("unable to send refund processing notifications for themed site requests")]
    ThemedSiteUnsupported,
}

/// Port for notifying the support queue that refunds need manual approval.
#[async_trait]
pub trait SupportNotifier: Send + Sync {
    /// File a support ticket summarizing the refunds awaiting approval.
    ///
    /// Best-effort: implementations swallow and log remote failures, so an
    /// `Ok` return means "attempted", not "delivered".
    async fn notify_support(
        &self,
        product: &RefundableProduct,
        refund_ids: &[RefundId],
    ) -> Result<(), NotificationError>;
}
