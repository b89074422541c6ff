//! UnenrollmentRefundHandler - initiates refunds when learners unenroll.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::config::CommerceConfig;
use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::domain::refund::{RefundPolicy, UnenrollmentCompleted};
use crate::ports::{ActingUser, ActingUserResolver, EventHandler};

use super::RefundOrchestrator;

/// Subscriber for `enrollment.unenrolled` events.
///
/// This is an outermost catch boundary: every failure past the envelope is
/// logged and swallowed, because other independent subscribers to the same
/// event must still run.
pub struct UnenrollmentRefundHandler {
    config: CommerceConfig,
    resolver: Arc<dyn ActingUserResolver>,
    orchestrator: Arc<RefundOrchestrator>,
}

impl UnenrollmentRefundHandler {
    pub fn new(
        config: CommerceConfig,
        resolver: Arc<dyn ActingUserResolver>,
        orchestrator: Arc<RefundOrchestrator>,
    ) -> Self {
        Self {
            config,
            resolver,
            orchestrator,
        }
    }
}

#[async_trait]
impl EventHandler for UnenrollmentRefundHandler {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        if !self.config.is_configured() {
            debug!("Commerce integration is not configured; ignoring unenrollment");
            return Ok(());
        }

        let payload: UnenrollmentCompleted = match event.payload_as() {
            Ok(payload) => payload,
            Err(err) => {
                error!(
                    event_id = %event.event_id,
                    error = %err,
                    "Discarding unenrollment event with malformed payload"
                );
                return Ok(());
            }
        };

        if !payload.refundable {
            return Ok(());
        }

        let product = payload.product();

        // No inbound request context means the learner unenrolled themselves
        // through some non-interactive path; credit the owner.
        let acting_user = self
            .resolver
            .resolve_acting_user()
            .await
            .unwrap_or_else(|| ActingUser::Authenticated(product.owner().clone()));

        if acting_user.is_anonymous() {
            // An anonymous context signals a server-to-server unenrollment
            // from the commerce service itself. There is no authenticated
            // client to call it back with, and it already knows about this
            // refund.
            return Ok(());
        }

        let policy = RefundPolicy::new(self.config.enable_automatic_refund_approval);

        if let Err(err) = self.orchestrator.refund(&product, &policy).await {
            error!(
                user_id = %product.owner().id,
                course_id = %product.identifier(),
                error = %err,
                "Unexpected error while attempting to initiate refund"
            );
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "UnenrollmentRefundHandler"
    }
}
