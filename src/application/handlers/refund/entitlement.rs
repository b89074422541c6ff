//! EntitlementRefundHandler - initiates refunds for entitlement requests.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::config::CommerceConfig;
use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::domain::refund::{EntitlementRefundRequested, RefundPolicy};
use crate::ports::{ActingUserResolver, EventHandler};

use super::RefundOrchestrator;

/// Subscriber for `entitlement.refund_requested` events.
///
/// Unlike the unenrollment path, entitlement refunds require an explicit
/// acting user who is exactly the entitlement's owner: there is no owner
/// fallback and no refund-by-proxy.
///
/// Same outermost catch boundary as the unenrollment handler: failures are
/// logged and swallowed so sibling subscribers still run.
pub struct EntitlementRefundHandler {
    config: CommerceConfig,
    resolver: Arc<dyn ActingUserResolver>,
    orchestrator: Arc<RefundOrchestrator>,
}

impl EntitlementRefundHandler {
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
impl EventHandler for EntitlementRefundHandler {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        if !self.config.is_configured() {
            debug!("Commerce integration is not configured; ignoring entitlement refund request");
            return Ok(());
        }

        let payload: EntitlementRefundRequested = match event.payload_as() {
            Ok(payload) => payload,
            Err(err) => {
                error!(
                    event_id = %event.event_id,
                    error = %err,
                    "Discarding entitlement refund event with malformed payload"
                );
                return Ok(());
            }
        };

        if !payload.refundable {
            return Ok(());
        }

        let product = payload.product();

        let acting_user = match self.resolver.resolve_acting_user().await {
            Some(acting_user) => acting_user,
            None => return Ok(()),
        };

        let is_owner = acting_user
            .user()
            .map(|user| user.id == product.owner().id)
            .unwrap_or(false);
        if !is_owner {
            return Ok(());
        }

        let policy = RefundPolicy::new(self.config.enable_automatic_refund_approval);

        if let Err(err) = self.orchestrator.refund(&product, &policy).await {
            error!(
                user_id = %product.owner().id,
                entitlement_uuid = %product.identifier(),
                error = %err,
                "Unexpected error while attempting to initiate refund for course entitlement"
            );
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "EntitlementRefundHandler"
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{
        entitlement_refund_event, other_student, resolver_returning, test_student,
        CountingGateway, RecordingNotifier,
    };
    use super::*;
    use crate::domain::foundation::SerializableDomainEvent;
    use crate::ports::ActingUser;

    fn commerce_config(auto_approve: bool) -> CommerceConfig {
        CommerceConfig {
            enabled: true,
            api_url: "https://commerce.example.com/api/v2".to_string(),
            service_worker_username: "commerce_worker".to_string(),
            public_url_root: "https://commerce.example.com".to_string(),
            enable_automatic_refund_approval: auto_approve,
            ..CommerceConfig::default()
        }
    }

    fn handler(
        config: CommerceConfig,
        resolver: Arc<dyn ActingUserResolver>,
        gateway: Arc<CountingGateway>,
        notifier: Arc<RecordingNotifier>,
    ) -> EntitlementRefundHandler {
        let orchestrator = Arc::new(RefundOrchestrator::new(gateway, notifier));
        EntitlementRefundHandler::new(config, resolver, orchestrator)
    }

    #[tokio::test]
    async fn missing_acting_user_makes_no_outbound_call() {
        let gateway = Arc::new(CountingGateway::opening(vec![1]));
        let notifier = Arc::new(RecordingNotifier::new());
        let handler = handler(
            commerce_config(false),
            resolver_returning(None),
            gateway.clone(),
            notifier,
        );

        let event = entitlement_refund_event(true).to_envelope();
        handler.handle(event).await.unwrap();

        // No owner fallback on the entitlement path
        assert_eq!(gateway.open_call_count(), 0);
    }

    #[tokio::test]
    async fn acting_user_other_than_owner_makes_no_outbound_call() {
        let gateway = Arc::new(CountingGateway::opening(vec![1]));
        let notifier = Arc::new(RecordingNotifier::new());
        let handler = handler(
            commerce_config(false),
            resolver_returning(Some(ActingUser::Authenticated(other_student()))),
            gateway.clone(),
            notifier,
        );

        let event = entitlement_refund_event(true).to_envelope();
        handler.handle(event).await.unwrap();

        assert_eq!(gateway.open_call_count(), 0);
    }

    #[tokio::test]
    async fn anonymous_acting_user_makes_no_outbound_call() {
        let gateway = Arc::new(CountingGateway::opening(vec![1]));
        let notifier = Arc::new(RecordingNotifier::new());
        let handler = handler(
            commerce_config(false),
            resolver_returning(Some(ActingUser::Anonymous)),
            gateway.clone(),
            notifier,
        );

        let event = entitlement_refund_event(true).to_envelope();
        handler.handle(event).await.unwrap();

        assert_eq!(gateway.open_call_count(), 0);
    }

    #[tokio::test]
    async fn owner_match_initiates_refund() {
        let gateway = Arc::new(CountingGateway::opening(vec![1, 2]));
        let notifier = Arc::new(RecordingNotifier::new());
        let handler = handler(
            commerce_config(true),
            resolver_returning(Some(ActingUser::Authenticated(test_student()))),
            gateway.clone(),
            notifier.clone(),
        );

        let event = entitlement_refund_event(true).to_envelope();
        handler.handle(event).await.unwrap();

        assert_eq!(gateway.open_call_count(), 1);
        // Both refunds approved cleanly, so no support notification
        assert_eq!(gateway.approve_call_count(), 2);
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn non_refundable_entitlement_makes_no_outbound_call() {
        let gateway = Arc::new(CountingGateway::opening(vec![1]));
        let notifier = Arc::new(RecordingNotifier::new());
        let handler = handler(
            commerce_config(false),
            resolver_returning(Some(ActingUser::Authenticated(test_student()))),
            gateway.clone(),
            notifier,
        );

        let event = entitlement_refund_event(false).to_envelope();
        handler.handle(event).await.unwrap();

        assert_eq!(gateway.open_call_count(), 0);
    }

    #[tokio::test]
    async fn gateway_failure_is_swallowed() {
        let gateway = Arc::new(CountingGateway::failing_open());
        let notifier = Arc::new(RecordingNotifier::new());
        let handler = handler(
            commerce_config(false),
            resolver_returning(Some(ActingUser::Authenticated(test_student()))),
            gateway.clone(),
            notifier,
        );

        let event = entitlement_refund_event(true).to_envelope();
        let result = handler.handle(event).await;

        assert!(result.is_ok());
        assert_eq!(gateway.open_call_count(), 1);
    }
}
