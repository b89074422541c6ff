//! RefundOrchestrator - the refund decision procedure.
//!
//! One path for both product variants: build the payload, open refunds on
//! the commerce service, approve what policy allows, and hand whatever still
//! needs a human to the support queue.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::foundation::RefundId;
use crate::domain::refund::{RefundPolicy, RefundRequest, RefundableProduct};
use crate::ports::{GatewayError, RefundGateway, SupportNotifier};

/// Orchestrates refund creation, approval and support notification for one
/// refundable product.
///
/// Callers must have confirmed refund eligibility before invoking this type;
/// it does not re-check.
pub struct RefundOrchestrator {
    gateway: Arc<dyn RefundGateway>,
    notifier: Arc<dyn SupportNotifier>,
}

impl RefundOrchestrator {
    pub fn new(gateway: Arc<dyn RefundGateway>, notifier: Arc<dyn SupportNotifier>) -> Self {
        Self { gateway, notifier }
    }

    /// Attempt to initiate a refund for any orders associated with the
    /// product.
    ///
    /// Returns the commerce service's ids for any refunds that were opened
    /// (may be empty).
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the refund-creation call itself fails.
    /// Approval and notification failures are absorbed here and never
    /// propagate.
    pub async fn refund(
        &self,
        product: &RefundableProduct,
        policy: &RefundPolicy,
    ) -> Result<Vec<RefundId>, GatewayError> {
        let payload = RefundRequest::for_product(product);

        info!(
            user_id = %product.owner().id,
            product_kind = product.kind(),
            product_id = %product.identifier(),
            "Attempting to create a refund"
        );

        let refund_ids = self.gateway.open_refund(&payload).await?;

        if refund_ids.is_empty() {
            info!(
                user_id = %product.owner().id,
                product_kind = product.kind(),
                product_id = %product.identifier(),
                "No refund opened"
            );
            return Ok(refund_ids);
        }

        info!(
            user_id = %product.owner().id,
            product_kind = product.kind(),
            product_id = %product.identifier(),
            refund_ids = ?refund_ids,
            "Refund successfully opened"
        );

        self.process_refund(&refund_ids, product, policy).await;

        Ok(refund_ids)
    }

    /// Approve what policy allows and route the rest to the support queue.
    async fn process_refund(
        &self,
        refund_ids: &[RefundId],
        product: &RefundableProduct,
        policy: &RefundPolicy,
    ) {
        let refunds_requiring_approval = if policy.automatic_approval {
            let mut requiring_approval = Vec::new();

            for refund_id in refund_ids {
                match self.gateway.approve_refund_payment_only(*refund_id).await {
                    Ok(()) => {
                        info!(refund_id = %refund_id, "Refund successfully approved");
                    }
                    Err(err) => {
                        // One failed approval must not abort the rest of
                        // the batch; degrade just this id to manual review.
                        error!(
                            refund_id = %refund_id,
                            error = %err,
                            "Failed to automatically approve refund"
                        );
                        requiring_approval.push(*refund_id);
                    }
                }
            }

            requiring_approval
        } else {
            refund_ids.to_vec()
        };

        if refunds_requiring_approval.is_empty() {
            return;
        }

        if !policy.should_notify(product.mode()) {
            info!(
                user_id = %product.owner().id,
                product_kind = product.kind(),
                product_id = %product.identifier(),
                mode = %product.mode(),
                "Skipping refund support notification for non-notified enrollment mode"
            );
            return;
        }

        if let Err(err) = self
            .notifier
            .notify_support(product, &refunds_requiring_approval)
            .await
        {
            warn!(
                user_id = %product.owner().id,
                product_id = %product.identifier(),
                error = %err,
                "Could not send support notification for refund"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{CourseKey, UserId};
    use crate::domain::refund::{EnrollmentMode, Student};
    use crate::ports::NotificationError;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use uuid::Uuid;

    // ====================================================================
    // Mock Implementations
    // ====================================================================

    struct MockGateway {
        open_result: Mutex<Option<Result<Vec<RefundId>, GatewayError>>>,
        failing_approvals: Vec<RefundId>,
        open_calls: Mutex<Vec<RefundRequest>>,
        approve_calls: Mutex<Vec<RefundId>>,
    }

    impl MockGateway {
        fn opening(ids: Vec<i64>) -> Self {
            Self {
                open_result: Mutex::new(Some(Ok(ids
                    .into_iter()
                    .map(RefundId::new)
                    .collect()))),
                failing_approvals: Vec::new(),
                open_calls: Mutex::new(Vec::new()),
                approve_calls: Mutex::new(Vec::new()),
            }
        }

        fn failing_open(err: GatewayError) -> Self {
            Self {
                open_result: Mutex::new(Some(Err(err))),
                failing_approvals: Vec::new(),
                open_calls: Mutex::new(Vec::new()),
                approve_calls: Mutex::new(Vec::new()),
            }
        }

        fn with_failing_approvals(mut self, ids: Vec<i64>) -> Self {
            self.failing_approvals = ids.into_iter().map(RefundId::new).collect();
            self
        }

        fn open_call_count(&self) -> usize {
            self.open_calls.lock().unwrap().len()
        }

        fn approve_calls(&self) -> Vec<RefundId> {
            self.approve_calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RefundGateway for MockGateway {
        async fn open_refund(
            &self,
            request: &RefundRequest,
        ) -> Result<Vec<RefundId>, GatewayError> {
            self.open_calls.lock().unwrap().push(request.clone());
            self.open_result
                .lock()
                .unwrap()
                .take()
                .expect("open_refund called more than once")
        }

        async fn approve_refund_payment_only(
            &self,
            refund_id: RefundId,
        ) -> Result<(), GatewayError> {
            self.approve_calls.lock().unwrap().push(refund_id);
            if self.failing_approvals.contains(&refund_id) {
                return Err(GatewayError::Service {
                    status: 500,
                    message: "approval failed".to_string(),
                });
            }
            Ok(())
        }
    }

    struct MockNotifier {
        fail_themed: bool,
        notified: Mutex<Vec<Vec<RefundId>>>,
    }

    impl MockNotifier {
        fn new() -> Self {
            Self {
                fail_themed: false,
                notified: Mutex::new(Vec::new()),
            }
        }

        fn themed() -> Self {
            Self {
                fail_themed: true,
                notified: Mutex::new(Vec::new()),
            }
        }

        fn notifications(&self) -> Vec<Vec<RefundId>> {
            self.notified.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SupportNotifier for MockNotifier {
        async fn notify_support(
            &self,
            _product: &RefundableProduct,
            refund_ids: &[RefundId],
        ) -> Result<(), NotificationError> {
            if self.fail_themed {
                return Err(NotificationError::ThemedSiteUnsupported);
            }
            self.notified.lock().unwrap().push(refund_ids.to_vec());
            Ok(())
        }
    }

    fn student() -> Student {
        Student {
            id: UserId::new(7),
            username: "learner".to_string(),
            email: "learner@example.com".to_string(),
            full_name: None,
        }
    }

    fn verified_enrollment() -> RefundableProduct {
        RefundableProduct::Enrollment {
            user: student(),
            course_id: CourseKey::new("course-v1:AcmeX+CS101+2026").unwrap(),
            mode: EnrollmentMode::Verified,
        }
    }

    fn honor_enrollment() -> RefundableProduct {
        RefundableProduct::Enrollment {
            user: student(),
            course_id: CourseKey::new("course-v1:AcmeX+CS101+2026").unwrap(),
            mode: EnrollmentMode::Honor,
        }
    }

    fn verified_entitlement() -> RefundableProduct {
        RefundableProduct::Entitlement {
            user: student(),
            entitlement_uuid: Uuid::new_v4(),
            order_number: "EDX-100042".to_string(),
            mode: EnrollmentMode::Verified,
        }
    }

    fn orchestrator(
        gateway: Arc<MockGateway>,
        notifier: Arc<MockNotifier>,
    ) -> RefundOrchestrator {
        RefundOrchestrator::new(gateway, notifier)
    }

    // ====================================================================
    // Tests
    // ====================================================================

    #[tokio::test]
    async fn empty_refund_list_is_terminal_and_successful() {
        let gateway = Arc::new(MockGateway::opening(vec![]));
        let notifier = Arc::new(MockNotifier::new());
        let orch = orchestrator(gateway.clone(), notifier.clone());

        let ids = orch
            .refund(&verified_enrollment(), &RefundPolicy::new(true))
            .await
            .unwrap();

        assert!(ids.is_empty());
        assert!(gateway.approve_calls().is_empty());
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn open_failure_propagates_to_caller() {
        let gateway = Arc::new(MockGateway::failing_open(GatewayError::Timeout(
            "deadline exceeded".to_string(),
        )));
        let notifier = Arc::new(MockNotifier::new());
        let orch = orchestrator(gateway, notifier.clone());

        let result = orch
            .refund(&verified_enrollment(), &RefundPolicy::new(false))
            .await;

        assert!(matches!(result, Err(GatewayError::Timeout(_))));
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn disabled_auto_approval_routes_whole_batch_to_notification() {
        let gateway = Arc::new(MockGateway::opening(vec![1, 2, 3]));
        let notifier = Arc::new(MockNotifier::new());
        let orch = orchestrator(gateway.clone(), notifier.clone());

        let ids = orch
            .refund(&verified_enrollment(), &RefundPolicy::new(false))
            .await
            .unwrap();

        assert_eq!(ids.len(), 3);
        // No approval attempted at all
        assert!(gateway.approve_calls().is_empty());
        // Single notification carrying the full batch
        let notifications = notifier.notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].len(), 3);
    }

    #[tokio::test]
    async fn clean_auto_approval_skips_notification_entirely() {
        let gateway = Arc::new(MockGateway::opening(vec![1, 2]));
        let notifier = Arc::new(MockNotifier::new());
        let orch = orchestrator(gateway.clone(), notifier.clone());

        let ids = orch
            .refund(&verified_entitlement(), &RefundPolicy::new(true))
            .await
            .unwrap();

        assert_eq!(ids.len(), 2);
        assert_eq!(gateway.approve_calls().len(), 2);
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn one_failed_approval_degrades_only_that_id() {
        let gateway =
            Arc::new(MockGateway::opening(vec![1, 2, 3]).with_failing_approvals(vec![2]));
        let notifier = Arc::new(MockNotifier::new());
        let orch = orchestrator(gateway.clone(), notifier.clone());

        orch.refund(&verified_enrollment(), &RefundPolicy::new(true))
            .await
            .unwrap();

        // All three ids were attempted despite the middle failure
        assert_eq!(
            gateway.approve_calls(),
            vec![RefundId::new(1), RefundId::new(2), RefundId::new(3)]
        );
        // Only the failed id reaches the support queue
        let notifications = notifier.notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0], vec![RefundId::new(2)]);
    }

    #[tokio::test]
    async fn non_notified_mode_suppresses_notification() {
        let gateway = Arc::new(MockGateway::opening(vec![1]));
        let notifier = Arc::new(MockNotifier::new());
        let orch = orchestrator(gateway, notifier.clone());

        let ids = orch
            .refund(&honor_enrollment(), &RefundPolicy::new(false))
            .await
            .unwrap();

        // Refund was still opened; only the notification is suppressed
        assert_eq!(ids, vec![RefundId::new(1)]);
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn themed_site_notification_failure_is_absorbed() {
        let gateway = Arc::new(MockGateway::opening(vec![1]));
        let notifier = Arc::new(MockNotifier::themed());
        let orch = orchestrator(gateway, notifier);

        // Caller still sees the opened refund ids, not an error
        let ids = orch
            .refund(&verified_enrollment(), &RefundPolicy::new(false))
            .await
            .unwrap();

        assert_eq!(ids, vec![RefundId::new(1)]);
    }

    #[tokio::test]
    async fn entitlement_payload_reaches_gateway() {
        let gateway = Arc::new(MockGateway::opening(vec![]));
        let notifier = Arc::new(MockNotifier::new());
        let orch = orchestrator(gateway.clone(), notifier);

        let product = verified_entitlement();
        orch.refund(&product, &RefundPolicy::new(false))
            .await
            .unwrap();

        assert_eq!(gateway.open_call_count(), 1);
        let call = gateway.open_calls.lock().unwrap()[0].clone();
        assert_eq!(call, RefundRequest::for_product(&product));
    }
}
