//! Zendesk support ticket notifier.
//!
//! Files a support ticket when opened refunds need a human to approve them.
//! A missing Zendesk configuration makes this a logged no-op; a Zendesk-side
//! failure is logged and swallowed, because the refunds themselves already
//! exist and support can still find them on the commerce dashboard.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde_json::{json, Value as JsonValue};
use tracing::{debug, error, info};

use crate::config::{CommerceConfig, SupportConfig};
use crate::domain::foundation::RefundId;
use crate::domain::refund::{
    refund_notification_body, RefundableProduct, REFUND_NOTIFICATION_SUBJECT,
};
use crate::ports::{NotificationError, SupportNotifier, ThemingProbe};

/// Default request timeout against Zendesk.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Tag applied to every ticket filed from this system.
const PLATFORM_TAG: &str = "LMS";

/// Tag marking tickets raised by the automated refund flow.
const AUTO_REFUND_TAG: &str = "auto_refund";

/// Files refund tickets with Zendesk.
pub struct ZendeskSupportNotifier {
    support: SupportConfig,
    commerce: CommerceConfig,
    theming: Arc<dyn ThemingProbe>,
    client: Client,
}

impl ZendeskSupportNotifier {
    pub fn new(
        support: SupportConfig,
        commerce: CommerceConfig,
        theming: Arc<dyn ThemingProbe>,
    ) -> Self {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            support,
            commerce,
            theming,
            client,
        }
    }

    /// Tags for a refund ticket, de-duplicated.
    fn ticket_tags() -> Vec<&'static str> {
        let mut tags = vec![AUTO_REFUND_TAG, PLATFORM_TAG];
        tags.sort_unstable();
        tags.dedup();
        tags
    }

    /// Builds the Zendesk ticket creation payload.
    fn ticket_payload(&self, product: &RefundableProduct, refund_ids: &[RefundId]) -> JsonValue {
        let owner = product.owner();
        let body = refund_notification_body(owner, refund_ids, &self.commerce.public_url_root);

        json!({
            "ticket": {
                "requester": {
                    "name": owner.display_name(),
                    "email": owner.email,
                },
                "subject": REFUND_NOTIFICATION_SUBJECT,
                "comment": { "body": body },
                "tags": Self::ticket_tags(),
            }
        })
    }

    async fn create_ticket(&self, payload: &JsonValue) {
        // is_configured() guarantees all three values are present
        let (Some(url), Some(user), Some(api_key)) = (
            self.support.zendesk_url.as_deref(),
            self.support.zendesk_user.as_deref(),
            self.support.zendesk_api_key.as_ref(),
        ) else {
            return;
        };

        let endpoint = format!("{}/api/v2/tickets.json", url.trim_end_matches('/'));

        let result = self
            .client
            .post(&endpoint)
            .basic_auth(
                format!("{}/token", user),
                Some(api_key.expose_secret()),
            )
            .json(payload)
            .send()
            .await;

        match result {
            Ok(response) if response.status() == StatusCode::CREATED => {
                info!("Successfully created Zendesk ticket");
            }
            Ok(response) => {
                error!(
                    status = response.status().as_u16(),
                    "Failed to create Zendesk ticket"
                );
            }
            Err(err) => {
                error!(error = %err, "Failed to create Zendesk ticket");
            }
        }
    }
}

#[async_trait]
impl SupportNotifier for ZendeskSupportNotifier {
    async fn notify_support(
        &self,
        product: &RefundableProduct,
        refund_ids: &[RefundId],
    ) -> Result<(), NotificationError> {
        // Themed sites carry their own branding and support channels; a
        // ticket filed against the default site would route to the wrong
        // support team.
        if self.theming.is_themed_request() {
            return Err(NotificationError::ThemedSiteUnsupported);
        }

        if !self.support.is_configured() {
            debug!("Zendesk is not configured; refund notification skipped");
            return Ok(());
        }

        let payload = self.ticket_payload(product, refund_ids);
        self.create_ticket(&payload).await;

        Ok(())
    }
}
