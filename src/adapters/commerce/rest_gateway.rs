//! Commerce service refund API client.
//!
//! Implements `RefundGateway` against the commerce service's REST API,
//! authenticating as the configured service worker.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::ExposeSecret;
use serde_json::json;
use tracing::debug;

use crate::config::CommerceConfig;
use crate::domain::foundation::RefundId;
use crate::domain::refund::RefundRequest;
use crate::ports::{GatewayError, RefundGateway};

/// Default request timeout against the commerce service.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Action verb for approving only the payment side of a refund.
///
/// The refunded seat or entitlement is already revoked by the time a refund
/// is opened here; a full approval would make the commerce service revoke it
/// again.
const APPROVE_PAYMENT_ONLY: &str = "approve_payment_only";

/// REST client for the commerce service's refund endpoints.
pub struct RestRefundGateway {
    config: CommerceConfig,
    client: Client,
}

impl RestRefundGateway {
    /// Creates a gateway with the default request timeout.
    pub fn new(config: CommerceConfig) -> Self {
        Self::with_timeout(config, DEFAULT_TIMEOUT)
    }

    /// Creates a gateway with an explicit request timeout.
    pub fn with_timeout(config: CommerceConfig, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn refunds_url(&self) -> String {
        format!("{}/refunds/", self.config.api_url.trim_end_matches('/'))
    }

    fn process_url(&self, refund_id: RefundId) -> String {
        format!(
            "{}/refunds/{}/process/",
            self.config.api_url.trim_end_matches('/'),
            refund_id
        )
    }

    fn map_send_error(err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::Timeout(err.to_string())
        } else if err.is_connect() {
            GatewayError::Transport(format!("Connection failed: {}", err))
        } else {
            GatewayError::Transport(err.to_string())
        }
    }

    async fn check_status(response: Response) -> Result<Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(GatewayError::Service {
            status: status.as_u16(),
            message: body,
        })
    }
}

#[async_trait]
impl RefundGateway for RestRefundGateway {
    async fn open_refund(&self, request: &RefundRequest) -> Result<Vec<RefundId>, GatewayError> {
        let url = self.refunds_url();
        debug!(url = %url, "Opening refund on commerce service");

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.config.api_access_token.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let response = Self::check_status(response).await?;

        response
            .json::<Vec<RefundId>>()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }

    async fn approve_refund_payment_only(&self, refund_id: RefundId) -> Result<(), GatewayError> {
        let url = self.process_url(refund_id);
        debug!(url = %url, refund_id = %refund_id, "Approving refund payment");

        let response = self
            .client
            .put(&url)
            .bearer_auth(self.config.api_access_token.expose_secret())
            .json(&json!({ "action": APPROVE_PAYMENT_ONLY }))
            .send()
            .await
            .map_err(Self::map_send_error)?;

        Self::check_status(response).await?;
        Ok(())
    }
}
