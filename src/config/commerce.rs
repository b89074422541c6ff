//! Commerce service configuration

use secrecy::SecretString;
use serde::Deserialize;

use super::error::ValidationError;

/// Commerce service configuration.
///
/// Covers everything this crate needs to talk to the external commerce
/// service: whether the integration is active at all, where the refund API
/// lives, the service-worker identity used to authenticate to it, the public
/// URL root used to build refund review links, and the automatic refund
/// approval toggle.
#[derive(Debug, Clone, Deserialize)]
pub struct CommerceConfig {
    /// Whether the commerce integration is active at all.
    ///
    /// When false, the refund event handlers are silent no-ops.
    #[serde(default)]
    pub enabled: bool,

    /// Base URL of the commerce service's REST API.
    #[serde(default)]
    pub api_url: String,

    /// Username of the service worker account used for refund API calls.
    #[serde(default)]
    pub service_worker_username: String,

    /// Access token for the service worker account.
    #[serde(default = "empty_secret")]
    pub api_access_token: SecretString,

    /// Public URL root of the commerce service, used for refund review links.
    #[serde(default)]
    pub public_url_root: String,

    /// When enabled, opened refunds are payment-approved automatically and
    /// only failed approvals fall back to the manual support queue.
    #[serde(default)]
    pub enable_automatic_refund_approval: bool,
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new())
}

impl Default for CommerceConfig {
    fn default() -> Self {
        Self {
            enabled: bool::default(),
            api_url: String::default(),
            service_worker_username: String::default(),
            api_access_token: empty_secret(),
            public_url_root: String::default(),
            enable_automatic_refund_approval: bool::default(),
        }
    }
}

impl CommerceConfig {
    /// Whether the commerce integration is configured and active.
    pub fn is_configured(&self) -> bool {
        self.enabled && !self.api_url.is_empty()
    }

    /// Validate commerce configuration.
    ///
    /// Only enforced when the integration is enabled; a disabled
    /// integration is always valid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.enabled {
            return Ok(());
        }

        if self.api_url.is_empty() {
            return Err(ValidationError::MissingRequired("COMMERCE_API_URL"));
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ValidationError::InvalidApiUrl);
        }
        if self.service_worker_username.is_empty() {
            return Err(ValidationError::MissingRequired(
                "COMMERCE_SERVICE_WORKER_USERNAME",
            ));
        }
        if self.public_url_root.is_empty() {
            return Err(ValidationError::MissingRequired("COMMERCE_PUBLIC_URL_ROOT"));
        }
        if !self.public_url_root.starts_with("http://")
            && !self.public_url_root.starts_with("https://")
        {
            return Err(ValidationError::InvalidPublicUrlRoot);
        }

        Ok(())
    }
}
