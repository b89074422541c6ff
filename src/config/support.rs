//! Support ticketing (Zendesk) configuration

use secrecy::SecretString;
use serde::Deserialize;

use super::error::ValidationError;

/// Support ticketing configuration (Zendesk).
///
/// Support notifications are optional infrastructure: when this section is
/// absent, refund processing still succeeds and the notifier is a silent
/// no-op.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupportConfig {
    /// Base URL of the Zendesk instance (e.g. `https://acme.zendesk.com`).
    pub zendesk_url: Option<String>,

    /// Zendesk account email used for API authentication.
    pub zendesk_user: Option<String>,

    /// Zendesk API token.
    pub zendesk_api_key: Option<SecretString>,
}

impl SupportConfig {
    /// Whether Zendesk ticket creation is configured.
    ///
    /// All three values are required to create tickets.
    pub fn is_configured(&self) -> bool {
        self.zendesk_url.is_some() && self.zendesk_user.is_some() && self.zendesk_api_key.is_some()
    }

    /// Validate support configuration.
    ///
    /// A fully absent section is valid (notifications disabled); a partially
    /// filled one is rejected so misconfiguration surfaces at startup rather
    /// than as silently dropped tickets.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let set_count = [
            self.zendesk_url.is_some(),
            self.zendesk_user.is_some(),
            self.zendesk_api_key.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count();

        match set_count {
            0 => Ok(()),
            3 => {
                let url = self.zendesk_url.as_deref().unwrap_or_default();
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(ValidationError::InvalidZendeskUrl);
                }
                Ok(())
            }
            _ => Err(ValidationError::IncompleteZendeskConfig),
        }
    }
}
