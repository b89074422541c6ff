//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is loaded
//! with the `COMMERCE_BRIDGE` prefix and nested values use double underscores
//! as separators.
//!
//! # Example
//!
//! ```no_run
//! use commerce_bridge::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod commerce;
mod error;
mod support;

pub use commerce::CommerceConfig;
pub use error::{ConfigError, ValidationError};
pub use support::SupportConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Contains the commerce integration and support ticketing sections.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Commerce service configuration (refund API, approval toggle)
    #[serde(default)]
    pub commerce: CommerceConfig,

    /// Support ticketing configuration (Zendesk)
    #[serde(default)]
    pub support: SupportConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `COMMERCE_BRIDGE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `COMMERCE_BRIDGE__COMMERCE__API_URL=...` -> `commerce.api_url = ...`
    /// - `COMMERCE_BRIDGE__SUPPORT__ZENDESK_URL=...` -> `support.zendesk_url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("COMMERCE_BRIDGE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.commerce.validate()?;
        self.support.validate()?;
        Ok(())
    }
}
