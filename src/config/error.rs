//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid commerce API URL format")]
    InvalidApiUrl,

    #[error("Invalid commerce public URL root")]
    InvalidPublicUrlRoot,

    #[error("Invalid Zendesk URL format")]
    InvalidZendeskUrl,

    #[error("Zendesk configuration is incomplete (url, user and api key must all be set)")]
    IncompleteZendeskConfig,
}
