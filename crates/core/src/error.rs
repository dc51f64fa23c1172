//! Error types for the clinic assistant.
//!
//! Resolution itself never fails; these errors cover startup (config,
//! catalog loading and validation) and the serving layers.

use thiserror::Error;

/// Result type alias using the workspace Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type.
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Catalog Errors
    // =========================================================================
    #[error("Duplicate intent id: {0}")]
    DuplicateIntent(String),

    #[error("Intent '{0}' has an empty answer")]
    EmptyAnswer(String),

    #[error("Intent id must not be blank")]
    BlankIntentId,

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Failed to read catalog file: {0}")]
    CatalogIo(#[from] std::io::Error),

    #[error("Invalid catalog YAML: {0}")]
    CatalogYaml(#[from] serde_yaml::Error),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // =========================================================================
    // Serving Errors
    // =========================================================================
    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Intent not found: {0}")]
    IntentNotFound(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Governance error: {0}")]
    Governance(String),

    // =========================================================================
    // Generic Errors
    // =========================================================================
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create a catalog error.
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Create a gateway error.
    pub fn gateway(msg: impl Into<String>) -> Self {
        Self::Gateway(msg.into())
    }

    /// Create a governance error.
    pub fn governance(msg: impl Into<String>) -> Self {
        Self::Governance(msg.into())
    }

    /// Create an invalid request error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create an intent not found error.
    pub fn intent_not_found(id: impl Into<String>) -> Self {
        Self::IntentNotFound(id.into())
    }

    /// Create a session not found error.
    pub fn session_not_found(id: impl Into<String>) -> Self {
        Self::SessionNotFound(id.into())
    }

    /// Stable machine-readable code used in HTTP error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateIntent(_)
            | Self::EmptyAnswer(_)
            | Self::BlankIntentId
            | Self::Catalog(_)
            | Self::CatalogIo(_)
            | Self::CatalogYaml(_) => "CATALOG_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Gateway(_) => "GATEWAY_ERROR",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::IntentNotFound(_) => "INTENT_NOT_FOUND",
            Self::SessionNotFound(_) => "SESSION_NOT_FOUND",
            Self::Governance(_) => "GOVERNANCE_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Other(_) => "INTERNAL_ERROR",
        }
    }
}
