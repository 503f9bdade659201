//! Error types for the dock inventory
//!
//! Provides structured error types for the store client, the key-value
//! backends, configuration loading and the discovery loop.

use thiserror::Error;

/// Unified error type for the inventory
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Internal Errors
    // =========================================================================
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // =========================================================================
    // Backend Errors
    // =========================================================================
    /// Non-success response from the key-value backend, message verbatim
    #[error("{0}")]
    Backend(String),

    #[error("Failed to decode {kind} document: {reason}")]
    Decode { kind: String, reason: String },

    // =========================================================================
    // Resource Errors
    // =========================================================================
    #[error("Resource not found: {kind}/{name}")]
    ResourceNotFound { kind: String, name: String },

    #[error("Resource already exists: {kind}/{name}")]
    ResourceExists { kind: String, name: String },

    #[error("Resource type is not supported: {0}")]
    UnsupportedType(String),

    // =========================================================================
    // Parse Errors
    // =========================================================================
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this error reports a missing resource
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::ResourceNotFound { .. })
    }

    /// Check if this error is transient
    ///
    /// Backend and IO failures may clear up on the next reconcile cycle;
    /// everything else needs a change in input or configuration.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Backend(_) | Error::Io(_))
    }
}

/// Result type alias for the inventory
pub type Result<T> = std::result::Result<T, Error>;
