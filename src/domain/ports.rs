//! Domain Ports - Core trait definitions for the inventory
//!
//! These traits define the boundaries between the inventory logic and external systems.
//! Adapters implement these traits to provide concrete functionality.

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::sync::Arc;

// =============================================================================
// Store Request/Response
// =============================================================================

/// A single operation against the key-value backend
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreRequest {
    /// Key, or key prefix for list operations
    pub url: String,
    /// Document for create
    pub content: String,
    /// Replacement document for update
    pub new_content: String,
}

impl StoreRequest {
    /// Request addressing `url` with no payload
    pub fn at(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Create request carrying `content`
    pub fn create(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    /// Update request carrying `new_content`
    pub fn update(url: impl Into<String>, new_content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            new_content: new_content.into(),
            ..Default::default()
        }
    }
}

/// Outcome marker of a backend operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    Success,
    Failure,
}

/// Backend reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreResponse {
    pub status: StoreStatus,
    /// Serialized documents, in key order for list operations
    pub message: Vec<String>,
    /// Backend error text on failure
    pub error: String,
}

impl StoreResponse {
    pub fn success(message: Vec<String>) -> Self {
        Self {
            status: StoreStatus::Success,
            message,
            error: String::new(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            status: StoreStatus::Failure,
            message: Vec::new(),
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == StoreStatus::Success
    }

    /// Convert to a `Result`, surfacing the backend message verbatim
    pub fn into_result(self) -> Result<Vec<String>> {
        match self.status {
            StoreStatus::Success => Ok(self.message),
            StoreStatus::Failure => Err(Error::Backend(self.error)),
        }
    }
}

// =============================================================================
// Key-Value Backend Port
// =============================================================================

/// Port for the hierarchical key-value store
///
/// Implementations report failures through [`StoreResponse`] rather than
/// `Err`, mirroring a remote service that always answers with a status.
#[async_trait]
pub trait KvBackend: Send + Sync {
    /// Write `content` at `url`
    async fn create(&self, req: &StoreRequest) -> StoreResponse;

    /// Read the single document at `url`
    async fn get(&self, req: &StoreRequest) -> StoreResponse;

    /// Read every document under the `url` prefix
    async fn list(&self, req: &StoreRequest) -> StoreResponse;

    /// Replace the document at `url` with `new_content`
    async fn update(&self, req: &StoreRequest) -> StoreResponse;

    /// Remove the document at `url`
    async fn delete(&self, req: &StoreRequest) -> StoreResponse;

    /// Get backend name
    fn backend_name(&self) -> &str;
}

// =============================================================================
// Dock Discoverer Port
// =============================================================================

/// Port for discovering local resources and reporting them to the store
#[async_trait]
pub trait DockDiscoverer: Send + Sync {
    /// Build the locally visible resource set from configuration
    async fn init(&mut self) -> Result<()>;

    /// Refresh local resource state
    async fn discover(&mut self) -> Result<()>;

    /// Upsert every locally known resource into the store
    async fn report(&self) -> Result<()>;
}

// =============================================================================
// Type Aliases for Arc'd Traits
// =============================================================================

pub type KvBackendRef = Arc<dyn KvBackend>;
