//! Key-Value Backend Adapters
//!
//! Provides adapters for the hierarchical key-value store:
//! - Memory: process-local, for tests and single-shot runs
//! - Local: one file per key on local disk

pub mod local;
pub mod memory;

#[cfg(test)]
pub(crate) mod testing;

pub use local::LocalBackend;
pub use memory::MemoryBackend;

use crate::config::{DatabaseConfig, DatabaseDriver};
use crate::domain::ports::KvBackendRef;
use crate::error::Result;
use std::sync::Arc;
use tracing::info;

/// Factory for creating key-value backend adapters
pub struct BackendFactory;

impl BackendFactory {
    /// Create the backend selected by `config`
    pub async fn create(config: &DatabaseConfig) -> Result<KvBackendRef> {
        info!("Initializing {} database backend", config.driver);

        match config.driver {
            DatabaseDriver::Memory => Ok(Arc::new(MemoryBackend::new())),
            DatabaseDriver::Local => Ok(Arc::new(LocalBackend::open(&config.path).await?)),
        }
    }
}
