//! Resource Store Client
//!
//! Typed CRUD over the key-value backend. Every operation builds a backend
//! key with the key-path builder, (de)serializes JSON documents and turns a
//! non-success response into [`Error::Backend`] carrying the backend message.
//!
//! Updates are read-modify-write without a version check. Two callers
//! updating the same document concurrently can lose one of the changes.

mod docks;
mod pools;
mod profiles;

pub use profiles::{DEFAULT_BLOCK_PROFILE_NAME, DEFAULT_FILE_PROFILE_NAME};

use crate::context::Context;
use crate::domain::ports::{KvBackendRef, StoreRequest};
use crate::error::{Error, Result};
use crate::keys::{build_path, AddressMode};
use crate::model::{HasTimestamps, Stored};
use crate::query::{self, QueryParams};
use tracing::{debug, error};

// =============================================================================
// Update Inputs
// =============================================================================

/// Fields a dock update may change; empty values are ignored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DockUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Fields a pool update may change; empty strings are ignored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub used_capacity: Option<i64>,
    pub used: Option<bool>,
}

/// Non-empty value of an optional string input
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

// =============================================================================
// Store Client
// =============================================================================

/// Typed store client, constructed once and shared by every component
#[derive(Clone)]
pub struct StoreClient {
    backend: KvBackendRef,
}

impl StoreClient {
    pub fn new(backend: KvBackendRef) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &KvBackendRef {
        &self.backend
    }

    /// Backend key for a record of kind `T`
    ///
    /// Inventory resources are not tenant scoped, so the tenant segment is
    /// always omitted.
    fn key<T: Stored>(segments: &[&str]) -> String {
        build_path(T::KIND, AddressMode::Backend, "", segments)
    }

    fn decode<T: Stored>(doc: &str) -> Result<T> {
        serde_json::from_str(doc).map_err(|e| {
            error!("When parsing {} in db: {}", T::KIND.singular(), e);
            Error::Decode {
                kind: T::KIND.singular().to_string(),
                reason: e.to_string(),
            }
        })
    }

    /// Assign identity and creation time if absent, then write
    async fn create_record<T: Stored>(&self, ctx: &Context, mut record: T) -> Result<T> {
        record.ensure_id();
        record.ensure_created_at();
        self.write_created(ctx, &record).await?;
        Ok(record)
    }

    /// Write `record` through the backend's create operation
    async fn write_created<T: Stored>(&self, ctx: &Context, record: &T) -> Result<()> {
        let body = serde_json::to_string(record)?;
        let req = StoreRequest::create(Self::key::<T>(&[record.id()]), body);
        debug!(tenant = %ctx.tenant_id, key = %req.url, "create");

        self.backend.create(&req).await.into_result().map_err(|e| {
            error!("When create {} in db: {}", T::KIND.singular(), e);
            e
        })?;
        Ok(())
    }

    async fn get_record<T: Stored>(&self, ctx: &Context, id: &str) -> Result<T> {
        let req = StoreRequest::at(Self::key::<T>(&[id]));
        debug!(tenant = %ctx.tenant_id, key = %req.url, "get");

        let docs = self.backend.get(&req).await.into_result().map_err(|e| {
            error!("When get {} in db: {}", T::KIND.singular(), e);
            e
        })?;
        let doc = docs
            .first()
            .ok_or_else(|| Error::Backend(format!("empty response for {}", req.url)))?;
        Self::decode(doc)
    }

    async fn list_records<T: Stored>(&self, ctx: &Context) -> Result<Vec<T>> {
        let req = StoreRequest::at(Self::key::<T>(&[]));
        debug!(tenant = %ctx.tenant_id, key = %req.url, "list");

        let docs = self.backend.list(&req).await.into_result().map_err(|e| {
            error!("When list {} in db: {}", T::KIND, e);
            e
        })?;
        docs.iter().map(|doc| Self::decode(doc)).collect()
    }

    async fn list_records_with_filter<T: Stored>(
        &self,
        ctx: &Context,
        params: &QueryParams,
    ) -> Result<Vec<T>> {
        let records = self.list_records::<T>(ctx).await?;
        Ok(query::apply(records, params, T::fields()))
    }

    /// Fetch, mutate, stamp and write back the full document
    async fn update_record<T, F>(&self, ctx: &Context, id: &str, mutate: F) -> Result<T>
    where
        T: Stored,
        F: FnOnce(&mut T) + Send,
    {
        let mut record: T = self.get_record(ctx, id).await?;
        mutate(&mut record);
        record.touch();

        let body = serde_json::to_string(&record)?;
        let req = StoreRequest::update(Self::key::<T>(&[id]), body);
        self.backend.update(&req).await.into_result().map_err(|e| {
            error!("When update {} in db: {}", T::KIND.singular(), e);
            e
        })?;
        Ok(record)
    }

    async fn delete_record<T: Stored>(&self, ctx: &Context, id: &str) -> Result<()> {
        let req = StoreRequest::at(Self::key::<T>(&[id]));
        debug!(tenant = %ctx.tenant_id, key = %req.url, "delete");

        self.backend.delete(&req).await.into_result().map_err(|e| {
            error!("When delete {} in db: {}", T::KIND.singular(), e);
            e
        })?;
        Ok(())
    }
}
