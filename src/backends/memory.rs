//! In-Memory Backend
//!
//! Key-value backend held in a DashMap. Create overwrites an existing key,
//! the same way an etcd `Put` does.

use crate::domain::ports::{KvBackend, StoreRequest, StoreResponse};
use async_trait::async_trait;
use dashmap::DashMap;

/// Process-local key-value backend
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: DashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw document at `key`
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|r| r.value().clone())
    }

    /// Store a raw document, bypassing serialization
    pub fn insert_raw(&self, key: impl Into<String>, document: impl Into<String>) {
        self.entries.insert(key.into(), document.into());
    }
}

/// Prefix used for range reads under `url`
pub(crate) fn list_prefix(url: &str) -> String {
    format!("{}/", url.trim_end_matches('/'))
}

#[async_trait]
impl KvBackend for MemoryBackend {
    async fn create(&self, req: &StoreRequest) -> StoreResponse {
        self.entries.insert(req.url.clone(), req.content.clone());
        StoreResponse::success(Vec::new())
    }

    async fn get(&self, req: &StoreRequest) -> StoreResponse {
        match self.entries.get(&req.url) {
            Some(doc) => StoreResponse::success(vec![doc.value().clone()]),
            None => StoreResponse::failure(format!("key not found: {}", req.url)),
        }
    }

    async fn list(&self, req: &StoreRequest) -> StoreResponse {
        let prefix = list_prefix(&req.url);
        let mut docs: Vec<(String, String)> = self
            .entries
            .iter()
            .filter(|r| r.key().starts_with(&prefix))
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect();
        docs.sort_by(|a, b| a.0.cmp(&b.0));

        StoreResponse::success(docs.into_iter().map(|(_, doc)| doc).collect())
    }

    async fn update(&self, req: &StoreRequest) -> StoreResponse {
        match self.entries.get_mut(&req.url) {
            Some(mut doc) => {
                *doc = req.new_content.clone();
                StoreResponse::success(Vec::new())
            }
            None => StoreResponse::failure(format!("key not found: {}", req.url)),
        }
    }

    async fn delete(&self, req: &StoreRequest) -> StoreResponse {
        match self.entries.remove(&req.url) {
            Some(_) => StoreResponse::success(Vec::new()),
            None => StoreResponse::failure(format!("key not found: {}", req.url)),
        }
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}
