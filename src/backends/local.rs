//! Local Disk Backend
//!
//! One JSON document per key under a root directory. File names are the
//! percent-encoded key, so the key space is rebuilt from a directory scan
//! when the backend is reopened.

use super::memory::list_prefix;
use crate::domain::ports::{KvBackend, StoreRequest, StoreResponse};
use crate::error::Result;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

const DOCUMENT_EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "tmp";

/// File-backed key-value backend
pub struct LocalBackend {
    /// Root directory for documents
    root_path: PathBuf,
    /// Index of stored keys (key -> file path)
    index: RwLock<BTreeMap<String, PathBuf>>,
}

impl LocalBackend {
    /// Open the backend at `root_path`, creating the directory if needed
    pub async fn open(root_path: impl Into<PathBuf>) -> Result<Self> {
        let root_path = root_path.into();
        fs::create_dir_all(&root_path).await?;

        let mut index = BTreeMap::new();
        let mut entries = fs::read_dir(&root_path).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(DOCUMENT_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match urlencoding::decode(stem) {
                Ok(key) => {
                    index.insert(key.into_owned(), path.clone());
                }
                Err(e) => warn!("Skipping undecodable document {}: {}", path.display(), e),
            }
        }

        debug!("Opened local backend at {} with {} keys", root_path.display(), index.len());

        Ok(Self {
            root_path,
            index: RwLock::new(index),
        })
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.index.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root_path
            .join(format!("{}.{}", urlencoding::encode(key), DOCUMENT_EXTENSION))
    }

    fn indexed_path(&self, key: &str) -> Option<PathBuf> {
        self.index.read().get(key).cloned()
    }

    /// Write through a temporary file so readers never see a torn document
    ///
    /// Each write gets its own temporary file; concurrent writers to one key
    /// race only on the final rename.
    async fn write_document(&self, key: &str, document: &str) -> std::io::Result<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension(format!("{}.{}", Uuid::new_v4().simple(), TEMP_EXTENSION));
        fs::write(&tmp, document).await?;
        fs::rename(&tmp, &path).await?;
        self.index.write().insert(key.to_string(), path);
        Ok(())
    }
}

#[async_trait]
impl KvBackend for LocalBackend {
    async fn create(&self, req: &StoreRequest) -> StoreResponse {
        match self.write_document(&req.url, &req.content).await {
            Ok(()) => StoreResponse::success(Vec::new()),
            Err(e) => StoreResponse::failure(format!("write {}: {}", req.url, e)),
        }
    }

    async fn get(&self, req: &StoreRequest) -> StoreResponse {
        let Some(path) = self.indexed_path(&req.url) else {
            return StoreResponse::failure(format!("key not found: {}", req.url));
        };
        match fs::read_to_string(&path).await {
            Ok(doc) => StoreResponse::success(vec![doc]),
            Err(e) => StoreResponse::failure(format!("read {}: {}", req.url, e)),
        }
    }

    async fn list(&self, req: &StoreRequest) -> StoreResponse {
        let prefix = list_prefix(&req.url);
        let paths: Vec<(String, PathBuf)> = self
            .index
            .read()
            .range(prefix.clone()..)
            .take_while(|(k, _)| k.starts_with(&prefix))
            .map(|(k, p)| (k.clone(), p.clone()))
            .collect();

        let mut docs = Vec::with_capacity(paths.len());
        for (key, path) in paths {
            match fs::read_to_string(&path).await {
                Ok(doc) => docs.push(doc),
                Err(e) => return StoreResponse::failure(format!("read {}: {}", key, e)),
            }
        }
        StoreResponse::success(docs)
    }

    async fn update(&self, req: &StoreRequest) -> StoreResponse {
        if self.indexed_path(&req.url).is_none() {
            return StoreResponse::failure(format!("key not found: {}", req.url));
        }
        match self.write_document(&req.url, &req.new_content).await {
            Ok(()) => StoreResponse::success(Vec::new()),
            Err(e) => StoreResponse::failure(format!("write {}: {}", req.url, e)),
        }
    }

    async fn delete(&self, req: &StoreRequest) -> StoreResponse {
        let removed = self.index.write().remove(&req.url);
        let Some(path) = removed else {
            return StoreResponse::failure(format!("key not found: {}", req.url));
        };
        match fs::remove_file(&path).await {
            Ok(()) => StoreResponse::success(Vec::new()),
            Err(e) => StoreResponse::failure(format!("remove {}: {}", req.url, e)),
        }
    }

    fn backend_name(&self) -> &str {
        "local"
    }
}
