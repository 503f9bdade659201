//! Backend doubles for tests

use super::MemoryBackend;
use crate::domain::ports::{KvBackend, StoreRequest, StoreResponse};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Barrier;

/// Operation a [`GatedBackend`] holds callers on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatedOp {
    Get,
    List,
}

/// Memory backend that, while armed, parks callers of one operation after
/// their read until `parties` of them have read. Used to force the
/// read-modify-write interleavings concurrent writers can hit.
pub struct GatedBackend {
    pub inner: MemoryBackend,
    op: GatedOp,
    prefix: String,
    armed: AtomicBool,
    barrier: Barrier,
}

impl GatedBackend {
    pub fn new(op: GatedOp, prefix: impl Into<String>, parties: usize) -> Self {
        Self {
            inner: MemoryBackend::new(),
            op,
            prefix: prefix.into(),
            armed: AtomicBool::new(false),
            barrier: Barrier::new(parties),
        }
    }

    pub fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }

    async fn gate(&self, op: GatedOp, url: &str) {
        if op != self.op || !url.starts_with(&self.prefix) || !self.armed.load(Ordering::SeqCst) {
            return;
        }
        if self.barrier.wait().await.is_leader() {
            self.armed.store(false, Ordering::SeqCst);
        }
    }
}

#[async_trait]
impl KvBackend for GatedBackend {
    async fn create(&self, req: &StoreRequest) -> StoreResponse {
        self.inner.create(req).await
    }

    async fn get(&self, req: &StoreRequest) -> StoreResponse {
        let res = self.inner.get(req).await;
        self.gate(GatedOp::Get, &req.url).await;
        res
    }

    async fn list(&self, req: &StoreRequest) -> StoreResponse {
        let res = self.inner.list(req).await;
        self.gate(GatedOp::List, &req.url).await;
        res
    }

    async fn update(&self, req: &StoreRequest) -> StoreResponse {
        self.inner.update(req).await
    }

    async fn delete(&self, req: &StoreRequest) -> StoreResponse {
        self.inner.delete(req).await
    }

    fn backend_name(&self) -> &str {
        "gated"
    }
}

/// Memory backend whose writes can be switched to fail
pub struct FlakyBackend {
    pub inner: MemoryBackend,
    failing: AtomicBool,
    pub create_calls: AtomicUsize,
}

impl FlakyBackend {
    pub fn new(failing: bool) -> Self {
        Self {
            inner: MemoryBackend::new(),
            failing: AtomicBool::new(failing),
            create_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl KvBackend for FlakyBackend {
    async fn create(&self, req: &StoreRequest) -> StoreResponse {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return StoreResponse::failure("backend unavailable");
        }
        self.inner.create(req).await
    }

    async fn get(&self, req: &StoreRequest) -> StoreResponse {
        self.inner.get(req).await
    }

    async fn list(&self, req: &StoreRequest) -> StoreResponse {
        self.inner.list(req).await
    }

    async fn update(&self, req: &StoreRequest) -> StoreResponse {
        self.inner.update(req).await
    }

    async fn delete(&self, req: &StoreRequest) -> StoreResponse {
        self.inner.delete(req).await
    }

    fn backend_name(&self) -> &str {
        "flaky"
    }
}
