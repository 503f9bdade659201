//! Dock Discovery and Reporting
//!
//! A long-lived worker keeps this node's docks and pools registered in the
//! store. Each cycle runs the discoverer's discover step, then its report
//! step, then sleeps for the discovery interval:
//!
//! ```text
//! Idle -> Discovering -> Reporting -> Idle -> ... -> Stopped
//! ```
//!
//! Failures in either step are forwarded on an error channel and the loop
//! carries on with the next cycle. Cancellation is observed at the top of a
//! cycle; a cancellation during the sleep cuts the sleep short.

pub mod attacher;
pub mod provisioner;
pub mod register;

pub use attacher::AttacherDiscoverer;
pub use provisioner::ProvisionerDiscoverer;
pub use register::DockRegister;

use crate::client::StoreClient;
use crate::config::InventoryConfig;
use crate::domain::ports::DockDiscoverer;
use crate::error::{Error, Result};
use crate::model::DockType;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Default delay between two discovery cycles
pub const DEFAULT_DISCOVERY_INTERVAL: Duration = Duration::from_secs(60);

/// Status recorded on docks registered by this node
pub const AVAILABLE_STATUS: &str = "available";

/// Dock metadata key naming the host based replication driver
pub const HOST_REPLICATION_DRIVER_KEY: &str = "HostReplicationDriver";

// =============================================================================
// Loop State
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Discovering,
    Reporting,
    Stopped,
}

impl std::fmt::Display for LoopState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoopState::Idle => write!(f, "idle"),
            LoopState::Discovering => write!(f, "discovering"),
            LoopState::Reporting => write!(f, "reporting"),
            LoopState::Stopped => write!(f, "stopped"),
        }
    }
}

// =============================================================================
// Discovery Loop
// =============================================================================

pub struct DiscoveryLoop {
    interval: Duration,
    state: watch::Sender<LoopState>,
}

impl Default for DiscoveryLoop {
    fn default() -> Self {
        Self::new(DEFAULT_DISCOVERY_INTERVAL)
    }
}

impl DiscoveryLoop {
    pub fn new(interval: Duration) -> Self {
        let (state, _) = watch::channel(LoopState::Idle);
        Self { interval, state }
    }

    /// Watch the loop's state transitions
    pub fn subscribe(&self) -> watch::Receiver<LoopState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> LoopState {
        *self.state.borrow()
    }

    fn transition(&self, next: LoopState) {
        let prev = self.state.send_replace(next);
        debug!("Discovery loop {} -> {}", prev, next);
    }

    /// Drive `discoverer` until `cancel` fires
    pub async fn run(
        &self,
        discoverer: &mut dyn DockDiscoverer,
        cancel: CancellationToken,
        errors: mpsc::Sender<Error>,
    ) {
        info!("Starting discovery loop, interval {:?}", self.interval);

        loop {
            if cancel.is_cancelled() {
                self.transition(LoopState::Stopped);
                info!("Discovery loop stopped");
                return;
            }

            self.transition(LoopState::Discovering);
            if let Err(e) = discoverer.discover().await {
                forward(&errors, e).await;
            }

            self.transition(LoopState::Reporting);
            if let Err(e) = discoverer.report().await {
                forward(&errors, e).await;
            }

            self.transition(LoopState::Idle);
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
    }

    /// Run the loop on its own task, taking ownership of the discoverer
    pub fn spawn(
        self,
        mut discoverer: Box<dyn DockDiscoverer>,
        cancel: CancellationToken,
        errors: mpsc::Sender<Error>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(discoverer.as_mut(), cancel, errors).await })
    }
}

async fn forward(errors: &mpsc::Sender<Error>, err: Error) {
    if let Err(mpsc::error::SendError(err)) = errors.send(err).await {
        warn!("Discovery error dropped, no receiver: {}", err);
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Build the discoverer for the configured dock type
pub fn new_dock_discoverer(config: &InventoryConfig, client: StoreClient) -> Box<dyn DockDiscoverer> {
    let register = DockRegister::new(client);
    match config.dock.dock_type {
        DockType::Provisioner => Box::new(ProvisionerDiscoverer::new(register, config)),
        DockType::Attacher => Box::new(AttacherDiscoverer::new(register, config)),
    }
}

/// Stable dock identity for `host` and `suffix`
pub fn dock_id(host: &str, suffix: &str) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, format!("{}:{}", host, suffix).as_bytes()).to_string()
}

/// Name of this node: the configured override, else the system hostname
pub async fn resolve_hostname(node_id: Option<&str>) -> Result<String> {
    if let Some(id) = node_id.filter(|id| !id.is_empty()) {
        return Ok(id.to_string());
    }

    // Try /etc/hostname first
    if let Ok(hostname) = tokio::fs::read_to_string("/etc/hostname").await {
        let hostname = hostname.trim();
        if !hostname.is_empty() {
            return Ok(hostname.to_string());
        }
    }

    // Fall back to hostname command
    let output = tokio::process::Command::new("hostname").output().await?;
    let hostname = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if !output.status.success() || hostname.is_empty() {
        return Err(Error::Internal("Unable to determine hostname".into()));
    }
    Ok(hostname)
}
