//! Provisioner dock discovery
//!
//! A provisioner node runs one dock per enabled storage backend. Dock
//! identities are derived from the host name and the backend's driver, so a
//! restarted node re-registers the same docks instead of adding new ones.

use super::register::DockRegister;
use super::{dock_id, resolve_hostname, AVAILABLE_STATUS, HOST_REPLICATION_DRIVER_KEY};
use crate::config::{BackendProperties, InventoryConfig};
use crate::domain::ports::DockDiscoverer;
use crate::error::Result;
use crate::model::{BaseModel, Dock, DockType, HasIdentity, HasTimestamps, StoragePool};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tracing::info;

pub struct ProvisionerDiscoverer {
    register: DockRegister,
    node_id: Option<String>,
    endpoint: String,
    replication_driver: String,
    backends: Vec<BackendProperties>,
    docks: Vec<Dock>,
    pools: Vec<StoragePool>,
}

impl ProvisionerDiscoverer {
    pub fn new(register: DockRegister, config: &InventoryConfig) -> Self {
        Self {
            register,
            node_id: config.dock.node_id.clone(),
            endpoint: config.dock.api_endpoint.clone(),
            replication_driver: config.dock.host_based_replication_driver.clone(),
            backends: config.active_backends().into_iter().cloned().collect(),
            docks: Vec::new(),
            pools: Vec::new(),
        }
    }

    /// Pools reported after the docks on every cycle
    ///
    /// Pools are stamped here so every cycle writes the same key.
    pub fn with_pools(mut self, mut pools: Vec<StoragePool>) -> Self {
        for pool in &mut pools {
            pool.ensure_id();
            pool.ensure_created_at();
        }
        self.pools = pools;
        self
    }

    pub fn docks(&self) -> &[Dock] {
        &self.docks
    }

    fn build_dock(&self, host: &str, backend: &BackendProperties) -> Dock {
        let mut dock = Dock {
            base: BaseModel::with_id(dock_id(host, &backend.driver_name)),
            name: backend.name.clone(),
            description: backend.description.clone(),
            status: AVAILABLE_STATUS.to_string(),
            driver_name: backend.driver_name.clone(),
            endpoint: self.endpoint.clone(),
            node_id: host.to_string(),
            dock_type: DockType::Provisioner,
            metadata: BTreeMap::from([(
                HOST_REPLICATION_DRIVER_KEY.to_string(),
                self.replication_driver.clone(),
            )]),
        };
        dock.ensure_created_at();
        dock
    }
}

#[async_trait]
impl DockDiscoverer for ProvisionerDiscoverer {
    async fn init(&mut self) -> Result<()> {
        let host = resolve_hostname(self.node_id.as_deref()).await?;

        let docks: Vec<Dock> = self
            .backends
            .iter()
            .map(|backend| self.build_dock(&host, backend))
            .collect();
        self.docks = docks;

        info!("Initialized {} provisioner docks on {}", self.docks.len(), host);
        Ok(())
    }

    async fn discover(&mut self) -> Result<()> {
        Ok(())
    }

    /// Register every dock, then every pool; the first failure ends the pass
    async fn report(&self) -> Result<()> {
        for dock in &self.docks {
            self.register.register(dock.clone().into()).await?;
        }
        for pool in &self.pools {
            self.register.register(pool.clone().into()).await?;
        }
        Ok(())
    }
}
