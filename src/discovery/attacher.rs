//! Attacher dock discovery
//!
//! An attacher node exposes a single dock that attaches volumes to the host.

use super::register::DockRegister;
use super::{dock_id, resolve_hostname, AVAILABLE_STATUS};
use crate::config::InventoryConfig;
use crate::domain::ports::DockDiscoverer;
use crate::error::Result;
use crate::model::{BaseModel, Dock, DockType, HasTimestamps};
use async_trait::async_trait;
use tracing::{debug, info};

pub struct AttacherDiscoverer {
    register: DockRegister,
    node_id: Option<String>,
    endpoint: String,
    dock: Option<Dock>,
}

impl AttacherDiscoverer {
    pub fn new(register: DockRegister, config: &InventoryConfig) -> Self {
        Self {
            register,
            node_id: config.dock.node_id.clone(),
            endpoint: config.dock.api_endpoint.clone(),
            dock: None,
        }
    }

    pub fn dock(&self) -> Option<&Dock> {
        self.dock.as_ref()
    }
}

#[async_trait]
impl DockDiscoverer for AttacherDiscoverer {
    async fn init(&mut self) -> Result<()> {
        let host = resolve_hostname(self.node_id.as_deref()).await?;

        let mut dock = Dock {
            base: BaseModel::with_id(dock_id(&host, "attacher")),
            name: host.clone(),
            status: AVAILABLE_STATUS.to_string(),
            endpoint: self.endpoint.clone(),
            node_id: host.clone(),
            dock_type: DockType::Attacher,
            ..Default::default()
        };
        dock.ensure_created_at();
        self.dock = Some(dock);

        info!("Initialized attacher dock on {}", host);
        Ok(())
    }

    async fn discover(&mut self) -> Result<()> {
        Ok(())
    }

    async fn report(&self) -> Result<()> {
        match &self.dock {
            Some(dock) => self.register.register(dock.clone().into()).await,
            None => {
                debug!("Attacher dock not initialized, nothing to report");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::MemoryBackend;
    use crate::client::StoreClient;
    use crate::context::Context;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_attacher_registers_one_dock() {
        let client = StoreClient::new(Arc::new(MemoryBackend::new()));
        let config = InventoryConfig::from_yaml_str("dock:\n  node_id: h1\n  dock_type: attacher\n").unwrap();
        let mut d = AttacherDiscoverer::new(DockRegister::new(client.clone()), &config);

        // Nothing to report before init
        d.report().await.unwrap();
        assert!(client.list_docks(&Context::admin()).await.unwrap().is_empty());

        d.init().await.unwrap();
        d.discover().await.unwrap();
        d.report().await.unwrap();

        let docks = client.list_docks(&Context::admin()).await.unwrap();
        assert_eq!(docks.len(), 1);
        assert_eq!(docks[0].base.id, dock_id("h1", "attacher"));
        assert_eq!(docks[0].dock_type, DockType::Attacher);
        assert_eq!(docks[0].node_id, "h1");
        assert_eq!(d.dock(), Some(&docks[0]));
    }
}
