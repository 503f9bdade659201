//! Inventory Configuration
//!
//! Loaded from a YAML file. Every section has defaults, so an empty file is
//! a valid in-memory configuration with no enabled backends.
//!
//! ```yaml
//! database:
//!   driver: local
//!   path: /var/lib/dock-inventory
//! dock:
//!   api_endpoint: 0.0.0.0:50050
//!   dock_type: provisioner
//!   discovery_interval_secs: 60
//! enabled_backends: [lvm]
//! backends:
//!   lvm:
//!     name: lvm
//!     description: LVM backend
//!     driver_name: lvm
//! ```

use crate::error::{Error, Result};
use crate::model::DockType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

// =============================================================================
// Database
// =============================================================================

/// Key-value backend drivers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseDriver {
    #[default]
    Memory,
    Local,
}

impl std::fmt::Display for DatabaseDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseDriver::Memory => write!(f, "memory"),
            DatabaseDriver::Local => write!(f, "local"),
        }
    }
}

impl std::str::FromStr for DatabaseDriver {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(DatabaseDriver::Memory),
            "local" => Ok(DatabaseDriver::Local),
            other => Err(Error::Configuration(format!(
                "Can't find database driver {}",
                other
            ))),
        }
    }
}

/// Configuration for the key-value backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub driver: DatabaseDriver,
    /// Root directory for the local driver
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            driver: DatabaseDriver::Memory,
            path: PathBuf::from("/var/lib/dock-inventory"),
        }
    }
}

// =============================================================================
// Dock
// =============================================================================

/// Configuration for the local dock service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockConfig {
    /// Endpoint advertised by every dock on this node
    pub api_endpoint: String,
    pub dock_type: DockType,
    /// Driver recorded in dock metadata for host based replication
    pub host_based_replication_driver: String,
    /// Overrides the detected hostname
    pub node_id: Option<String>,
    pub discovery_interval_secs: u64,
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            api_endpoint: "localhost:50050".to_string(),
            dock_type: DockType::Provisioner,
            host_based_replication_driver: "DRBD".to_string(),
            node_id: None,
            discovery_interval_secs: 60,
        }
    }
}

/// A configured storage backend served by a provisioner dock
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendProperties {
    pub name: String,
    pub description: String,
    pub driver_name: String,
}

// =============================================================================
// Top-level Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    pub database: DatabaseConfig,
    pub dock: DockConfig,
    /// Keys into `backends`, in reporting order
    pub enabled_backends: Vec<String>,
    pub backends: BTreeMap<String, BackendProperties>,
}

impl InventoryConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: Self = if text.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(text)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.dock.discovery_interval_secs == 0 {
            return Err(Error::Configuration(
                "dock.discovery_interval_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    pub fn discovery_interval(&self) -> Duration {
        Duration::from_secs(self.dock.discovery_interval_secs)
    }

    /// Enabled backends that are defined with a non-empty name
    pub fn active_backends(&self) -> Vec<&BackendProperties> {
        self.enabled_backends
            .iter()
            .filter_map(|key| match self.backends.get(key) {
                Some(b) if !b.name.is_empty() => Some(b),
                _ => {
                    warn!("Enabled backend {} has no configured name, skipping", key);
                    None
                }
            })
            .collect()
    }
}
