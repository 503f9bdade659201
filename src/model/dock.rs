//! Docks
//!
//! A dock is a storage service endpoint running on a node, either
//! provisioning volumes from a driver or attaching them to the host.

use super::{BaseModel, HasIdentity, HasName, Stored};
use crate::keys::ResourceKind;
use crate::query::{Field, FieldValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Role a dock plays on its node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DockType {
    #[default]
    Provisioner,
    Attacher,
}

impl std::fmt::Display for DockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DockType::Provisioner => write!(f, "provisioner"),
            DockType::Attacher => write!(f, "attacher"),
        }
    }
}

impl std::str::FromStr for DockType {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "provisioner" => Ok(DockType::Provisioner),
            "attacher" => Ok(DockType::Attacher),
            other => Err(crate::error::Error::Configuration(format!(
                "Invalid dock type: {}. Use 'provisioner' or 'attacher'",
                other
            ))),
        }
    }
}

/// A registered storage service endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dock {
    #[serde(flatten)]
    pub base: BaseModel,
    pub name: String,
    pub description: String,
    pub status: String,
    pub driver_name: String,
    pub endpoint: String,
    pub node_id: String,
    #[serde(rename = "type")]
    pub dock_type: DockType,
    pub metadata: BTreeMap<String, String>,
}

impl HasIdentity for Dock {
    fn base(&self) -> &BaseModel {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        &mut self.base
    }
}

impl HasName for Dock {
    fn name(&self) -> &str {
        &self.name
    }
}

static DOCK_FIELDS: &[Field<Dock>] = &[
    Field { name: "ID", sortable: true, get: |d| FieldValue::Text(d.base.id.clone()) },
    Field { name: "NAME", sortable: true, get: |d| FieldValue::Text(d.name.clone()) },
    Field { name: "STATUS", sortable: true, get: |d| FieldValue::Text(d.status.clone()) },
    Field { name: "ENDPOINT", sortable: true, get: |d| FieldValue::Text(d.endpoint.clone()) },
    Field { name: "DRIVERNAME", sortable: true, get: |d| FieldValue::Text(d.driver_name.clone()) },
    Field { name: "DESCRIPTION", sortable: true, get: |d| FieldValue::Text(d.description.clone()) },
    Field { name: "NODEID", sortable: false, get: |d| FieldValue::Text(d.node_id.clone()) },
    Field { name: "TYPE", sortable: false, get: |d| FieldValue::Text(d.dock_type.to_string()) },
];

impl Stored for Dock {
    const KIND: ResourceKind = ResourceKind::Docks;

    fn fields() -> &'static [Field<Self>] {
        DOCK_FIELDS
    }
}
