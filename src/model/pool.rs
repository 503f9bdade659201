//! Storage Pools
//!
//! A pool is a unit of allocatable capacity exposed by a dock.

use super::{BaseModel, HasIdentity, HasName, Stored};
use crate::keys::ResourceKind;
use crate::query::{Field, FieldValue};
use serde::{Deserialize, Serialize};

/// Capacity exposed by a dock
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoragePool {
    #[serde(flatten)]
    pub base: BaseModel,
    pub name: String,
    pub description: String,
    pub status: String,
    pub availability_zone: String,
    /// Identity of the owning dock
    pub dock_id: String,
    pub used_capacity: i64,
    pub used: bool,
}

impl HasIdentity for StoragePool {
    fn base(&self) -> &BaseModel {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        &mut self.base
    }
}

impl HasName for StoragePool {
    fn name(&self) -> &str {
        &self.name
    }
}

static POOL_FIELDS: &[Field<StoragePool>] = &[
    Field { name: "ID", sortable: true, get: |p| FieldValue::Text(p.base.id.clone()) },
    Field { name: "NAME", sortable: true, get: |p| FieldValue::Text(p.name.clone()) },
    Field { name: "STATUS", sortable: true, get: |p| FieldValue::Text(p.status.clone()) },
    Field {
        name: "AVAILABILITYZONE",
        sortable: true,
        get: |p| FieldValue::Text(p.availability_zone.clone()),
    },
    Field { name: "DOCKID", sortable: true, get: |p| FieldValue::Text(p.dock_id.clone()) },
    Field { name: "DESCRIPTION", sortable: false, get: |p| FieldValue::Text(p.description.clone()) },
    Field { name: "USEDCAPACITY", sortable: false, get: |p| FieldValue::Int(p.used_capacity) },
    Field { name: "USED", sortable: false, get: |p| FieldValue::Bool(p.used) },
];

impl Stored for StoragePool {
    const KIND: ResourceKind = ResourceKind::Pools;

    fn fields() -> &'static [Field<Self>] {
        POOL_FIELDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_json_layout() {
        let pool = StoragePool {
            base: BaseModel::with_id("p1"),
            name: "gold".into(),
            availability_zone: "az1".into(),
            dock_id: "d1".into(),
            used_capacity: 42,
            used: true,
            ..Default::default()
        };

        let value = serde_json::to_value(&pool).unwrap();
        assert_eq!(value["availabilityZone"], "az1");
        assert_eq!(value["dockId"], "d1");
        assert_eq!(value["usedCapacity"], 42);
        assert_eq!(value["used"], true);
    }
}
