//! Profiles
//!
//! A named bundle of provisioning policy plus free-form custom properties.

use super::{BaseModel, HasIdentity, HasName, StorageType, Stored};
use crate::keys::ResourceKind;
use crate::query::{Field, FieldValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Custom property key to arbitrary JSON value
pub type CustomProperties = BTreeMap<String, serde_json::Value>;

/// Provisioning profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    #[serde(flatten)]
    pub base: BaseModel,
    pub name: String,
    pub description: String,
    pub storage_type: StorageType,
    pub custom_properties: CustomProperties,
}

impl HasIdentity for Profile {
    fn base(&self) -> &BaseModel {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        &mut self.base
    }
}

impl HasName for Profile {
    fn name(&self) -> &str {
        &self.name
    }
}

static PROFILE_FIELDS: &[Field<Profile>] = &[
    Field { name: "ID", sortable: true, get: |p| FieldValue::Text(p.base.id.clone()) },
    Field { name: "NAME", sortable: true, get: |p| FieldValue::Text(p.name.clone()) },
    Field { name: "DESCRIPTION", sortable: true, get: |p| FieldValue::Text(p.description.clone()) },
    Field { name: "STORAGETYPE", sortable: false, get: |p| FieldValue::Text(p.storage_type.to_string()) },
];

impl Stored for Profile {
    const KIND: ResourceKind = ResourceKind::Profiles;

    fn fields() -> &'static [Field<Self>] {
        PROFILE_FIELDS
    }
}
