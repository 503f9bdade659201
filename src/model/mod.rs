//! Inventory Data Model
//!
//! Docks, storage pools and profiles as they are stored in the key-value
//! backend. Every resource embeds a [`BaseModel`] carrying its identity and
//! timestamps; the capability traits below let the store client and the query
//! engine treat the three kinds uniformly.

pub mod dock;
pub mod pool;
pub mod profile;
pub mod resource;

pub use dock::{Dock, DockType};
pub use pool::StoragePool;
pub use profile::{CustomProperties, Profile};
pub use resource::Resource;

use crate::keys::ResourceKind;
use crate::query::Field;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Base Model
// =============================================================================

/// Identity and timestamps shared by every resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseModel {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl BaseModel {
    /// Base model with a fixed identity
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

// =============================================================================
// Storage Types
// =============================================================================

/// Storage types a profile can target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    #[default]
    Block,
    File,
    Object,
}

impl std::fmt::Display for StorageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageType::Block => write!(f, "block"),
            StorageType::File => write!(f, "file"),
            StorageType::Object => write!(f, "object"),
        }
    }
}

// =============================================================================
// Capabilities
// =============================================================================

/// Resources with a stable identity
pub trait HasIdentity {
    fn base(&self) -> &BaseModel;

    fn base_mut(&mut self) -> &mut BaseModel;

    fn id(&self) -> &str {
        &self.base().id
    }

    /// Assign a random identity if none is set
    fn ensure_id(&mut self) {
        let base = self.base_mut();
        if base.id.is_empty() {
            base.id = Uuid::new_v4().to_string();
        }
    }
}

/// Resources carrying creation and update timestamps
pub trait HasTimestamps: HasIdentity {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.base().created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.base().updated_at
    }

    /// Stamp the creation time if none is set
    fn ensure_created_at(&mut self) {
        let base = self.base_mut();
        if base.created_at.is_none() {
            base.created_at = Some(Utc::now());
        }
    }

    /// Stamp the update time
    fn touch(&mut self) {
        self.base_mut().updated_at = Some(Utc::now());
    }
}

impl<T: HasIdentity> HasTimestamps for T {}

/// Resources with a display name
pub trait HasName {
    fn name(&self) -> &str;
}

/// A resource kind that lives under its own key prefix in the backend
pub trait Stored:
    HasIdentity + HasName + Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Key prefix this kind is stored under
    const KIND: ResourceKind;

    /// Filterable and sortable fields, by upper-case name
    fn fields() -> &'static [Field<Self>];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_type_display() {
        assert_eq!(format!("{}", StorageType::Block), "block");
        assert_eq!(format!("{}", StorageType::File), "file");
        assert_eq!(format!("{}", StorageType::Object), "object");
    }

    #[test]
    fn test_ensure_identity_and_timestamps() {
        let mut dock = Dock::default();
        assert!(dock.id().is_empty());
        assert!(dock.created_at().is_none());

        dock.ensure_id();
        dock.ensure_created_at();
        let id = dock.id().to_string();
        let created = dock.created_at();
        assert!(!id.is_empty());
        assert!(created.is_some());

        // Existing values are kept
        dock.ensure_id();
        dock.ensure_created_at();
        assert_eq!(dock.id(), id);
        assert_eq!(dock.created_at(), created);

        assert!(dock.updated_at().is_none());
        dock.touch();
        assert!(dock.updated_at().is_some());
    }

    #[test]
    fn test_base_model_omits_missing_timestamps() {
        let json = serde_json::to_string(&BaseModel::with_id("abc")).unwrap();
        assert_eq!(json, r#"{"id":"abc"}"#);
    }
}
