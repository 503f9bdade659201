//! Closed set of inventory resources
//!
//! Registration takes a [`Resource`] rather than an untyped value, so the
//! registrar dispatches with a `match` instead of probing types at runtime.

use super::{Dock, HasIdentity, HasName, Profile, StoragePool};
use crate::error::Result;
use crate::keys::ResourceKind;

/// Any resource the inventory knows about
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    Dock(Dock),
    Pool(StoragePool),
    Profile(Profile),
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Dock(_) => ResourceKind::Docks,
            Resource::Pool(_) => ResourceKind::Pools,
            Resource::Profile(_) => ResourceKind::Profiles,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Resource::Dock(d) => d.id(),
            Resource::Pool(p) => p.id(),
            Resource::Profile(p) => p.id(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Resource::Dock(d) => d.name(),
            Resource::Pool(p) => p.name(),
            Resource::Profile(p) => p.name(),
        }
    }

    /// Serialize to the JSON document stored in the backend
    pub fn to_document(&self) -> Result<String> {
        let doc = match self {
            Resource::Dock(d) => serde_json::to_string(d)?,
            Resource::Pool(p) => serde_json::to_string(p)?,
            Resource::Profile(p) => serde_json::to_string(p)?,
        };
        Ok(doc)
    }
}

impl From<Dock> for Resource {
    fn from(dock: Dock) -> Self {
        Resource::Dock(dock)
    }
}

impl From<StoragePool> for Resource {
    fn from(pool: StoragePool) -> Self {
        Resource::Pool(pool)
    }
}

impl From<Profile> for Resource {
    fn from(profile: Profile) -> Self {
        Resource::Profile(profile)
    }
}
