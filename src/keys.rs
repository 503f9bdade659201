//! Key-Path Builder
//!
//! Maps a (resource kind, tenant, id segments) triple onto a store key.
//! Backend keys put the tenant after the resource kind so that a range scan
//! over one kind stays contiguous; client-facing paths put the tenant first.

use serde::{Deserialize, Serialize};

/// API version prefix for every key
pub const API_VERSION: &str = "v1beta";

/// Resource kinds stored in the inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Docks,
    Pools,
    Profiles,
}

impl ResourceKind {
    /// Plural path segment for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Docks => "docks",
            ResourceKind::Pools => "pools",
            ResourceKind::Profiles => "profiles",
        }
    }

    /// Singular, human readable name used in errors and logs
    pub fn singular(&self) -> &'static str {
        match self {
            ResourceKind::Docks => "Dock",
            ResourceKind::Pools => "Pool",
            ResourceKind::Profiles => "Profile",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who the path is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMode {
    /// Key inside the key-value backend (`version/kind/tenant/...`)
    Backend,
    /// Path exposed to API clients (`version/tenant/kind/...`)
    Client,
}

/// Build a path for `kind`.
///
/// An empty `tenant_id` is omitted entirely. Segments are joined verbatim;
/// callers must escape anything that is not already a safe path component.
pub fn build_path(kind: ResourceKind, mode: AddressMode, tenant_id: &str, segments: &[&str]) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(3 + segments.len());
    parts.push(API_VERSION);

    if tenant_id.is_empty() {
        parts.push(kind.as_str());
    } else {
        match mode {
            AddressMode::Backend => {
                parts.push(kind.as_str());
                parts.push(tenant_id);
            }
            AddressMode::Client => {
                parts.push(tenant_id);
                parts.push(kind.as_str());
            }
        }
    }

    parts.extend_from_slice(segments);
    parts.join("/")
}

/// Backend key for a dock
pub fn dock_key(tenant_id: &str, segments: &[&str]) -> String {
    build_path(ResourceKind::Docks, AddressMode::Backend, tenant_id, segments)
}

/// Backend key for a pool
pub fn pool_key(tenant_id: &str, segments: &[&str]) -> String {
    build_path(ResourceKind::Pools, AddressMode::Backend, tenant_id, segments)
}

/// Backend key for a profile
pub fn profile_key(tenant_id: &str, segments: &[&str]) -> String {
    build_path(ResourceKind::Profiles, AddressMode::Backend, tenant_id, segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_without_tenant() {
        assert_eq!(
            build_path(ResourceKind::Docks, AddressMode::Backend, "", &["d1"]),
            "v1beta/docks/d1"
        );
        // Mode makes no difference when the tenant is absent
        assert_eq!(
            build_path(ResourceKind::Docks, AddressMode::Client, "", &["d1"]),
            "v1beta/docks/d1"
        );
        assert_eq!(build_path(ResourceKind::Pools, AddressMode::Backend, "", &[]), "v1beta/pools");
    }

    #[test]
    fn test_tenant_placement_differs_by_mode() {
        assert_eq!(
            build_path(ResourceKind::Profiles, AddressMode::Backend, "t1", &["p1"]),
            "v1beta/profiles/t1/p1"
        );
        assert_eq!(
            build_path(ResourceKind::Profiles, AddressMode::Client, "t1", &["p1"]),
            "v1beta/t1/profiles/p1"
        );
    }

    #[test]
    fn test_segments_are_not_escaped() {
        assert_eq!(pool_key("", &["a/b", "c"]), "v1beta/pools/a/b/c");
        assert_eq!(dock_key("", &[]), "v1beta/docks");
        assert_eq!(profile_key("", &["x"]), "v1beta/profiles/x");
    }
}
