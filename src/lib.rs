//! Dock Inventory
//!
//! Inventory of storage docks, pools and profiles kept in a hierarchical
//! key-value store, plus the per-node worker that keeps this node's docks
//! registered.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Callers / API                          │
//! │        (caller Context + QueryParams, per-kind CRUD)          │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │
//! ┌──────────────────────────────┴───────────────────────────────┐
//! │                        StoreClient                            │
//! │   keys::build_path  ──  JSON documents  ──  query::apply      │
//! │                     (filter → sort → paginate)                │
//! └──────────────┬───────────────────────────────▲───────────────┘
//!                │                               │
//! ┌──────────────┴───────────┐   ┌───────────────┴───────────────┐
//! │      KvBackend port      │   │        Discovery loop          │
//! │  ┌────────┐  ┌────────┐  │   │  Idle → Discovering →          │
//! │  │ memory │  │ local  │  │   │  Reporting → Idle … Stopped    │
//! │  └────────┘  └────────┘  │   │  (provisioner | attacher)      │
//! └──────────────────────────┘   └───────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`client`]: typed CRUD over the key-value backend
//! - [`query`]: query parameter resolution and the filter-sort-paginate engine
//! - [`discovery`]: dock discovery and the reporting loop
//! - [`backends`]: key-value backend adapters
//! - [`model`]: docks, pools and profiles
//! - [`keys`]: key-path builder
//! - [`domain`]: ports between the inventory and external systems
//! - [`config`]: YAML configuration
//! - [`error`]: error types

pub mod backends;
pub mod client;
pub mod config;
pub mod context;
pub mod discovery;
pub mod domain;
pub mod error;
pub mod keys;
pub mod model;
pub mod query;

// Re-export commonly used types
pub use backends::{BackendFactory, LocalBackend, MemoryBackend};

pub use client::{DockUpdate, PoolUpdate, StoreClient};

pub use config::{BackendProperties, DatabaseConfig, DatabaseDriver, DockConfig, InventoryConfig};

pub use context::Context;

pub use discovery::{
    new_dock_discoverer, AttacherDiscoverer, DiscoveryLoop, DockRegister, LoopState,
    ProvisionerDiscoverer,
};

pub use domain::ports::{
    DockDiscoverer, KvBackend, KvBackendRef, StoreRequest, StoreResponse, StoreStatus,
};

pub use error::{Error, Result};

pub use keys::{build_path, AddressMode, ResourceKind, API_VERSION};

pub use model::{
    BaseModel, CustomProperties, Dock, DockType, Profile, Resource, StoragePool, StorageType,
};

pub use query::{QueryParams, ResolvedPageSpec, SortDir};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
