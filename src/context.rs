//! Caller Context
//!
//! Identity of whoever issued a store operation. Built by the request layer
//! (or by the discovery loop for its own writes) and passed down unchanged.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Context {
    pub is_admin: bool,
    pub tenant_id: String,
    pub user_id: String,
}

impl Context {
    /// Context used by internal workers
    pub fn admin() -> Self {
        Self {
            is_admin: true,
            ..Default::default()
        }
    }
}
