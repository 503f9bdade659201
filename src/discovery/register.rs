//! Dock Register
//!
//! Writes discovered docks and pools into the store on behalf of the local
//! dock service. Registration goes through the create path, so a resource
//! that is already stored is overwritten.

use crate::client::StoreClient;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::model::Resource;
use tracing::{debug, error};

#[derive(Clone)]
pub struct DockRegister {
    client: StoreClient,
}

impl DockRegister {
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }

    /// Upsert a dock or pool
    pub async fn register(&self, resource: Resource) -> Result<()> {
        let ctx = Context::admin();
        let kind = resource.kind();
        let id = resource.id().to_string();

        let res = match resource {
            Resource::Dock(dock) => self.client.create_dock(&ctx, dock).await.map(drop),
            Resource::Pool(pool) => self.client.create_pool(&ctx, pool).await.map(drop),
            Resource::Profile(_) => return Err(unsupported(kind.singular())),
        };

        match res {
            Ok(()) => {
                debug!("Registered {} {}", kind.singular(), id);
                Ok(())
            }
            Err(e) => {
                error!("When create {} {} in db: {}", kind.singular(), id, e);
                Err(e)
            }
        }
    }

    /// Remove a dock or pool
    pub async fn unregister(&self, resource: &Resource) -> Result<()> {
        let ctx = Context::admin();

        let res = match resource {
            Resource::Dock(dock) => self.client.delete_dock(&ctx, &dock.base.id).await,
            Resource::Pool(pool) => self.client.delete_pool(&ctx, &pool.base.id).await,
            Resource::Profile(_) => return Err(unsupported(resource.kind().singular())),
        };

        res.map_err(|e| {
            error!(
                "When delete {} {} in db: {}",
                resource.kind().singular(),
                resource.id(),
                e
            );
            e
        })
    }
}

fn unsupported(kind: &str) -> Error {
    Error::UnsupportedType(format!("{} cannot be registered by a dock", kind))
}
