//! Dock operations

use super::{non_empty, DockUpdate, StoreClient};
use crate::context::Context;
use crate::error::{Error, Result};
use crate::model::{Dock, StoragePool};
use crate::query::QueryParams;

impl StoreClient {
    pub async fn create_dock(&self, ctx: &Context, dock: Dock) -> Result<Dock> {
        self.create_record(ctx, dock).await
    }

    pub async fn get_dock(&self, ctx: &Context, id: &str) -> Result<Dock> {
        self.get_record(ctx, id).await
    }

    pub async fn list_docks(&self, ctx: &Context) -> Result<Vec<Dock>> {
        self.list_records(ctx).await
    }

    pub async fn list_docks_with_filter(
        &self,
        ctx: &Context,
        params: &QueryParams,
    ) -> Result<Vec<Dock>> {
        self.list_records_with_filter(ctx, params).await
    }

    pub async fn update_dock(&self, ctx: &Context, id: &str, update: &DockUpdate) -> Result<Dock> {
        self.update_record(ctx, id, |dock: &mut Dock| {
            if let Some(name) = non_empty(&update.name) {
                dock.name = name.to_string();
            }
            if let Some(description) = non_empty(&update.description) {
                dock.description = description.to_string();
            }
        })
        .await
    }

    pub async fn delete_dock(&self, ctx: &Context, id: &str) -> Result<()> {
        self.delete_record::<Dock>(ctx, id).await
    }

    /// Dock that owns the pool `pool_id`
    pub async fn get_dock_by_pool_id(&self, ctx: &Context, pool_id: &str) -> Result<Dock> {
        let pool: StoragePool = self.get_record(ctx, pool_id).await?;
        self.list_docks(ctx)
            .await?
            .into_iter()
            .find(|dock| dock.base.id == pool.dock_id)
            .ok_or_else(|| Error::ResourceNotFound {
                kind: "Dock".to_string(),
                name: format!("owner of pool {}", pool_id),
            })
    }
}
