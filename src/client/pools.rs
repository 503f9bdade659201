//! Storage pool operations

use super::{non_empty, PoolUpdate, StoreClient};
use crate::context::Context;
use crate::error::Result;
use crate::model::StoragePool;
use crate::query::QueryParams;

impl StoreClient {
    pub async fn create_pool(&self, ctx: &Context, pool: StoragePool) -> Result<StoragePool> {
        self.create_record(ctx, pool).await
    }

    pub async fn get_pool(&self, ctx: &Context, id: &str) -> Result<StoragePool> {
        self.get_record(ctx, id).await
    }

    pub async fn list_pools(&self, ctx: &Context) -> Result<Vec<StoragePool>> {
        self.list_records(ctx).await
    }

    pub async fn list_pools_with_filter(
        &self,
        ctx: &Context,
        params: &QueryParams,
    ) -> Result<Vec<StoragePool>> {
        self.list_records_with_filter(ctx, params).await
    }

    pub async fn update_pool(
        &self,
        ctx: &Context,
        id: &str,
        update: &PoolUpdate,
    ) -> Result<StoragePool> {
        self.update_record(ctx, id, |pool: &mut StoragePool| {
            if let Some(name) = non_empty(&update.name) {
                pool.name = name.to_string();
            }
            if let Some(description) = non_empty(&update.description) {
                pool.description = description.to_string();
            }
            if let Some(used_capacity) = update.used_capacity {
                pool.used_capacity = used_capacity;
            }
            if let Some(used) = update.used {
                pool.used = used;
            }
        })
        .await
    }

    pub async fn delete_pool(&self, ctx: &Context, id: &str) -> Result<()> {
        self.delete_record::<StoragePool>(ctx, id).await
    }

    /// Distinct availability zones across all pools, in first-seen order
    pub async fn list_availability_zones(&self, ctx: &Context) -> Result<Vec<String>> {
        let mut zones: Vec<String> = Vec::new();
        for pool in self.list_pools(ctx).await? {
            if !zones.contains(&pool.availability_zone) {
                zones.push(pool.availability_zone);
            }
        }
        Ok(zones)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::MemoryBackend;
    use crate::model::BaseModel;
    use std::sync::Arc;

    fn pool(id: &str, zone: &str, used: bool) -> StoragePool {
        StoragePool {
            base: BaseModel::with_id(id),
            name: format!("pool-{}", id),
            availability_zone: zone.to_string(),
            used,
            ..Default::default()
        }
    }

    async fn seeded() -> StoreClient {
        let client = StoreClient::new(Arc::new(MemoryBackend::new()));
        let ctx = Context::admin();
        for p in [pool("1", "az2", false), pool("2", "az1", true), pool("3", "az2", true)] {
            client.create_pool(&ctx, p).await.unwrap();
        }
        client
    }

    #[tokio::test]
    async fn test_availability_zones_are_distinct() {
        let client = seeded().await;
        let zones = client.list_availability_zones(&Context::admin()).await.unwrap();
        // Listed in key order: 1, 2, 3
        assert_eq!(zones, vec!["az2".to_string(), "az1".to_string()]);
    }

    #[tokio::test]
    async fn test_filter_by_bool_and_zone() {
        let client = seeded().await;
        let ctx = Context::admin();

        let params = QueryParams::new().with("used", "TRUE").with("availabilityZone", "AZ2");
        let page = client.list_pools_with_filter(&ctx, &params).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].base.id, "3");
    }

    #[tokio::test]
    async fn test_update_usage() {
        let client = seeded().await;
        let ctx = Context::admin();

        let update = PoolUpdate {
            used_capacity: Some(128),
            used: Some(true),
            ..Default::default()
        };
        let updated = client.update_pool(&ctx, "1", &update).await.unwrap();
        assert_eq!(updated.used_capacity, 128);
        assert!(updated.used);
        assert_eq!(updated.name, "pool-1");

        client.delete_pool(&ctx, "1").await.unwrap();
        assert_eq!(client.list_pools(&ctx).await.unwrap().len(), 2);
    }
}
