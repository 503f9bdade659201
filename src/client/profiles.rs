//! Profile operations
//!
//! Profile names are unique across the inventory. Uniqueness is checked with a
//! full scan before each create, so two concurrent creates of the same name
//! can both succeed.

use super::StoreClient;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::model::{CustomProperties, HasIdentity, HasTimestamps, Profile, StorageType};
use crate::query::QueryParams;
use tracing::error;

/// Name of the profile used for block volumes when none is requested
pub const DEFAULT_BLOCK_PROFILE_NAME: &str = "default_block";

/// Name of the profile used for file shares when none is requested
pub const DEFAULT_FILE_PROFILE_NAME: &str = "default_file";

impl StoreClient {
    pub async fn create_profile(&self, ctx: &Context, mut profile: Profile) -> Result<Profile> {
        profile.ensure_id();
        profile.ensure_created_at();
        self.ensure_unique_profile_name(ctx, &profile.name, None).await?;
        self.write_created(ctx, &profile).await?;
        Ok(profile)
    }

    pub async fn get_profile(&self, ctx: &Context, id: &str) -> Result<Profile> {
        self.get_record(ctx, id).await
    }

    pub async fn list_profiles(&self, ctx: &Context) -> Result<Vec<Profile>> {
        self.list_records(ctx).await
    }

    pub async fn list_profiles_with_filter(
        &self,
        ctx: &Context,
        params: &QueryParams,
    ) -> Result<Vec<Profile>> {
        self.list_records_with_filter(ctx, params).await
    }

    /// Apply non-empty name and description, merge custom properties
    pub async fn update_profile(&self, ctx: &Context, id: &str, input: &Profile) -> Result<Profile> {
        self.update_record(ctx, id, |profile: &mut Profile| {
            if !input.name.is_empty() {
                profile.name = input.name.clone();
            }
            if !input.description.is_empty() {
                profile.description = input.description.clone();
            }
            for (key, value) in &input.custom_properties {
                profile.custom_properties.insert(key.clone(), value.clone());
            }
        })
        .await
    }

    pub async fn delete_profile(&self, ctx: &Context, id: &str) -> Result<()> {
        self.delete_record::<Profile>(ctx, id).await
    }

    /// Profile applied to block volumes when the caller names none
    pub async fn get_default_profile(&self, ctx: &Context) -> Result<Profile> {
        self.profile_by_name_and_type(ctx, DEFAULT_BLOCK_PROFILE_NAME, StorageType::Block)
            .await
    }

    /// Profile applied to file shares when the caller names none
    pub async fn get_default_profile_file_share(&self, ctx: &Context) -> Result<Profile> {
        self.profile_by_name_and_type(ctx, DEFAULT_FILE_PROFILE_NAME, StorageType::File)
            .await
    }

    pub async fn list_custom_properties(&self, ctx: &Context, id: &str) -> Result<CustomProperties> {
        Ok(self.get_profile(ctx, id).await?.custom_properties)
    }

    /// Merge `properties` into the profile and persist it
    pub async fn add_custom_property(
        &self,
        ctx: &Context,
        id: &str,
        properties: CustomProperties,
    ) -> Result<CustomProperties> {
        let mut profile = self.get_profile(ctx, id).await?;
        profile.custom_properties.extend(properties);
        profile.touch();

        self.rewrite_profile(ctx, &profile).await?;
        Ok(profile.custom_properties)
    }

    /// Drop `key` from the profile's custom properties and persist it
    pub async fn remove_custom_property(&self, ctx: &Context, id: &str, key: &str) -> Result<()> {
        let mut profile = self.get_profile(ctx, id).await?;
        profile.custom_properties.remove(key);
        profile.touch();

        self.rewrite_profile(ctx, &profile).await
    }

    /// Persist an existing profile through the create path
    ///
    /// The name check skips the profile itself, otherwise every rewrite would
    /// collide with the stored copy.
    async fn rewrite_profile(&self, ctx: &Context, profile: &Profile) -> Result<()> {
        self.ensure_unique_profile_name(ctx, &profile.name, Some(&profile.base.id))
            .await?;
        self.write_created(ctx, profile).await
    }

    async fn ensure_unique_profile_name(
        &self,
        ctx: &Context,
        name: &str,
        own_id: Option<&str>,
    ) -> Result<()> {
        let clash = self
            .list_profiles(ctx)
            .await?
            .into_iter()
            .any(|p| p.name == name && Some(p.base.id.as_str()) != own_id);

        if clash {
            error!("Profile name {} already exists", name);
            return Err(Error::ResourceExists {
                kind: "Profile".to_string(),
                name: name.to_string(),
            });
        }
        Ok(())
    }

    async fn profile_by_name_and_type(
        &self,
        ctx: &Context,
        name: &str,
        storage_type: StorageType,
    ) -> Result<Profile> {
        self.list_profiles(ctx)
            .await?
            .into_iter()
            .find(|p| p.name == name && p.storage_type == storage_type)
            .ok_or_else(|| Error::ResourceNotFound {
                kind: "Profile".to_string(),
                name: name.to_string(),
            })
    }
}
