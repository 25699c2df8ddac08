//! [`CatalogStore`] implementation over the marketplace API

use async_trait::async_trait;
use shared::models::{ModelDraft, NewModel, TierVariation, VariationSnapshot};
use shared::{CatalogStore, StoreResult};

use crate::ShopClient;
use crate::error::ClientError;

#[async_trait]
impl CatalogStore for ShopClient {
    async fn fetch_snapshot(&self, item_id: i64) -> StoreResult<VariationSnapshot> {
        Ok(self.get_model_list(item_id).await?)
    }

    async fn replace_tier_structure(
        &self,
        item_id: i64,
        tiers: &[TierVariation],
        models: &[ModelDraft],
    ) -> StoreResult<()> {
        Ok(self.update_tier_variation(item_id, tiers, models).await?)
    }

    async fn create_model(&self, item_id: i64, model: &NewModel) -> StoreResult<i64> {
        self.add_model(item_id, model)
            .await
            .map_err(ClientError::into_create_error)
    }
}
