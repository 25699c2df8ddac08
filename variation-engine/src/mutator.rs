//! Structural writes
//!
//! Every change to an item's tier structure is a single bulk replace of the
//! full tier list and model set. There is no per-option delete or insert.

use shared::CatalogStore;
use shared::models::{ModelDraft, TierVariation, VariationOption, VariationSnapshot};

use crate::error::{VariationError, VariationResult};
use crate::remapper::RemapPlan;

pub struct StructuralMutator<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: CatalogStore + ?Sized> StructuralMutator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Write a deletion plan in one call
    pub async fn replace(&self, item_id: i64, plan: &RemapPlan) -> VariationResult<()> {
        self.store
            .replace_tier_structure(item_id, &plan.tier_variation, &plan.models)
            .await?;
        Ok(())
    }

    /// Append `label` to the end of `tier`; returns its new option index
    ///
    /// Existing options keep their positions, so every current model is
    /// resubmitted with its tier index unchanged.
    pub async fn append_option(
        &self,
        snapshot: &VariationSnapshot,
        tier: usize,
        label: &str,
    ) -> VariationResult<u32> {
        let mut tiers: Vec<TierVariation> = snapshot.tier_variation.clone();
        let tier_count = tiers.len();
        let target = tiers
            .get_mut(tier)
            .ok_or(VariationError::TierOutOfRange { tier, tier_count })?;

        let index = target.option_count() as u32;
        target.option_list.push(VariationOption::new(label));

        let models: Vec<ModelDraft> = snapshot.model.iter().map(ModelDraft::from).collect();

        tracing::info!(
            item_id = snapshot.item_id,
            tier = tier,
            option_index = index,
            label = %label,
            "Appending variation option"
        );

        self.store
            .replace_tier_structure(snapshot.item_id, &tiers, &models)
            .await?;
        Ok(index)
    }
}
