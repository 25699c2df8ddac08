//! Variation engine
//!
//! Entry point for the two structural edits sellers make on an item:
//! removing sold-out options and adding a model for a (possibly new)
//! option label. All reads and writes go through a [`CatalogStore`].

use shared::CatalogStore;
use shared::models::{
    DeletableOption, DeletionReport, ModelAttributes, OptionRef, TierVariation,
};

use crate::analyzer;
use crate::config::EngineConfig;
use crate::error::{VariationError, VariationResult};
use crate::mutator::StructuralMutator;
use crate::orchestrator::{CreatedModel, ModelCreation, ModelRequest};
use crate::remapper::{remap, validate_selection};

/// Result of a successful option deletion
#[derive(Debug, Clone, PartialEq)]
pub struct DeletionOutcome {
    pub deleted_options: usize,
    pub kept_models: usize,
    pub dropped_models: usize,
    /// Tier structure as written
    pub tier_variation: Vec<TierVariation>,
}

pub struct VariationEngine<S> {
    store: S,
    config: EngineConfig,
}

impl<S: CatalogStore> VariationEngine<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, EngineConfig::default())
    }

    pub fn with_config(store: S, config: EngineConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Options whose every model is sold out (read-only)
    pub async fn list_deletable_options(&self, item_id: i64) -> VariationResult<Vec<DeletableOption>> {
        let snapshot = self.store.fetch_snapshot(item_id).await?;
        Ok(analyzer::deletable_options(&snapshot))
    }

    /// Deletable options with model counts and a version token (read-only)
    pub async fn deletion_report(&self, item_id: i64) -> VariationResult<DeletionReport> {
        let snapshot = self.store.fetch_snapshot(item_id).await?;
        Ok(analyzer::deletion_report(&snapshot))
    }

    /// Remove the selected options and every model that uses one
    ///
    /// The snapshot is re-read before writing. When `expected_version` is
    /// given it must equal that snapshot's fingerprint. Nothing is written
    /// on any validation failure.
    pub async fn delete_options(
        &self,
        item_id: i64,
        selection: &[OptionRef],
        expected_version: Option<&str>,
    ) -> VariationResult<DeletionOutcome> {
        if selection.is_empty() {
            return Err(VariationError::EmptySelection);
        }

        let snapshot = self.store.fetch_snapshot(item_id).await?;

        if let Some(expected) = expected_version {
            let actual = snapshot.fingerprint();
            if actual != expected {
                tracing::warn!(
                    item_id = item_id,
                    expected = %expected,
                    actual = %actual,
                    "Variation snapshot changed since it was read"
                );
                return Err(VariationError::StaleSnapshot {
                    expected: expected.to_string(),
                    actual,
                });
            }
        }

        let doomed = validate_selection(&snapshot, selection)?;

        let stocked = doomed
            .iter()
            .filter(|r| {
                snapshot
                    .models_at(r.tier_index as usize, r.option_index)
                    .any(|m| !m.is_out_of_stock())
            })
            .count();
        if stocked > 0 {
            tracing::warn!(
                item_id = item_id,
                options = stocked,
                "Deleting options that still have stocked models"
            );
        }

        let plan = remap(&snapshot.tier_variation, &snapshot.model, &doomed)?;
        StructuralMutator::new(&self.store).replace(item_id, &plan).await?;

        let outcome = DeletionOutcome {
            deleted_options: plan.removed_option_count(&snapshot.tier_variation),
            kept_models: plan.models.len(),
            dropped_models: plan.dropped.len(),
            tier_variation: plan.tier_variation,
        };

        tracing::info!(
            item_id = item_id,
            deleted_options = outcome.deleted_options,
            kept_models = outcome.kept_models,
            dropped_models = outcome.dropped_models,
            "Variation options deleted"
        );

        Ok(outcome)
    }

    /// Create a model for `label` in the default tier
    pub async fn ensure_model(
        &self,
        item_id: i64,
        label: &str,
        attributes: ModelAttributes,
    ) -> VariationResult<CreatedModel> {
        self.ensure_model_with(item_id, &ModelRequest::new(label, attributes))
            .await
    }

    /// Create a model at an explicit tier and coordinates
    pub async fn ensure_model_with(
        &self,
        item_id: i64,
        request: &ModelRequest,
    ) -> VariationResult<CreatedModel> {
        ModelCreation::new(&self.store, &self.config)
            .ensure(item_id, request)
            .await
    }
}
