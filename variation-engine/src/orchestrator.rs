//! Model creation
//!
//! Creating a model for a label that is not yet an option takes two store
//! calls: append the option, then create the model at the new index. The
//! marketplace applies the first call asynchronously, so the second may be
//! rejected with a tier-index error until the edit lands. That rejection is
//! retried on a fixed budget; anything else fails immediately.

use rust_decimal::Decimal;
use shared::models::{ModelAttributes, NewModel, VariationSnapshot};
use shared::{CatalogStore, StoreError};

use crate::config::EngineConfig;
use crate::error::{VariationError, VariationResult};
use crate::mutator::StructuralMutator;
use crate::resolver::{OptionResolution, resolve_option, with_option};

/// What to create and where
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    /// Option label in the target tier (matched case-insensitively)
    pub label: String,
    pub attributes: ModelAttributes,
    /// Target tier; falls back to the engine default
    pub tier: Option<usize>,
    /// One option index per tier for the other tiers; empty means all zero
    pub coordinates: Vec<u32>,
}

impl ModelRequest {
    pub fn new(label: impl Into<String>, attributes: ModelAttributes) -> Self {
        Self {
            label: label.into(),
            attributes,
            tier: None,
            coordinates: Vec::new(),
        }
    }

    pub fn in_tier(mut self, tier: usize) -> Self {
        self.tier = Some(tier);
        self
    }

    pub fn at(mut self, coordinates: Vec<u32>) -> Self {
        self.coordinates = coordinates;
        self
    }

    fn validate(&self) -> VariationResult<()> {
        if self.label.trim().is_empty() {
            return Err(VariationError::InvalidLabel);
        }
        if self.attributes.price <= Decimal::ZERO {
            return Err(VariationError::InvalidPrice);
        }
        if self.attributes.stock < 0 {
            return Err(VariationError::InvalidStock);
        }
        Ok(())
    }
}

/// A model created by [`ModelCreation::ensure`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedModel {
    pub model_id: i64,
    pub tier_index: Vec<u32>,
    /// Option index of the label in the target tier
    pub option_index: u32,
    /// Whether the option had to be appended first
    pub option_added: bool,
}

pub struct ModelCreation<'a, S: ?Sized> {
    store: &'a S,
    config: &'a EngineConfig,
}

impl<'a, S: CatalogStore + ?Sized> ModelCreation<'a, S> {
    pub fn new(store: &'a S, config: &'a EngineConfig) -> Self {
        Self { store, config }
    }

    /// Create a model for `request.label`, appending the option if needed
    pub async fn ensure(&self, item_id: i64, request: &ModelRequest) -> VariationResult<CreatedModel> {
        request.validate()?;
        let label = request.label.trim();

        let snapshot = self.store.fetch_snapshot(item_id).await?;
        if !snapshot.has_tiers() {
            return Err(VariationError::NoTierVariation);
        }

        let tier = request.tier.unwrap_or(self.config.target_tier);
        let base = base_tuple(&snapshot, tier, &request.coordinates)?;

        let (option_index, option_added) = match resolve_option(&snapshot, tier, label, &base) {
            OptionResolution::Found { index, used: true } => {
                return Err(VariationError::DuplicateOption {
                    label: label.to_string(),
                    option_index: index,
                });
            }
            OptionResolution::Found { index, used: false } => (index, false),
            OptionResolution::NotFound => {
                let index = StructuralMutator::new(self.store)
                    .append_option(&snapshot, tier, label)
                    .await?;
                if !self.config.settle_delay.is_zero() {
                    tokio::time::sleep(self.config.settle_delay).await;
                }
                (index, true)
            }
        };

        let tier_index = with_option(&base, tier, option_index);
        let model = NewModel::new(tier_index.clone(), &request.attributes);
        let model_id = self.create_with_retry(item_id, &model).await?;

        tracing::info!(
            item_id = item_id,
            model_id = model_id,
            tier_index = ?tier_index,
            option_added = option_added,
            "Model created"
        );

        Ok(CreatedModel {
            model_id,
            tier_index,
            option_index,
            option_added,
        })
    }

    async fn create_with_retry(&self, item_id: i64, model: &NewModel) -> VariationResult<i64> {
        let policy = &self.config.retry;
        let max_attempts = policy.attempts();
        let mut last_message = String::new();

        for attempt in 1..=max_attempts {
            match self.store.create_model(item_id, model).await {
                Ok(model_id) => return Ok(model_id),
                Err(StoreError::TierIndexNotReady(message)) => {
                    tracing::warn!(
                        item_id = item_id,
                        tier_index = ?model.tier_index,
                        attempt = attempt,
                        error = %message,
                        "Tier index not recognized yet"
                    );
                    last_message = message;
                    if attempt < max_attempts {
                        let delay = policy.delay_after(attempt);
                        tracing::warn!(
                            item_id = item_id,
                            delay_ms = delay.as_millis() as u64,
                            "Retrying..."
                        );
                        tokio::time::sleep(delay).await;
                    }
                }
                Err(StoreError::Upstream(message)) => {
                    return Err(VariationError::Upstream(message));
                }
            }
        }

        Err(VariationError::TransientIndex {
            attempts: max_attempts,
            message: last_message,
        })
    }
}

/// One coordinate per tier, checked against the snapshot
fn base_tuple(
    snapshot: &VariationSnapshot,
    tier: usize,
    coordinates: &[u32],
) -> VariationResult<Vec<u32>> {
    let tier_count = snapshot.tier_variation.len();
    if tier >= tier_count {
        return Err(VariationError::TierOutOfRange { tier, tier_count });
    }
    if coordinates.is_empty() {
        return Ok(vec![0; tier_count]);
    }
    if coordinates.len() != tier_count {
        return Err(VariationError::InvalidCoordinates {
            expected: tier_count,
            actual: coordinates.len(),
        });
    }

    for (idx, (&option, t)) in coordinates.iter().zip(&snapshot.tier_variation).enumerate() {
        if idx != tier && option as usize >= t.option_count() {
            return Err(VariationError::InvalidSelection {
                tier_index: idx as u32,
                option_index: option,
            });
        }
    }

    Ok(coordinates.to_vec())
}
