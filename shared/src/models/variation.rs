//! Tier Variation Model
//!
//! A product's variation structure is an ordered list of tiers, each an
//! ordered list of options. Models (SKUs) address one option per tier by
//! position, so an option's identity is its index, never its label.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Image attached to a variation option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionImage {
    pub image_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// One concrete value within a tier (e.g. "Red")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationOption {
    pub option: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<OptionImage>,
}

impl VariationOption {
    pub fn new(option: impl Into<String>) -> Self {
        Self {
            option: option.into(),
            image: None,
        }
    }
}

/// A named axis of variation (e.g. "Color") with its ordered options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierVariation {
    pub name: String,
    pub option_list: Vec<VariationOption>,
}

impl TierVariation {
    pub fn new<I, S>(name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            option_list: options.into_iter().map(VariationOption::new).collect(),
        }
    }

    pub fn option_count(&self) -> usize {
        self.option_list.len()
    }
}

/// A purchasable variant, addressed by one option index per tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Marketplace-assigned id (absent before creation)
    pub model_id: Option<i64>,
    /// Seller SKU, the durable key used when the structure is replaced
    pub model_sku: Option<String>,
    pub tier_index: Vec<u32>,
    /// Total available stock (missing upstream stock counts as zero)
    #[serde(default)]
    pub available_stock: i64,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub price: Option<Decimal>,
}

impl Model {
    pub fn is_out_of_stock(&self) -> bool {
        self.available_stock == 0
    }

    /// Option index this model uses in `tier`, if it has one
    pub fn option_in(&self, tier: usize) -> Option<u32> {
        self.tier_index.get(tier).copied()
    }
}

/// Point-in-time read of an item's tiers and models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariationSnapshot {
    pub item_id: i64,
    pub tier_variation: Vec<TierVariation>,
    pub model: Vec<Model>,
}

impl VariationSnapshot {
    pub fn has_tiers(&self) -> bool {
        !self.tier_variation.is_empty()
    }

    pub fn tier(&self, tier: usize) -> Option<&TierVariation> {
        self.tier_variation.get(tier)
    }

    /// Models whose `tier_index[tier] == option`
    pub fn models_at(&self, tier: usize, option: u32) -> impl Iterator<Item = &Model> {
        self.model
            .iter()
            .filter(move |m| m.option_in(tier) == Some(option))
    }

    /// Model occupying exactly this option tuple
    pub fn model_with_index(&self, tier_index: &[u32]) -> Option<&Model> {
        self.model.iter().find(|m| m.tier_index == tier_index)
    }

    /// Every model has one in-range index per tier
    pub fn is_consistent(&self) -> bool {
        self.model.iter().all(|m| {
            m.tier_index.len() == self.tier_variation.len()
                && m.tier_index
                    .iter()
                    .zip(&self.tier_variation)
                    .all(|(&idx, tier)| (idx as usize) < tier.option_count())
        })
    }

    /// Content hash of the structure, used as an optimistic concurrency token
    ///
    /// Covers tier names, option labels and every model's id, sku and
    /// tier index. Stock and price do not participate.
    pub fn fingerprint(&self) -> String {
        #[derive(Serialize)]
        struct Canonical<'a> {
            tiers: Vec<(&'a str, Vec<&'a str>)>,
            models: Vec<(Option<i64>, Option<&'a str>, &'a [u32])>,
        }

        let canonical = Canonical {
            tiers: self
                .tier_variation
                .iter()
                .map(|t| {
                    (
                        t.name.as_str(),
                        t.option_list.iter().map(|o| o.option.as_str()).collect(),
                    )
                })
                .collect(),
            models: self
                .model
                .iter()
                .map(|m| (m.model_id, m.model_sku.as_deref(), m.tier_index.as_slice()))
                .collect(),
        };

        let bytes = serde_json::to_vec(&canonical).unwrap_or_default();
        hex::encode(Sha256::digest(&bytes))
    }
}

/// A (tier, option) position selected by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OptionRef {
    pub tier_index: u32,
    pub option_index: u32,
}

impl OptionRef {
    pub fn new(tier_index: u32, option_index: u32) -> Self {
        Self {
            tier_index,
            option_index,
        }
    }
}

/// Option that can be removed because every model using it is out of stock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletableOption {
    pub tier_index: u32,
    pub option_index: u32,
    pub tier_name: String,
    pub option_name: String,
    /// Models that are dropped along with the option
    pub affected_models: usize,
}

/// Everything the deletion confirmation dialog shows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletionReport {
    pub item_id: i64,
    pub tier_variation: Vec<TierVariation>,
    pub deletable_options: Vec<DeletableOption>,
    pub zero_stock_models: Vec<Model>,
    pub total_models: usize,
    pub zero_stock_count: usize,
    /// Snapshot fingerprint; pass back to pin the deletion to this read
    pub version: String,
}

/// Model entry of a bulk tier-structure replace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDraft {
    pub tier_index: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_sku: Option<String>,
}

impl From<&Model> for ModelDraft {
    fn from(model: &Model) -> Self {
        Self {
            tier_index: model.tier_index.clone(),
            model_sku: model.model_sku.clone(),
        }
    }
}

/// Caller-supplied attributes for a new model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelAttributes {
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default = "default_stock")]
    pub stock: i64,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub weight: Option<Decimal>,
    #[serde(default)]
    pub sku: Option<String>,
}

fn default_stock() -> i64 {
    1
}

impl ModelAttributes {
    pub fn with_price(price: Decimal) -> Self {
        Self {
            price,
            stock: default_stock(),
            weight: None,
            sku: None,
        }
    }
}

/// Create-model payload sent to the marketplace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewModel {
    pub tier_index: Vec<u32>,
    #[serde(with = "rust_decimal::serde::float")]
    pub original_price: Decimal,
    pub stock: i64,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub weight: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_sku: Option<String>,
}

impl NewModel {
    pub fn new(tier_index: Vec<u32>, attributes: &ModelAttributes) -> Self {
        Self {
            tier_index,
            original_price: attributes.price,
            stock: attributes.stock,
            weight: attributes.weight,
            model_sku: attributes.sku.clone(),
        }
    }
}

/// Stock edit for one existing model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockUpdate {
    pub model_id: i64,
    pub stock: i64,
}
