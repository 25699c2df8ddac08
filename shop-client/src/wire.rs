//! Marketplace wire formats
//!
//! Request bodies and response payloads of the product API, and their
//! conversion to the shared variation model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{
    Model, ModelDraft, NewModel, OptionImage, StockUpdate, TierVariation, VariationOption,
    VariationSnapshot,
};

/// Common response envelope: `error` is empty on success
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub response: Option<T>,
    #[serde(default)]
    pub request_id: Option<String>,
}

impl<T> Envelope<T> {
    /// `(error, message)` when the marketplace reported a failure
    pub fn failure(&self) -> Option<(String, String)> {
        match self.error.as_deref() {
            Some(err) if !err.is_empty() => {
                Some((err.to_string(), self.message.clone().unwrap_or_default()))
            }
            _ => None,
        }
    }
}

// ========== get_model_list ==========

#[derive(Debug, Clone, Deserialize)]
pub struct ModelListResponse {
    #[serde(default)]
    pub tier_variation: Vec<WireTier>,
    #[serde(default)]
    pub model: Vec<WireModel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireTier {
    pub name: String,
    #[serde(default)]
    pub option_list: Vec<WireOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireOption {
    pub option: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<WireImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireImage {
    pub image_id: String,
    #[serde(default, skip_serializing)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireModel {
    pub model_id: i64,
    #[serde(default)]
    pub model_sku: Option<String>,
    #[serde(default)]
    pub tier_index: Vec<u32>,
    #[serde(default)]
    pub price_info: Vec<WirePriceInfo>,
    #[serde(default)]
    pub stock_info_v2: Option<WireStockInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WirePriceInfo {
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub original_price: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireStockInfo {
    #[serde(default)]
    pub summary_info: Option<WireStockSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireStockSummary {
    #[serde(default)]
    pub total_available_stock: Option<i64>,
}

impl From<WireTier> for TierVariation {
    fn from(tier: WireTier) -> Self {
        Self {
            name: tier.name,
            option_list: tier.option_list.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<WireOption> for VariationOption {
    fn from(opt: WireOption) -> Self {
        Self {
            option: opt.option,
            image: opt.image.map(|img| OptionImage {
                image_id: img.image_id,
                image_url: img.image_url,
            }),
        }
    }
}

impl From<&TierVariation> for WireTier {
    fn from(tier: &TierVariation) -> Self {
        Self {
            name: tier.name.clone(),
            option_list: tier
                .option_list
                .iter()
                .map(|opt| WireOption {
                    option: opt.option.clone(),
                    image: opt.image.as_ref().map(|img| WireImage {
                        image_id: img.image_id.clone(),
                        image_url: None,
                    }),
                })
                .collect(),
        }
    }
}

impl From<WireModel> for Model {
    fn from(m: WireModel) -> Self {
        let available_stock = m
            .stock_info_v2
            .and_then(|s| s.summary_info)
            .and_then(|s| s.total_available_stock)
            .unwrap_or(0);
        let price = m.price_info.first().and_then(|p| p.original_price);

        Self {
            model_id: Some(m.model_id),
            model_sku: m.model_sku.filter(|s| !s.is_empty()),
            tier_index: m.tier_index,
            available_stock,
            price,
        }
    }
}

impl ModelListResponse {
    pub fn into_snapshot(self, item_id: i64) -> VariationSnapshot {
        VariationSnapshot {
            item_id,
            tier_variation: self.tier_variation.into_iter().map(Into::into).collect(),
            model: self.model.into_iter().map(Into::into).collect(),
        }
    }
}

// ========== update_tier_variation ==========

#[derive(Debug, Clone, Serialize)]
pub struct UpdateTierVariationRequest {
    pub item_id: i64,
    pub tier_variation: Vec<WireTier>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub model: Vec<ModelDraft>,
}

impl UpdateTierVariationRequest {
    pub fn new(item_id: i64, tiers: &[TierVariation], models: &[ModelDraft]) -> Self {
        Self {
            item_id,
            tier_variation: tiers.iter().map(Into::into).collect(),
            model: models.to_vec(),
        }
    }
}

// ========== add_model ==========

#[derive(Debug, Clone, Serialize)]
pub struct AddModelRequest {
    pub item_id: i64,
    pub model_list: Vec<WireNewModel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WireNewModel {
    pub tier_index: Vec<u32>,
    #[serde(with = "rust_decimal::serde::float")]
    pub original_price: Decimal,
    pub seller_stock: Vec<WireSellerStock>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub weight: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_sku: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WireSellerStock {
    pub stock: i64,
}

impl AddModelRequest {
    pub fn single(item_id: i64, model: &NewModel) -> Self {
        Self {
            item_id,
            model_list: vec![WireNewModel {
                tier_index: model.tier_index.clone(),
                original_price: model.original_price,
                seller_stock: vec![WireSellerStock { stock: model.stock }],
                weight: model.weight,
                model_sku: model.model_sku.clone(),
            }],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddModelResponse {
    #[serde(default)]
    pub model: Vec<CreatedModel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedModel {
    pub model_id: i64,
    #[serde(default)]
    pub tier_index: Vec<u32>,
}

// ========== update_stock ==========

#[derive(Debug, Clone, Serialize)]
pub struct UpdateStockRequest {
    pub item_id: i64,
    pub stock_list: Vec<WireStockEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WireStockEntry {
    pub model_id: i64,
    pub seller_stock: Vec<WireSellerStock>,
}

impl UpdateStockRequest {
    pub fn new(item_id: i64, updates: &[StockUpdate]) -> Self {
        Self {
            item_id,
            stock_list: updates
                .iter()
                .map(|u| WireStockEntry {
                    model_id: u.model_id,
                    seller_stock: vec![WireSellerStock { stock: u.stock }],
                })
                .collect(),
        }
    }
}

/// Per-model outcome of a stock update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStockResponse {
    #[serde(default)]
    pub success_list: Vec<serde_json::Value>,
    #[serde(default)]
    pub failure_list: Vec<serde_json::Value>,
}
