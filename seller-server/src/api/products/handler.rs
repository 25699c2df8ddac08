//! Product API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{
    DeletionReport, ModelAttributes, OptionRef, StockUpdate, TierVariation, VariationSnapshot,
};
use shop_client::wire::UpdateStockResponse;
use variation_engine::ModelRequest;

use crate::state::AppState;

// =============================================================================
// Request / Response Types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ItemQuery {
    pub item_id: Option<i64>,
}

impl ItemQuery {
    fn item_id(&self) -> AppResult<i64> {
        self.item_id.ok_or_else(|| AppError::required("item_id"))
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteOptionsRequest {
    pub item_id: Option<i64>,
    #[serde(default)]
    pub options_to_delete: Vec<OptionRef>,
    /// `version` from the deletable listing; rejects the delete if the
    /// structure changed in between
    #[serde(default)]
    pub expected_version: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteOptionsResponse {
    pub deleted_options: usize,
    pub kept_models: usize,
    pub dropped_models: usize,
    pub tier_variation: Vec<TierVariation>,
}

#[derive(Debug, Deserialize)]
pub struct CreateModelRequest {
    pub item_id: Option<i64>,
    pub model_name: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    pub stock: Option<i64>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub weight: Option<Decimal>,
    pub sku: Option<String>,
    /// Tier the label belongs to (default: first tier)
    pub tier: Option<usize>,
    /// Option index per tier for the other tiers
    pub coordinates: Option<Vec<u32>>,
}

impl CreateModelRequest {
    fn into_parts(self) -> AppResult<(i64, ModelRequest)> {
        let item_id = self.item_id.ok_or_else(|| AppError::required("item_id"))?;
        let model_name = self.model_name.ok_or_else(|| AppError::required("model_name"))?;
        let price = self.price.ok_or_else(|| AppError::required("price"))?;

        let mut attributes = ModelAttributes::with_price(price);
        if let Some(stock) = self.stock {
            attributes.stock = stock;
        }
        attributes.weight = self.weight;
        attributes.sku = self.sku.filter(|s| !s.trim().is_empty());

        let mut request = ModelRequest::new(model_name, attributes);
        if let Some(tier) = self.tier {
            request = request.in_tier(tier);
        }
        if let Some(coordinates) = self.coordinates {
            request = request.at(coordinates);
        }
        Ok((item_id, request))
    }
}

#[derive(Debug, Serialize)]
pub struct CreateModelResponse {
    pub model_id: i64,
    pub tier_index: Vec<u32>,
    pub model_name: String,
    pub option_added: bool,
}

#[derive(Debug, Deserialize)]
pub struct StockItem {
    pub model_id: Option<i64>,
    pub stock: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStockRequest {
    pub item_id: Option<i64>,
    pub stock_items: Option<Vec<StockItem>>,
}

impl UpdateStockRequest {
    fn into_parts(self) -> AppResult<(i64, Vec<StockUpdate>)> {
        let item_id = self.item_id.ok_or_else(|| AppError::required("item_id"))?;
        let items = self
            .stock_items
            .filter(|items| !items.is_empty())
            .ok_or_else(|| AppError::validation("Missing or invalid stock_items array"))?;

        items
            .into_iter()
            .map(|item| match (item.model_id, item.stock) {
                (Some(_), Some(stock)) if stock < 0 => Err(AppError::with_message(
                    ErrorCode::ModelInvalidStock,
                    "Stock cannot be negative",
                )),
                (Some(model_id), Some(stock)) => Ok(StockUpdate { model_id, stock }),
                _ => Err(AppError::validation(
                    "Each stock item must have model_id and stock",
                )),
            })
            .collect::<AppResult<Vec<_>>>()
            .map(|updates| (item_id, updates))
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/products/models - tiers and models of an item
pub async fn list_models(
    State(state): State<AppState>,
    Query(query): Query<ItemQuery>,
) -> AppResult<Json<ApiResponse<VariationSnapshot>>> {
    let snapshot = state.client().get_model_list(query.item_id()?).await?;
    Ok(Json(ApiResponse::success(snapshot)))
}

/// GET /api/products/variations/deletable - sold-out options and counts
pub async fn list_deletable(
    State(state): State<AppState>,
    Query(query): Query<ItemQuery>,
) -> AppResult<Json<ApiResponse<DeletionReport>>> {
    let report = state.engine.deletion_report(query.item_id()?).await?;
    Ok(Json(ApiResponse::success(report)))
}

/// POST /api/products/variations/delete - remove options and their models
pub async fn delete_options(
    State(state): State<AppState>,
    Json(payload): Json<DeleteOptionsRequest>,
) -> AppResult<Json<ApiResponse<DeleteOptionsResponse>>> {
    let item_id = payload.item_id.ok_or_else(|| AppError::required("item_id"))?;

    let outcome = state
        .engine
        .delete_options(
            item_id,
            &payload.options_to_delete,
            payload.expected_version.as_deref(),
        )
        .await?;

    Ok(Json(ApiResponse::success_with_message(
        format!(
            "Successfully deleted {} variation option(s)",
            outcome.deleted_options
        ),
        DeleteOptionsResponse {
            deleted_options: outcome.deleted_options,
            kept_models: outcome.kept_models,
            dropped_models: outcome.dropped_models,
            tier_variation: outcome.tier_variation,
        },
    )))
}

/// POST /api/products/models - add a model, appending its option if new
pub async fn create_model(
    State(state): State<AppState>,
    Json(payload): Json<CreateModelRequest>,
) -> AppResult<Json<ApiResponse<CreateModelResponse>>> {
    let (item_id, request) = payload.into_parts()?;
    let created = state.engine.ensure_model_with(item_id, &request).await?;

    let model_name = request.label.trim().to_string();
    Ok(Json(ApiResponse::success_with_message(
        format!("Model \"{model_name}\" added"),
        CreateModelResponse {
            model_id: created.model_id,
            tier_index: created.tier_index,
            model_name,
            option_added: created.option_added,
        },
    )))
}

/// POST /api/products/stock - set stock for several models
pub async fn update_stock(
    State(state): State<AppState>,
    Json(payload): Json<UpdateStockRequest>,
) -> AppResult<Json<ApiResponse<UpdateStockResponse>>> {
    let (item_id, updates) = payload.into_parts()?;
    let result = state.client().update_stock(item_id, &updates).await?;

    if !result.failure_list.is_empty() {
        tracing::warn!(
            item_id = item_id,
            failed = result.failure_list.len(),
            "Stock update partially failed"
        );
    }

    Ok(Json(ApiResponse::success_with_message(
        format!("Successfully updated stock for {} model(s)", updates.len()),
        result,
    )))
}
