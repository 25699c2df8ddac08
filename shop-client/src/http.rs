//! HTTP client for the marketplace product API

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{ModelDraft, NewModel, StockUpdate, TierVariation, VariationSnapshot};

use crate::sign::sign;
use crate::wire::{
    AddModelRequest, AddModelResponse, Envelope, ModelListResponse, UpdateStockRequest,
    UpdateStockResponse, UpdateTierVariationRequest,
};
use crate::{ClientError, ClientResult, ShopConfig, ShopCredentials};

const PATH_GET_MODEL_LIST: &str = "/api/v2/product/get_model_list";
const PATH_UPDATE_TIER_VARIATION: &str = "/api/v2/product/update_tier_variation";
const PATH_ADD_MODEL: &str = "/api/v2/product/add_model";
const PATH_UPDATE_STOCK: &str = "/api/v2/product/update_stock";

/// Signed HTTP client for one authorized shop
#[derive(Debug, Clone)]
pub struct ShopClient {
    client: Client,
    base_url: String,
    partner_id: i64,
    partner_key: String,
    credentials: ShopCredentials,
}

impl ShopClient {
    /// Create a new client from configuration and shop credentials
    pub fn new(config: &ShopConfig, credentials: ShopCredentials) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            partner_id: config.partner_id,
            partner_key: config.partner_key.clone(),
            credentials,
        })
    }

    /// Replace the shop credentials (e.g. after a token refresh)
    pub fn with_credentials(mut self, credentials: ShopCredentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn shop_id(&self) -> i64 {
        self.credentials.shop_id
    }

    /// Common signed query parameters for a shop-level path
    fn signed_query(&self, path: &str) -> ClientResult<Vec<(&'static str, String)>> {
        let timestamp = chrono::Utc::now().timestamp();
        let sign = sign(
            &self.partner_key,
            self.partner_id,
            path,
            timestamp,
            Some(&self.credentials.access_token),
            Some(self.credentials.shop_id),
        )?;

        Ok(vec![
            ("partner_id", self.partner_id.to_string()),
            ("timestamp", timestamp.to_string()),
            ("access_token", self.credentials.access_token.clone()),
            ("shop_id", self.credentials.shop_id.to_string()),
            ("sign", sign),
        ])
    }

    /// Make a signed GET request
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(&self.signed_query(path)?)
            .query(params)
            .send()
            .await?;
        Self::require(path, Self::handle_response(path, response).await?)
    }

    /// Make a signed POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.send_post(path, body).await?;
        Self::require(path, Self::handle_response(path, response).await?)
    }

    /// Make a signed POST request whose payload is not needed
    pub async fn post_ack<B: Serialize>(&self, path: &str, body: &B) -> ClientResult<()> {
        let response = self.send_post(path, body).await?;
        Self::handle_response::<serde_json::Value>(path, response).await?;
        Ok(())
    }

    async fn send_post<B: Serialize>(&self, path: &str, body: &B) -> ClientResult<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .query(&self.signed_query(path)?)
            .json(body)
            .send()
            .await?;
        Ok(response)
    }

    fn require<T>(path: &str, response: Option<T>) -> ClientResult<T> {
        response.ok_or_else(|| ClientError::InvalidResponse(format!("{path}: missing response")))
    }

    /// Decode the envelope, turning a set `error` field into [`ClientError::Api`]
    async fn handle_response<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> ClientResult<Option<T>> {
        let status = response.status();
        let text = response.text().await?;

        let envelope: Envelope<T> = match serde_json::from_str(&text) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(ClientError::Status {
                    status: status.as_u16(),
                    body: text,
                });
            }
            Err(e) => return Err(e.into()),
        };

        if let Some((error, message)) = envelope.failure() {
            tracing::warn!(
                path = path,
                error = %error,
                message = %message,
                request_id = envelope.request_id.as_deref().unwrap_or(""),
                "Marketplace API call failed"
            );
            return Err(ClientError::Api { error, message });
        }

        Ok(envelope.response)
    }

    // ========== Product API ==========

    /// Tier variations and models of an item
    pub async fn get_model_list(&self, item_id: i64) -> ClientResult<VariationSnapshot> {
        let response: ModelListResponse = self
            .get(PATH_GET_MODEL_LIST, &[("item_id", item_id.to_string())])
            .await?;
        Ok(response.into_snapshot(item_id))
    }

    /// Replace the tier structure and model set in one call
    pub async fn update_tier_variation(
        &self,
        item_id: i64,
        tiers: &[TierVariation],
        models: &[ModelDraft],
    ) -> ClientResult<()> {
        let body = UpdateTierVariationRequest::new(item_id, tiers, models);
        tracing::debug!(
            item_id = item_id,
            tiers = tiers.len(),
            models = models.len(),
            "update_tier_variation"
        );
        self.post_ack(PATH_UPDATE_TIER_VARIATION, &body).await
    }

    /// Create one model; returns the new model id
    pub async fn add_model(&self, item_id: i64, model: &NewModel) -> ClientResult<i64> {
        let body = AddModelRequest::single(item_id, model);
        let response: AddModelResponse = self.post(PATH_ADD_MODEL, &body).await?;

        response
            .model
            .iter()
            .find(|m| m.tier_index.is_empty() || m.tier_index == model.tier_index)
            .map(|m| m.model_id)
            .ok_or_else(|| ClientError::InvalidResponse("add_model: missing model_id".to_string()))
    }

    /// Set seller stock for several models of one item
    pub async fn update_stock(
        &self,
        item_id: i64,
        updates: &[StockUpdate],
    ) -> ClientResult<UpdateStockResponse> {
        let body = UpdateStockRequest::new(item_id, updates);
        self.post(PATH_UPDATE_STOCK, &body).await
    }
}
