//! Application state for seller-server

use std::sync::Arc;

use shop_client::{ClientResult, ShopClient, ShopConfig, ShopCredentials};
use variation_engine::VariationEngine;

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Variation engine over the marketplace client
    pub engine: Arc<VariationEngine<ShopClient>>,
}

impl AppState {
    pub fn new(config: &Config) -> ClientResult<Self> {
        let client = ShopConfig::new(&config.shop_api_url, config.partner_id, &config.partner_key)
            .with_timeout(config.http_timeout_secs)
            .build_client(ShopCredentials::new(&config.access_token, config.shop_id))?;

        Ok(Self::with_engine(VariationEngine::with_config(
            client,
            config.engine.clone(),
        )))
    }

    pub fn with_engine(engine: VariationEngine<ShopClient>) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Marketplace client, for calls outside the engine
    pub fn client(&self) -> &ShopClient {
        self.engine.store()
    }
}
