//! Seller server configuration

use std::time::Duration;

use variation_engine::config::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_BACKOFF_MS, DEFAULT_SETTLE_DELAY_MS,
};
use variation_engine::{BackoffStrategy, EngineConfig, RetryPolicy};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Seller server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// Marketplace API base URL
    pub shop_api_url: String,
    /// Partner id of the registered application
    pub partner_id: i64,
    /// Partner key used to sign requests
    pub partner_key: String,
    /// Shop access token from the seller's authorization
    pub access_token: String,
    pub shop_id: i64,
    /// Marketplace request timeout
    pub http_timeout_secs: u64,
    pub engine: EngineConfig,
}

impl Config {
    /// Require a secret: must be set and non-empty outside development.
    fn require_secret(
        lookup: &impl Fn(&str) -> Option<String>,
        name: &str,
        environment: &str,
    ) -> Result<String, BoxError> {
        let val = match lookup(name) {
            Some(v) => v,
            None => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Numeric id: must parse when set, must be set outside development
    fn require_id(
        lookup: &impl Fn(&str) -> Option<String>,
        name: &str,
        environment: &str,
    ) -> Result<i64, BoxError> {
        match lookup(name) {
            Some(v) => v
                .trim()
                .parse()
                .map_err(|_| BoxError::from(format!("{name} must be a number, got {v:?}"))),
            None if environment == "development" => Ok(0),
            None => Err(format!("{name} must be set in {environment} environment").into()),
        }
    }

    fn parse_or<T: std::str::FromStr>(
        lookup: &impl Fn(&str) -> Option<String>,
        name: &str,
        default: T,
    ) -> T {
        lookup(name).and_then(|v| v.parse().ok()).unwrap_or(default)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from any key/value source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, BoxError> {
        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".into());

        let backoff = match lookup("VARIATION_BACKOFF") {
            Some(v) => v.parse::<BackoffStrategy>()?,
            None => BackoffStrategy::Fixed,
        };

        let engine = EngineConfig::default()
            .with_settle_delay(Duration::from_millis(Self::parse_or(
                &lookup,
                "VARIATION_SETTLE_DELAY_MS",
                DEFAULT_SETTLE_DELAY_MS,
            )))
            .with_retry(RetryPolicy {
                max_attempts: Self::parse_or(&lookup, "VARIATION_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS),
                backoff: Duration::from_millis(Self::parse_or(
                    &lookup,
                    "VARIATION_RETRY_BACKOFF_MS",
                    DEFAULT_RETRY_BACKOFF_MS,
                )),
                strategy: backoff,
            });

        Ok(Self {
            http_port: Self::parse_or(&lookup, "HTTP_PORT", 3000),
            shop_api_url: lookup("SHOP_API_URL")
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| shop_client::config::DEFAULT_BASE_URL.into()),
            partner_id: Self::require_id(&lookup, "SHOP_PARTNER_ID", &environment)?,
            partner_key: Self::require_secret(&lookup, "SHOP_PARTNER_KEY", &environment)?,
            access_token: Self::require_secret(&lookup, "SHOP_ACCESS_TOKEN", &environment)?,
            shop_id: Self::require_id(&lookup, "SHOP_ID", &environment)?,
            http_timeout_secs: Self::parse_or(&lookup, "HTTP_TIMEOUT_SECS", 30),
            environment,
            engine,
        })
    }
}
