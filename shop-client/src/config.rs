//! Client configuration

/// Marketplace sandbox host, used when no base URL is configured
pub const DEFAULT_BASE_URL: &str = "https://partner.test-stable.shopeemobile.com";

/// Partner application configuration for the marketplace Open API
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// API base URL (e.g., "https://partner.shopeemobile.com")
    pub base_url: String,

    /// Partner id issued to the application
    pub partner_id: i64,

    /// Partner key used to sign every request
    pub partner_key: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ShopConfig {
    /// Create a new configuration against the given base URL
    pub fn new(base_url: impl Into<String>, partner_id: i64, partner_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            partner_id,
            partner_key: partner_key.into(),
            timeout: 30,
        }
    }

    /// Configuration against the sandbox host
    pub fn sandbox(partner_id: i64, partner_key: impl Into<String>) -> Self {
        Self::new(DEFAULT_BASE_URL, partner_id, partner_key)
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create a shop client from this configuration
    pub fn build_client(
        &self,
        credentials: ShopCredentials,
    ) -> crate::ClientResult<super::ShopClient> {
        super::ShopClient::new(self, credentials)
    }
}

/// Shop-level authorization obtained from the seller's OAuth grant
#[derive(Debug, Clone)]
pub struct ShopCredentials {
    pub access_token: String,
    pub shop_id: i64,
}

impl ShopCredentials {
    pub fn new(access_token: impl Into<String>, shop_id: i64) -> Self {
        Self {
            access_token: access_token.into(),
            shop_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sandbox_defaults() {
        let config = ShopConfig::sandbox(1001, "key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, 30);
    }

    #[test]
    fn test_builder_setters() {
        let config = ShopConfig::sandbox(1001, "key")
            .with_base_url("http://localhost:9000")
            .with_timeout(5);
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout, 5);
    }
}
