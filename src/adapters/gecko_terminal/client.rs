//! GeckoTerminal Client
//!
//! Key-free access to the GeckoTerminal v2 trending-pools endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::types::{GeckoPool, TrendingPoolsResponse};
use crate::adapters::{body_snippet, classify_transport_error};
use crate::domain::token::NormalizedToken;
use crate::ports::token_source::{SourceError, TokenSource};

/// Default GeckoTerminal API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.geckoterminal.com/api/v2";

/// Configuration for the GeckoTerminal client
#[derive(Debug, Clone)]
pub struct GeckoTerminalConfig {
    /// API base URL
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Network slug in pool endpoints
    pub network: String,
}

impl Default for GeckoTerminalConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(5),
            network: "solana".to_string(),
        }
    }
}

impl GeckoTerminalConfig {
    /// Create config with a custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// Client for the GeckoTerminal v2 API
#[derive(Debug, Clone)]
pub struct GeckoTerminalClient {
    config: GeckoTerminalConfig,
    http: Client,
}

impl GeckoTerminalClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self, SourceError> {
        Self::with_config(GeckoTerminalConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: GeckoTerminalConfig) -> Result<Self, SourceError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SourceError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    /// Trending pools on the configured network
    pub async fn trending_pools(&self) -> Result<Vec<GeckoPool>, SourceError> {
        let url = format!(
            "{}/networks/{}/trending_pools",
            self.config.base_url, self.config.network
        );

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                code: status.as_u16(),
                message: body_snippet(&body),
            });
        }

        let parsed = response
            .json::<TrendingPoolsResponse>()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;
        Ok(parsed.data)
    }
}

#[async_trait]
impl TokenSource for GeckoTerminalClient {
    fn name(&self) -> &'static str {
        super::SOURCE_NAME
    }

    async fn fetch_tokens(&self) -> Result<Vec<NormalizedToken>, SourceError> {
        let pools = self.trending_pools().await?;
        Ok(pools.iter().filter_map(GeckoPool::normalize).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = GeckoTerminalConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.network, "solana");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_client_creation() {
        let client = GeckoTerminalClient::new();
        assert!(client.is_ok());
        assert_eq!(client.unwrap().name(), "geckoterminal");
    }
}
