//! DexScreener Client
//!
//! Key-free access to the DexScreener pair API. Used both as a
//! registered token source (pair search) and for the single live pair
//! lookup behind the price-history endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::types::{DexPair, PairsResponse};
use crate::adapters::{body_snippet, classify_transport_error};
use crate::domain::token::NormalizedToken;
use crate::ports::token_source::{SourceError, TokenSource};

/// Default DexScreener API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.dexscreener.com";

/// Configuration for the DexScreener client
#[derive(Debug, Clone)]
pub struct DexScreenerConfig {
    /// API base URL
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Search query used when this client runs as a token source
    pub search_query: String,
}

impl Default for DexScreenerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(5),
            search_query: "solana".to_string(),
        }
    }
}

impl DexScreenerConfig {
    /// Create config with a custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// Client for the DexScreener pair API
#[derive(Debug, Clone)]
pub struct DexScreenerClient {
    config: DexScreenerConfig,
    http: Client,
}

impl DexScreenerClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self, SourceError> {
        Self::with_config(DexScreenerConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: DexScreenerConfig) -> Result<Self, SourceError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SourceError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    /// Search indexed pairs by free-text query
    pub async fn search_pairs(&self, query: &str) -> Result<Vec<DexPair>, SourceError> {
        let url = format!("{}/latest/dex/search", self.config.base_url);
        let response = self
            .get_pairs(self.http.get(&url).query(&[("q", query)]))
            .await?;
        Ok(response.pairs.unwrap_or_default())
    }

    /// All indexed pairs for one token mint
    pub async fn token_pairs(&self, mint: &str) -> Result<Vec<DexPair>, SourceError> {
        let url = format!("{}/latest/dex/tokens/{}", self.config.base_url, mint);
        let response = self.get_pairs(self.http.get(&url)).await?;
        Ok(response.pairs.unwrap_or_default())
    }

    async fn get_pairs(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<PairsResponse, SourceError> {
        let response = request
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

        response
            .json::<PairsResponse>()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))
    }
}

#[async_trait]
impl TokenSource for DexScreenerClient {
    fn name(&self) -> &'static str {
        super::SOURCE_NAME
    }

    async fn fetch_tokens(&self) -> Result<Vec<NormalizedToken>, SourceError> {
        let pairs = self.search_pairs(&self.config.search_query).await?;
        Ok(pairs.iter().filter_map(DexPair::normalize).collect())
    }
}
