//! pump.fun Client
//!
//! Fetches the coin board and single-coin detail from the pump.fun
//! frontend API. The API rejects default HTTP client agents, so every
//! request carries a browser `User-Agent` and an explicit JSON accept
//! header.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::types::PumpFunCoin;
use crate::adapters::{body_snippet, classify_transport_error};
use crate::domain::token::NormalizedToken;
use crate::ports::token_source::{SourceError, TokenSource};

/// Default pump.fun frontend API base URL
pub const DEFAULT_BASE_URL: &str = "https://frontend-api.pump.fun";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0";

/// Configuration for the pump.fun client
#[derive(Debug, Clone)]
pub struct PumpFunConfig {
    /// API base URL
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Board page size used when this client runs as a token source
    pub limit: u32,
    /// Whether NSFW-flagged coins are requested
    pub include_nsfw: bool,
}

impl Default for PumpFunConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(5),
            limit: 50,
            include_nsfw: false,
        }
    }
}

impl PumpFunConfig {
    /// Create config with a custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// Client for the pump.fun frontend API
#[derive(Debug, Clone)]
pub struct PumpFunClient {
    config: PumpFunConfig,
    http: Client,
}

impl PumpFunClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self, SourceError> {
        Self::with_config(PumpFunConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: PumpFunConfig) -> Result<Self, SourceError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SourceError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    /// Fetch one page of the coin board
    pub async fn fetch_coins(
        &self,
        limit: u32,
        offset: u32,
        include_nsfw: bool,
    ) -> Result<Vec<PumpFunCoin>, SourceError> {
        let url = format!("{}/coins", self.config.base_url);
        self.get_json(&url, &[
            ("offset", offset.to_string()),
            ("limit", limit.to_string()),
            ("includeNsfw", include_nsfw.to_string()),
        ])
        .await
    }

    /// Fetch one coin by mint address, preserving the raw upstream shape
    pub async fn fetch_coin(&self, address: &str) -> Result<serde_json::Value, SourceError> {
        let url = format!("{}/coins/{}", self.config.base_url, address);
        self.get_json(&url, &[]).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, SourceError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .header("Accept", "application/json")
            .header("User-Agent", BROWSER_USER_AGENT)
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
            .json::<T>()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))
    }
}

#[async_trait]
impl TokenSource for PumpFunClient {
    fn name(&self) -> &'static str {
        super::SOURCE_NAME
    }

    async fn fetch_tokens(&self) -> Result<Vec<NormalizedToken>, SourceError> {
        let coins = self
            .fetch_coins(self.config.limit, 0, self.config.include_nsfw)
            .await?;
        Ok(coins.iter().map(PumpFunCoin::normalize).collect())
    }
}
