//! Birdeye Client
//!
//! Keyed access to the Birdeye token list, sorted by 24h USD volume.
//! Requires an API key; without one the source reports a configuration
//! error per fetch and the aggregate continues without it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::adapters::{body_snippet, classify_transport_error};
use crate::domain::token::NormalizedToken;
use crate::ports::token_source::{SourceError, TokenSource};

/// Default Birdeye API base URL
pub const DEFAULT_BASE_URL: &str = "https://public-api.birdeye.so";

/// Configuration for the Birdeye client
#[derive(Debug, Clone)]
pub struct BirdeyeConfig {
    /// API base URL
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// API key; `None` disables the source with a descriptive error
    pub api_key: Option<String>,
    /// Chain slug sent in the `x-chain` header
    pub chain: String,
    /// Page size used when this client runs as a token source
    pub limit: u32,
}

impl Default for BirdeyeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(5),
            api_key: None,
            chain: "solana".to_string(),
            limit: 50,
        }
    }
}

impl BirdeyeConfig {
    /// Create config with an API key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }
}

/// Token list envelope
#[derive(Debug, Clone, Deserialize)]
pub struct TokenListResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<TokenListData>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenListData {
    #[serde(default)]
    pub update_unix_time: Option<i64>,
    #[serde(default)]
    pub tokens: Vec<BirdeyeToken>,
}

/// One token list entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirdeyeToken {
    pub address: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub decimals: Option<u8>,
    #[serde(default)]
    pub price: Option<f64>,
    /// 24h volume in USD
    #[serde(rename = "v24hUSD", default)]
    pub v24h_usd: Option<f64>,
    /// 24h price change in percent
    #[serde(rename = "v24hChangePercent", default)]
    pub v24h_change_percent: Option<f64>,
    #[serde(default)]
    pub liquidity: Option<f64>,
    /// Market cap in USD
    #[serde(default)]
    pub mc: Option<f64>,
    #[serde(rename = "logoURI", default)]
    pub logo_uri: Option<String>,
    #[serde(rename = "lastTradeUnixTime", default)]
    pub last_trade_unix_time: Option<i64>,
}

impl BirdeyeToken {
    /// Maps the list entry into the common record shape
    /// (`v24hUSD` becomes `volume24h`, `mc` becomes `marketCap`).
    pub fn normalize(&self) -> NormalizedToken {
        NormalizedToken {
            address: self.address.clone(),
            symbol: self.symbol.clone(),
            name: self.name.clone(),
            price_usd: self.price.filter(|v| v.is_finite()),
            volume_24h: self.v24h_usd.filter(|v| v.is_finite()),
            liquidity: self.liquidity.filter(|v| v.is_finite()),
            market_cap: self.mc.filter(|v| v.is_finite()),
            price_change_24h: self.v24h_change_percent.filter(|v| v.is_finite()),
            pair_address: None,
            dex_id: None,
            created_at: None,
            decimals: self.decimals,
            source: super::SOURCE_NAME.to_string(),
        }
    }
}

/// Client for the Birdeye public API
#[derive(Debug, Clone)]
pub struct BirdeyeClient {
    config: BirdeyeConfig,
    http: Client,
}

impl BirdeyeClient {
    /// Create a new client with default configuration (no API key)
    pub fn new() -> Result<Self, SourceError> {
        Self::with_config(BirdeyeConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: BirdeyeConfig) -> Result<Self, SourceError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SourceError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    /// Fetch the volume-sorted token list
    pub async fn token_list(&self) -> Result<Vec<BirdeyeToken>, SourceError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                SourceError::Config(
                    "Birdeye API key not configured - set BIRDEYE_API_KEY to enable this source"
                        .to_string(),
                )
            })?;

        let url = format!("{}/defi/tokenlist", self.config.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("sort_by", "v24hUSD"),
                ("sort_type", "desc"),
                ("offset", "0"),
                ("limit", &self.config.limit.to_string()),
            ])
            .header("X-API-KEY", api_key)
            .header("x-chain", self.config.chain.as_str())
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
            .json::<TokenListResponse>()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        if !parsed.success {
            return Err(SourceError::Parse(
                "Birdeye reported success=false".to_string(),
            ));
        }

        Ok(parsed.data.map(|d| d.tokens).unwrap_or_default())
    }
}

#[async_trait]
impl TokenSource for BirdeyeClient {
    fn name(&self) -> &'static str {
        super::SOURCE_NAME
    }

    async fn fetch_tokens(&self) -> Result<Vec<NormalizedToken>, SourceError> {
        let tokens = self.token_list().await?;
        Ok(tokens.iter().map(BirdeyeToken::normalize).collect())
    }
}
