//! Jupiter API Client
//!
//! HTTP client for the Jupiter aggregator quote and swap-build
//! endpoints. Requests are made once per call; upstream failures are
//! surfaced to the caller with the status and body Jupiter returned.

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use super::quote::{QuoteRequest, QuoteResponse};
use super::swap::{SwapRequest, SwapResponse};

/// Errors from the Jupiter API client
#[derive(Debug, Error)]
pub enum JupiterError {
    /// Transport-level failure (connect, timeout, TLS)
    #[error("Request failed: {0}")]
    Http(String),

    /// Jupiter responded with a non-success status
    #[error("Jupiter API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Response body could not be parsed
    #[error("Failed to parse Jupiter response: {0}")]
    Parse(String),

    /// Client misconfiguration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Configuration for the Jupiter client
#[derive(Debug, Clone)]
pub struct JupiterConfig {
    /// Base URL for the quote/swap API
    pub api_base_url: String,
    /// Optional API key for higher rate limits
    pub api_key: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for JupiterConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://quote-api.jup.ag/v6".to_string(),
            api_key: None,
            timeout: Duration::from_secs(10),
        }
    }
}

impl JupiterConfig {
    /// Set the API key
    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Set a custom base URL
    pub fn with_base_url(mut self, url: String) -> Self {
        self.api_base_url = url;
        self
    }
}

/// Client for the Jupiter aggregator API
pub struct JupiterClient {
    client: Client,
    config: JupiterConfig,
}

impl JupiterClient {
    /// Create a new Jupiter client
    pub fn new(config: JupiterConfig) -> Result<Self, JupiterError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| JupiterError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Base URL this client talks to
    pub fn api_base_url(&self) -> &str {
        &self.config.api_base_url
    }

    /// Fetch a swap quote
    pub async fn get_quote(&self, request: &QuoteRequest) -> Result<QuoteResponse, JupiterError> {
        let url = format!("{}/quote", self.config.api_base_url);

        debug!(
            input_mint = %request.input_mint,
            output_mint = %request.output_mint,
            amount = request.amount,
            "Requesting Jupiter quote"
        );

        let mut req = self.client.get(&url).query(&[
            ("inputMint", request.input_mint.as_str()),
            ("outputMint", request.output_mint.as_str()),
            ("amount", &request.amount.to_string()),
            ("slippageBps", &request.slippage_bps.to_string()),
        ]);

        if let Some(api_key) = &self.config.api_key {
            req = req.header("x-api-key", api_key);
        }

        let response = req
            .send()
            .await
            .map_err(|e| JupiterError::Http(e.to_string()))?;

        Self::handle_response(response).await
    }

    /// Build a swap transaction from a quote
    pub async fn get_swap_transaction(
        &self,
        request: &SwapRequest,
    ) -> Result<SwapResponse, JupiterError> {
        let url = format!("{}/swap", self.config.api_base_url);

        debug!(user = %request.user_public_key, "Requesting Jupiter swap transaction");

        let mut req = self.client.post(&url).json(request);

        if let Some(api_key) = &self.config.api_key {
            req = req.header("x-api-key", api_key);
        }

        let response = req
            .send()
            .await
            .map_err(|e| JupiterError::Http(e.to_string()))?;

        Self::handle_response(response).await
    }

    /// Check the status code, then deserialize the body
    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, JupiterError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                status.canonical_reason().unwrap_or("unknown").to_string()
            } else {
                crate::adapters::body_snippet(&body)
            };
            return Err(JupiterError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| JupiterError::Parse(e.to_string()))
    }
}
