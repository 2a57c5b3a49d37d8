use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::token::NormalizedToken;
use crate::ports::token_source::{SourceError, TokenSource};

/// Mock token source that records calls and returns configured responses
#[derive(Debug)]
pub struct MockTokenSource {
    name: &'static str,
    tokens: Vec<NormalizedToken>,
    error: Option<SourceError>,
    calls: Arc<Mutex<usize>>,
}

impl MockTokenSource {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            tokens: Vec::new(),
            error: None,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Builder method to set the records this source returns
    pub fn with_tokens(mut self, tokens: Vec<NormalizedToken>) -> Self {
        self.tokens = tokens;
        self
    }

    /// Builder method to make every fetch fail with the given error
    pub fn with_error(mut self, error: SourceError) -> Self {
        self.error = Some(error);
        self
    }

    /// Number of times `fetch_tokens` was invoked
    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl TokenSource for MockTokenSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch_tokens(&self) -> Result<Vec<NormalizedToken>, SourceError> {
        *self.calls.lock().unwrap() += 1;
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(self.tokens.clone()),
        }
    }
}

/// Bare record with only `address` and `source` set, for merge tests
pub fn token_record(address: &str, source: &str) -> NormalizedToken {
    NormalizedToken {
        address: address.to_string(),
        symbol: None,
        name: None,
        price_usd: None,
        volume_24h: None,
        liquidity: None,
        market_cap: None,
        price_change_24h: None,
        pair_address: None,
        dex_id: None,
        created_at: None,
        decimals: None,
        source: source.to_string(),
    }
}
