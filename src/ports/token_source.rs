use async_trait::async_trait;
use thiserror::Error;

use crate::domain::token::NormalizedToken;

/// Source adapter error type
///
/// Covers the three upstream failure classes (non-success status,
/// network/timeout, malformed body) plus local misconfiguration. The
/// aggregator converts any of these into an empty contribution; the
/// fallback combinator uses them to decide whether to try the secondary
/// source.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Upstream returned status {code}: {message}")]
    Status { code: u16, message: String },

    #[error("Response parsing error: {0}")]
    Parse(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// A token listing source.
///
/// One implementation per external API. `fetch_tokens` performs a single
/// outbound call with a bounded timeout and maps the response into
/// normalized records; it never retries. Failures surface as
/// `SourceError` so callers choose the policy (swallow for aggregation,
/// fall through for fallback fetch).
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Stable source label, used in logs and in record `source` fields
    fn name(&self) -> &'static str;

    /// Fetch and normalize one page of tokens from the upstream API
    async fn fetch_tokens(&self) -> Result<Vec<NormalizedToken>, SourceError>;
}
