//! GeckoTerminal Adapter
//!
//! Trending-pools token source backed by the GeckoTerminal v2 API.

mod client;
mod types;

/// Source label used in logs and record `source` fields
pub const SOURCE_NAME: &str = "geckoterminal";

pub use client::{GeckoTerminalClient, GeckoTerminalConfig, DEFAULT_BASE_URL};
pub use types::{GeckoPool, PoolAttributes, TrendingPoolsResponse};
