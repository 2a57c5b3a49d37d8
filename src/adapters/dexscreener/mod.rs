//! DexScreener Adapter
//!
//! Registered token source (pair search) and live pair lookups for the
//! price-history endpoint. Secondary source for the fallback coins
//! endpoint.

mod client;
mod types;

/// Source label used in logs and record `source` fields
pub const SOURCE_NAME: &str = "dexscreener";

pub use client::{DexScreenerClient, DexScreenerConfig, DEFAULT_BASE_URL};
pub use types::{best_pair, DexPair, PairLiquidity, PairToken, PairsResponse};
