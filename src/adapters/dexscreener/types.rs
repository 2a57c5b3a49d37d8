//! DexScreener Types
//!
//! Wire shapes for the DexScreener pair endpoints. Numbers that
//! DexScreener delivers as strings (notably `priceUsd`) stay strings
//! here and are coerced during normalization.

use serde::{Deserialize, Serialize};

use crate::domain::token::{parse_f64, NormalizedToken};

/// Envelope returned by the search and token-pairs endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairsResponse {
    #[serde(default)]
    pub schema_version: Option<String>,
    /// `null` when the token has no indexed pairs
    #[serde(default)]
    pub pairs: Option<Vec<DexPair>>,
}

/// One trading pair
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexPair {
    #[serde(default)]
    pub chain_id: Option<String>,
    #[serde(default)]
    pub dex_id: Option<String>,
    #[serde(default)]
    pub pair_address: Option<String>,
    #[serde(default)]
    pub base_token: Option<PairToken>,
    #[serde(default)]
    pub quote_token: Option<PairToken>,
    /// Stringly-typed price, e.g. "0.0423"
    #[serde(default)]
    pub price_usd: Option<String>,
    #[serde(default)]
    pub volume: Option<VolumeWindows>,
    #[serde(default)]
    pub price_change: Option<ChangeWindows>,
    #[serde(default)]
    pub liquidity: Option<PairLiquidity>,
    /// Fully diluted valuation, used when `marketCap` is absent
    #[serde(default)]
    pub fdv: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    /// Pair creation time in Unix milliseconds
    #[serde(default)]
    pub pair_created_at: Option<i64>,
}

/// Base or quote side of a pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairToken {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

/// Rolling volume windows in USD
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeWindows {
    #[serde(default)]
    pub h24: Option<f64>,
    #[serde(default)]
    pub h6: Option<f64>,
    #[serde(default)]
    pub h1: Option<f64>,
}

/// Rolling price-change windows in percent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeWindows {
    #[serde(default)]
    pub h24: Option<f64>,
    #[serde(default)]
    pub h6: Option<f64>,
    #[serde(default)]
    pub h1: Option<f64>,
}

/// Pooled liquidity breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairLiquidity {
    #[serde(default)]
    pub usd: Option<f64>,
    #[serde(default)]
    pub base: Option<f64>,
    #[serde(default)]
    pub quote: Option<f64>,
}

impl DexPair {
    /// Maps the pair onto its base token's normalized record.
    ///
    /// Returns `None` when the pair carries no base token address, since
    /// such a record could never be deduplicated or looked up.
    pub fn normalize(&self) -> Option<NormalizedToken> {
        let base = self.base_token.as_ref()?;
        let address = base.address.as_deref()?.trim();
        if address.is_empty() {
            return None;
        }

        Some(NormalizedToken {
            address: address.to_string(),
            symbol: base.symbol.clone(),
            name: base.name.clone(),
            price_usd: parse_f64(self.price_usd.as_deref()),
            volume_24h: self.volume.as_ref().and_then(|v| v.h24),
            liquidity: self.liquidity.as_ref().and_then(|l| l.usd),
            market_cap: self.market_cap.or(self.fdv),
            price_change_24h: self.price_change.as_ref().and_then(|c| c.h24),
            pair_address: self.pair_address.clone(),
            dex_id: self.dex_id.clone(),
            created_at: self.pair_created_at.map(|ms| ms / 1000),
            decimals: None,
            source: super::SOURCE_NAME.to_string(),
        })
    }

    /// Parsed USD price, when present and well formed
    pub fn price(&self) -> Option<f64> {
        parse_f64(self.price_usd.as_deref())
    }
}

/// Picks the pair with the deepest USD liquidity.
///
/// DexScreener does not guarantee ordering, and thin pairs quote wild
/// prices, so the deepest pool is the sanest price anchor.
pub fn best_pair(pairs: &[DexPair]) -> Option<&DexPair> {
    pairs.iter().max_by(|a, b| {
        let liq_a = a.liquidity.as_ref().and_then(|l| l.usd).unwrap_or(0.0);
        let liq_b = b.liquidity.as_ref().and_then(|l| l.usd).unwrap_or(0.0);
        liq_a.total_cmp(&liq_b)
    })
}
