//! Normalized Token Record
//!
//! The common shape every source adapter maps its response into. A record
//! is keyed by chain address (case-insensitive); all market fields are
//! optional and omitted from JSON when a source did not supply them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A token record normalized from one external source.
///
/// `address` and `source` are always present. Everything else depends on
/// what the upstream API returned; missing or unparseable values stay
/// `None` rather than being zero-filled, so field counts reflect real
/// data coverage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedToken {
    /// Chain address / mint identifier (dedup key, case-insensitive)
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Last traded price in USD
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_usd: Option<f64>,
    /// Trailing 24h volume in USD
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_24h: Option<f64>,
    /// Pooled liquidity in USD
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liquidity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
    /// 24h price change in percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_change_24h: Option<f64>,
    /// Trading pair address, when the source reports per-pair data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair_address: Option<String>,
    /// DEX identifier (e.g. "raydium"), when the source reports it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dex_id: Option<String>,
    /// Token creation time, Unix seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,
    /// Name of the adapter that produced this record
    pub source: String,
}

impl NormalizedToken {
    /// Counts populated optional fields.
    ///
    /// Used as the merge tie-break metric: when two sources report the
    /// same address, the record with more populated fields survives.
    /// `address` and `source` are always present and not counted.
    pub fn populated_fields(&self) -> usize {
        let mut count = 0;
        if self.symbol.is_some() {
            count += 1;
        }
        if self.name.is_some() {
            count += 1;
        }
        if self.price_usd.is_some() {
            count += 1;
        }
        if self.volume_24h.is_some() {
            count += 1;
        }
        if self.liquidity.is_some() {
            count += 1;
        }
        if self.market_cap.is_some() {
            count += 1;
        }
        if self.price_change_24h.is_some() {
            count += 1;
        }
        if self.pair_address.is_some() {
            count += 1;
        }
        if self.dex_id.is_some() {
            count += 1;
        }
        if self.created_at.is_some() {
            count += 1;
        }
        if self.decimals.is_some() {
            count += 1;
        }
        count
    }

    /// Case-folded dedup key, or `None` when the address is empty.
    ///
    /// Records without an address cannot be deduplicated or looked up
    /// downstream, so the aggregator drops them.
    pub fn dedup_key(&self) -> Option<String> {
        let trimmed = self.address.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        }
    }
}

impl fmt::Display for NormalizedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] from {}",
            self.symbol.as_deref().unwrap_or("?"),
            self.address,
            self.source
        )
    }
}

/// Parses a numeric field a source delivered as a string (e.g. "0.0423").
///
/// Returns `None` for missing, empty, or unparseable input so callers
/// never invent values the source did not supply.
pub fn parse_f64(value: Option<&str>) -> Option<f64> {
    let raw = value?.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}
