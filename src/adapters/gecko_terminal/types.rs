//! GeckoTerminal Types
//!
//! Wire shapes for the GeckoTerminal v2 API (JSON:API style). Every
//! numeric attribute arrives as a string; the base token address hides
//! in a relationship id of the form `"{network}_{address}"`.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::domain::token::{parse_f64, NormalizedToken};

/// Envelope for pool list endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct TrendingPoolsResponse {
    #[serde(default)]
    pub data: Vec<GeckoPool>,
}

/// One pool document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeckoPool {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub attributes: Option<PoolAttributes>,
    #[serde(default)]
    pub relationships: Option<PoolRelationships>,
}

/// Pool attributes; numerics are strings on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolAttributes {
    /// Pool display name, e.g. "WIF / SOL"
    #[serde(default)]
    pub name: Option<String>,
    /// Pool (pair) address
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub base_token_price_usd: Option<String>,
    #[serde(default)]
    pub volume_usd: Option<GeckoWindows>,
    #[serde(default)]
    pub reserve_in_usd: Option<String>,
    #[serde(default)]
    pub fdv_usd: Option<String>,
    #[serde(default)]
    pub market_cap_usd: Option<String>,
    #[serde(default)]
    pub price_change_percentage: Option<GeckoWindows>,
    /// ISO-8601 creation time
    #[serde(default)]
    pub pool_created_at: Option<String>,
}

/// Rolling windows keyed by duration, string-valued
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeckoWindows {
    #[serde(default)]
    pub h24: Option<String>,
    #[serde(default)]
    pub h6: Option<String>,
    #[serde(default)]
    pub h1: Option<String>,
    #[serde(default)]
    pub m5: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolRelationships {
    #[serde(default)]
    pub base_token: Option<Relationship>,
    #[serde(default)]
    pub quote_token: Option<Relationship>,
    #[serde(default)]
    pub dex: Option<Relationship>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub data: Option<RelationshipData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipData {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Strips the network prefix from a relationship id
/// (`"solana_MintAAA"` -> `"MintAAA"`).
fn strip_network_prefix(id: &str) -> Option<&str> {
    let (_, address) = id.split_once('_')?;
    let address = address.trim();
    if address.is_empty() {
        None
    } else {
        Some(address)
    }
}

impl GeckoPool {
    /// Maps the pool onto its base token's normalized record.
    ///
    /// Returns `None` when the base token relationship is missing or its
    /// id carries no address.
    pub fn normalize(&self) -> Option<NormalizedToken> {
        let base_id = self
            .relationships
            .as_ref()?
            .base_token
            .as_ref()?
            .data
            .as_ref()?
            .id
            .as_deref()?;
        let address = strip_network_prefix(base_id)?;

        let attrs = self.attributes.as_ref();
        let pool_name = attrs.and_then(|a| a.name.clone());
        // "WIF / SOL" -> symbol "WIF"
        let symbol = pool_name
            .as_deref()
            .and_then(|n| n.split(" / ").next())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let created_at = attrs
            .and_then(|a| a.pool_created_at.as_deref())
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| dt.timestamp());

        let dex_id = self
            .relationships
            .as_ref()
            .and_then(|r| r.dex.as_ref())
            .and_then(|d| d.data.as_ref())
            .and_then(|d| d.id.clone());

        Some(NormalizedToken {
            address: address.to_string(),
            symbol,
            name: pool_name,
            price_usd: attrs.and_then(|a| parse_f64(a.base_token_price_usd.as_deref())),
            volume_24h: attrs
                .and_then(|a| a.volume_usd.as_ref())
                .and_then(|w| parse_f64(w.h24.as_deref())),
            liquidity: attrs.and_then(|a| parse_f64(a.reserve_in_usd.as_deref())),
            market_cap: attrs.and_then(|a| {
                parse_f64(a.market_cap_usd.as_deref()).or_else(|| parse_f64(a.fdv_usd.as_deref()))
            }),
            price_change_24h: attrs
                .and_then(|a| a.price_change_percentage.as_ref())
                .and_then(|w| parse_f64(w.h24.as_deref())),
            pair_address: attrs.and_then(|a| a.address.clone()),
            dex_id,
            created_at,
            decimals: None,
            source: super::SOURCE_NAME.to_string(),
        })
    }
}
