//! pump.fun Types
//!
//! Data types for the pump.fun frontend coin board and their mapping
//! into normalized token records.

use serde::{Deserialize, Serialize};

use crate::domain::token::NormalizedToken;

/// One coin as listed by the pump.fun frontend API.
///
/// Only `mint` is required; the board payload varies and every other
/// field is tolerated as missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PumpFunCoin {
    /// Token mint address
    pub mint: String,
    /// Token name
    #[serde(default)]
    pub name: Option<String>,
    /// Token symbol
    #[serde(default)]
    pub symbol: Option<String>,
    /// Token description
    #[serde(default)]
    pub description: Option<String>,
    /// Token image URL
    #[serde(default)]
    pub image_uri: Option<String>,
    /// Creator wallet address
    #[serde(default)]
    pub creator: Option<String>,
    /// Creation time in Unix milliseconds
    #[serde(default)]
    pub created_timestamp: Option<i64>,
    /// Market cap in USD
    #[serde(default)]
    pub usd_market_cap: Option<f64>,
    /// Market cap in SOL (not used for normalization; USD field wins)
    #[serde(default)]
    pub market_cap: Option<f64>,
    /// Number of board replies
    #[serde(default)]
    pub reply_count: Option<u64>,
    #[serde(default)]
    pub nsfw: Option<bool>,
    /// Whether the bonding curve has graduated
    #[serde(default)]
    pub complete: Option<bool>,
}

impl PumpFunCoin {
    /// Maps the board entry into the common record shape.
    ///
    /// The board carries no price or volume, so those stay unset.
    /// `created_timestamp` arrives in milliseconds and is stored as
    /// Unix seconds.
    pub fn normalize(&self) -> NormalizedToken {
        NormalizedToken {
            address: self.mint.clone(),
            symbol: self.symbol.clone(),
            name: self.name.clone(),
            price_usd: None,
            volume_24h: None,
            liquidity: None,
            market_cap: self.usd_market_cap.filter(|v| v.is_finite()),
            price_change_24h: None,
            pair_address: None,
            dex_id: None,
            created_at: self.created_timestamp.map(|ms| ms / 1000),
            decimals: None,
            source: super::SOURCE_NAME.to_string(),
        }
    }
}
