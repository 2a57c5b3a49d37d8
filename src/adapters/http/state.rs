//! Shared Application State
//!
//! Everything route handlers need: the aggregator with its registered
//! sources, the clients used directly by single-source endpoints, and
//! server metadata for the health descriptor.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::adapters::birdeye::{BirdeyeClient, BirdeyeConfig};
use crate::adapters::dexscreener::{DexScreenerClient, DexScreenerConfig};
use crate::adapters::gecko_terminal::{GeckoTerminalClient, GeckoTerminalConfig};
use crate::adapters::jupiter::{JupiterClient, JupiterConfig};
use crate::adapters::pump_fun::{PumpFunClient, PumpFunConfig};
use crate::application::TokenAggregator;
use crate::config::Config;
use crate::ports::{SourceError, TokenSource};

/// Shared state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
    /// Fan-out aggregator over the enabled sources
    pub aggregator: Arc<TokenAggregator>,
    /// pump.fun client for the fallback and passthrough endpoints
    pub pump_fun: Arc<PumpFunClient>,
    /// DexScreener client for fallback and pair lookups
    pub dexscreener: Arc<DexScreenerClient>,
    /// Jupiter client for quote/swap passthrough
    pub jupiter: Arc<JupiterClient>,
    /// Server startup time
    pub started_at: DateTime<Utc>,
    /// Crate version reported by the health endpoint
    pub version: &'static str,
}

impl AppState {
    /// Build clients and register enabled sources from configuration.
    ///
    /// `sources.enabled` order is merge-priority order: the aggregator
    /// processes sources in this order and later sources win ties.
    pub fn from_config(config: &Config) -> Result<Self, SourceError> {
        let timeout = config.sources.timeout();

        let pump_fun = Arc::new(PumpFunClient::with_config(PumpFunConfig {
            base_url: config.sources.pump_fun_url.clone(),
            timeout,
            limit: config.sources.pump_limit,
            include_nsfw: false,
        })?);

        let dexscreener = Arc::new(DexScreenerClient::with_config(DexScreenerConfig {
            base_url: config.sources.dexscreener_url.clone(),
            timeout,
            search_query: config.sources.dexscreener_query.clone(),
        })?);

        let mut sources: Vec<Arc<dyn TokenSource>> = Vec::new();
        for name in &config.sources.enabled {
            match name.as_str() {
                crate::adapters::pump_fun::SOURCE_NAME => {
                    sources.push(pump_fun.clone());
                }
                crate::adapters::dexscreener::SOURCE_NAME => {
                    sources.push(dexscreener.clone());
                }
                crate::adapters::gecko_terminal::SOURCE_NAME => {
                    let client = GeckoTerminalClient::with_config(GeckoTerminalConfig {
                        base_url: config.sources.gecko_terminal_url.clone(),
                        timeout,
                        ..GeckoTerminalConfig::default()
                    })?;
                    sources.push(Arc::new(client));
                }
                crate::adapters::birdeye::SOURCE_NAME => {
                    let client = BirdeyeClient::with_config(BirdeyeConfig {
                        base_url: config.sources.birdeye_url.clone(),
                        timeout,
                        api_key: config.sources.effective_birdeye_key(),
                        limit: config.sources.birdeye_limit,
                        ..BirdeyeConfig::default()
                    })?;
                    sources.push(Arc::new(client));
                }
                other => {
                    return Err(SourceError::Config(format!(
                        "unknown source '{}' in sources.enabled",
                        other
                    )));
                }
            }
        }

        let aggregator = Arc::new(TokenAggregator::new(sources));
        info!(
            sources = ?aggregator.source_names(),
            "Registered token sources"
        );

        let jupiter = JupiterClient::new(JupiterConfig {
            api_base_url: config.jupiter.api_base_url.clone(),
            api_key: config.jupiter.get_api_key(),
            timeout: Duration::from_secs(config.jupiter.timeout_secs),
        })
        .map_err(|e| SourceError::Config(e.to_string()))?;

        Ok(Self {
            aggregator,
            pump_fun,
            dexscreener,
            jupiter: Arc::new(jupiter),
            started_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION"),
        })
    }

    /// Seconds since the server started
    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds().max(0)
    }
}
