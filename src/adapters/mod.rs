//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits plus the
//! inbound surfaces:
//! - pump.fun / DexScreener / GeckoTerminal / Birdeye: token sources
//! - Jupiter: DEX aggregator quote/swap passthrough client
//! - HTTP: axum router serving the proxy endpoints
//! - CLI: command-line interface handlers

pub mod birdeye;
pub mod cli;
pub mod dexscreener;
pub mod gecko_terminal;
pub mod http;
pub mod jupiter;
pub mod pump_fun;

pub use birdeye::BirdeyeClient;
pub use cli::CliApp;
pub use dexscreener::DexScreenerClient;
pub use gecko_terminal::GeckoTerminalClient;
pub use jupiter::JupiterClient;
pub use pump_fun::PumpFunClient;

use crate::ports::token_source::SourceError;

/// Maps a transport-level reqwest failure onto the source error taxonomy.
pub(crate) fn classify_transport_error(err: reqwest::Error) -> SourceError {
    if err.is_timeout() {
        SourceError::Timeout(err.to_string())
    } else if err.is_decode() {
        SourceError::Parse(err.to_string())
    } else {
        SourceError::Network(err.to_string())
    }
}

/// First 300 chars of an upstream error body, enough to diagnose without
/// echoing entire HTML error pages into logs and responses.
pub(crate) fn body_snippet(body: &str) -> String {
    body.chars().take(300).collect()
}
