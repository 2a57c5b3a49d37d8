//! tokenrelay - CORS-friendly relay for Solana token data APIs
//!
//! Fetches token listings from public APIs that browsers cannot call
//! directly, normalizes them into one record shape, and serves them over
//! HTTP with per-request multi-source aggregation. Also relays Jupiter
//! quote/swap requests and fabricates synthetic price history for charts.
//!
//! # Modules
//!
//! - `domain`: Core types (NormalizedToken, synthetic candles)
//! - `ports`: Trait abstractions (TokenSource)
//! - `adapters`: External implementations (pump.fun, DexScreener,
//!   GeckoTerminal, Birdeye, Jupiter, HTTP server, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: Aggregation and fallback use cases

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
