//! Birdeye Adapter
//!
//! Volume-sorted token list source. The only registered source that
//! needs an API key, and the richest one, so it is registered last and
//! wins equal-richness merge ties.

mod client;

/// Source label used in logs and record `source` fields
pub const SOURCE_NAME: &str = "birdeye";

pub use client::{BirdeyeClient, BirdeyeConfig, BirdeyeToken, DEFAULT_BASE_URL};
