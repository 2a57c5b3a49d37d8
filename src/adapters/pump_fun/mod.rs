//! pump.fun Adapter
//!
//! REST access to the pump.fun frontend coin board. Serves two roles:
//! the primary source for the fallback coins endpoint (plus raw
//! single-coin passthrough) and one of the registered token sources for
//! aggregation.

mod client;
mod types;

/// Source label used in logs and record `source` fields
pub const SOURCE_NAME: &str = "pumpfun";

pub use client::{PumpFunClient, PumpFunConfig, DEFAULT_BASE_URL};
pub use types::PumpFunCoin;
