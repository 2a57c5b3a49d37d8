//! Jupiter Adapter
//!
//! Client and wire types for the Jupiter DEX aggregator quote and
//! swap-build endpoints.

mod client;
mod quote;
mod swap;

pub use client::{JupiterClient, JupiterConfig, JupiterError};
pub use quote::{QuoteRequest, QuoteResponse, RoutePlanStep, SwapInfo};
pub use swap::{SwapRequest, SwapResponse};
