//! Domain Layer - Core types for token aggregation
//!
//! This module contains pure domain types and logic with no external
//! dependencies. All external interactions happen through the ports layer.
//!
//! - `token`: the `NormalizedToken` record every source maps into, plus
//!   the dedup-key and field-count rules the merge step relies on
//! - `candle`: synthetic OHLCV candle generation (placeholder history)

pub mod candle;
pub mod token;

pub use candle::{synthetic_history, Candle, CandleInterval};
pub use token::NormalizedToken;
