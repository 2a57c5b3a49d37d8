pub mod aggregator;
pub mod fallback;

pub use aggregator::{AggregationResult, TokenAggregator};
pub use fallback::{fetch_with_fallback, FallbackOutcome};
