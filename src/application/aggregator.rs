//! Token Aggregator
//!
//! Fans out to every registered source concurrently, waits for all of
//! them to settle, and merges the results into one record per token
//! address. A failing source contributes an empty list and never aborts
//! the others. The accumulator is local to each call; nothing is shared
//! across requests.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;

use crate::domain::token::NormalizedToken;
use crate::ports::token_source::TokenSource;

/// Merged output of one aggregation pass.
///
/// `tokens` is an unordered set, one record per unique case-folded
/// address. `sources` lists every registered source name in registration
/// order, whether or not it succeeded.
#[derive(Debug, Clone, Serialize)]
pub struct AggregationResult {
    pub tokens: Vec<NormalizedToken>,
    pub sources: Vec<String>,
}

impl AggregationResult {
    pub fn count(&self) -> usize {
        self.tokens.len()
    }
}

/// Runs registered sources concurrently and merges their records.
///
/// Registration order doubles as merge processing order: when two
/// records for the same address carry an equal number of populated
/// fields, the one from the later-registered source survives. A record
/// with strictly more populated fields always survives regardless of
/// order.
pub struct TokenAggregator {
    sources: Vec<Arc<dyn TokenSource>>,
}

impl TokenAggregator {
    pub fn new(sources: Vec<Arc<dyn TokenSource>>) -> Self {
        Self { sources }
    }

    /// Registered source names, in registration order
    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name().to_string()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// One full fetch+merge cycle.
    ///
    /// Dispatches all sources concurrently and joins without
    /// short-circuiting; a source error becomes an empty contribution.
    /// Records lacking an address are dropped before deduplication.
    pub async fn aggregate(&self) -> AggregationResult {
        let fetches = self.sources.iter().map(|source| {
            let source = Arc::clone(source);
            async move {
                let name = source.name();
                (name, source.fetch_tokens().await)
            }
        });

        let outcomes = join_all(fetches).await;

        let mut merged: HashMap<String, NormalizedToken> = HashMap::new();
        let mut dropped = 0usize;

        for (name, outcome) in outcomes {
            let records = match outcome {
                Ok(records) => {
                    tracing::debug!("Source '{}' contributed {} records", name, records.len());
                    records
                }
                Err(err) => {
                    tracing::warn!("Source '{}' failed: {} - contributing empty result", name, err);
                    Vec::new()
                }
            };

            for token in records {
                let Some(key) = token.dedup_key() else {
                    dropped += 1;
                    continue;
                };
                match merged.entry(key) {
                    Entry::Vacant(slot) => {
                        slot.insert(token);
                    }
                    Entry::Occupied(mut slot) => {
                        // strictly richer record wins; equal richness goes
                        // to the later-processed source
                        if token.populated_fields() >= slot.get().populated_fields() {
                            slot.insert(token);
                        }
                    }
                }
            }
        }

        if dropped > 0 {
            tracing::debug!("Dropped {} records without an address", dropped);
        }

        AggregationResult {
            tokens: merged.into_values().collect(),
            sources: self.source_names(),
        }
    }
}
