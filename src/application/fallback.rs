//! Fallback Fetch
//!
//! Try a preferred source; on failure or an empty result, fall through
//! to a secondary source and return its result as-is. One attempt per
//! source per request, no retries.

use std::future::Future;

use crate::domain::token::NormalizedToken;
use crate::ports::token_source::SourceError;

/// Records served by a fallback fetch, tagged with the source that
/// actually produced them.
#[derive(Debug, Clone)]
pub struct FallbackOutcome {
    pub tokens: Vec<NormalizedToken>,
    pub source: String,
}

/// Awaits `primary` once; on error or empty result awaits `secondary`
/// once and returns its outcome even when empty. A secondary failure
/// propagates to the caller.
pub async fn fetch_with_fallback<P, S>(
    primary_name: &str,
    primary: P,
    secondary_name: &str,
    secondary: S,
) -> Result<FallbackOutcome, SourceError>
where
    P: Future<Output = Result<Vec<NormalizedToken>, SourceError>>,
    S: Future<Output = Result<Vec<NormalizedToken>, SourceError>>,
{
    match primary.await {
        Ok(tokens) if !tokens.is_empty() => {
            return Ok(FallbackOutcome {
                tokens,
                source: primary_name.to_string(),
            });
        }
        Ok(_) => {
            tracing::warn!(
                "Source '{}' returned no records - falling back to '{}'",
                primary_name,
                secondary_name
            );
        }
        Err(err) => {
            tracing::warn!(
                "Source '{}' failed: {} - falling back to '{}'",
                primary_name,
                err,
                secondary_name
            );
        }
    }

    let tokens = secondary.await?;
    Ok(FallbackOutcome {
        tokens,
        source: secondary_name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mocks::token_record;

    fn some_tokens(source: &str) -> Vec<NormalizedToken> {
        vec![token_record("Mint1", source), token_record("Mint2", source)]
    }

    #[tokio::test]
    async fn test_primary_success_skips_secondary() {
        let outcome = fetch_with_fallback(
            "primary",
            async { Ok(some_tokens("primary")) },
            "secondary",
            async {
                panic!("secondary must not run when primary succeeds");
            },
        )
        .await
        .unwrap();

        assert_eq!(outcome.source, "primary");
        assert_eq!(outcome.tokens.len(), 2);
    }

    #[tokio::test]
    async fn test_primary_error_falls_back() {
        let outcome = fetch_with_fallback(
            "primary",
            async { Err(SourceError::Network("refused".to_string())) },
            "secondary",
            async { Ok(some_tokens("secondary")) },
        )
        .await
        .unwrap();

        assert_eq!(outcome.source, "secondary");
        assert_eq!(outcome.tokens.len(), 2);
    }

    #[tokio::test]
    async fn test_primary_empty_falls_back() {
        let outcome = fetch_with_fallback(
            "primary",
            async { Ok(Vec::new()) },
            "secondary",
            async { Ok(some_tokens("secondary")) },
        )
        .await
        .unwrap();

        assert_eq!(outcome.source, "secondary");
    }

    #[tokio::test]
    async fn test_secondary_empty_is_still_returned() {
        let outcome = fetch_with_fallback(
            "primary",
            async { Err(SourceError::Timeout("5s".to_string())) },
            "secondary",
            async { Ok(Vec::new()) },
        )
        .await
        .unwrap();

        assert_eq!(outcome.source, "secondary");
        assert!(outcome.tokens.is_empty());
    }

    #[tokio::test]
    async fn test_both_failing_propagates_secondary_error() {
        let result = fetch_with_fallback(
            "primary",
            async { Err(SourceError::Network("refused".to_string())) },
            "secondary",
            async { Err(SourceError::Status { code: 502, message: "bad gateway".to_string() }) },
        )
        .await;

        assert_eq!(
            result.unwrap_err(),
            SourceError::Status {
                code: 502,
                message: "bad gateway".to_string()
            }
        );
    }
}
