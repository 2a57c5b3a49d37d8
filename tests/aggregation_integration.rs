//! Relay Integration Tests
//!
//! Integration tests that verify the relay components work together:
//! 1. TokenSource mocks -> TokenAggregator merge semantics
//! 2. fetch_with_fallback source selection
//! 3. AppState -> router -> HTTP response envelopes
//!
//! All tests are deterministic (no real network calls) and use mock data.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use tokenrelay::adapters::dexscreener::DexScreenerClient;
use tokenrelay::adapters::http::{create_router, AppState};
use tokenrelay::adapters::jupiter::{JupiterClient, JupiterConfig};
use tokenrelay::adapters::pump_fun::PumpFunClient;
use tokenrelay::application::{fetch_with_fallback, TokenAggregator};
use tokenrelay::config::Config;
use tokenrelay::domain::token::NormalizedToken;
use tokenrelay::ports::mocks::{token_record, MockTokenSource};
use tokenrelay::ports::{SourceError, TokenSource};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Create a record with the first `populated` optional fields filled
fn create_rich_record(address: &str, source: &str, populated: usize) -> NormalizedToken {
    let mut token = token_record(address, source);
    if populated >= 1 {
        token.symbol = Some(format!("{}SYM", source.to_uppercase()));
    }
    if populated >= 2 {
        token.name = Some("Integration Token".to_string());
    }
    if populated >= 3 {
        token.price_usd = Some(0.042);
    }
    if populated >= 4 {
        token.volume_24h = Some(10_000.0);
    }
    if populated >= 5 {
        token.liquidity = Some(55_000.0);
    }
    if populated >= 6 {
        token.market_cap = Some(1_000_000.0);
    }
    token
}

/// App state with mock sources behind the aggregator. The real API
/// clients are present but no test below routes a request at them.
fn create_app_state(sources: Vec<Arc<dyn TokenSource>>) -> AppState {
    AppState {
        aggregator: Arc::new(TokenAggregator::new(sources)),
        pump_fun: Arc::new(PumpFunClient::new().unwrap()),
        dexscreener: Arc::new(DexScreenerClient::new().unwrap()),
        jupiter: Arc::new(JupiterClient::new(JupiterConfig::default()).unwrap()),
        started_at: Utc::now(),
        version: env!("CARGO_PKG_VERSION"),
    }
}

fn create_app(sources: Vec<Arc<dyn TokenSource>>) -> Router {
    create_router(create_app_state(sources))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

// ============================================================================
// Aggregator Merge Semantics
// ============================================================================

mod merge_semantics {
    use super::*;

    #[tokio::test]
    async fn test_distinct_addresses_accumulate() {
        let aggregator = TokenAggregator::new(vec![
            Arc::new(
                MockTokenSource::new("pumpfun")
                    .with_tokens(vec![token_record("Mint1", "pumpfun")]),
            ),
            Arc::new(
                MockTokenSource::new("dexscreener")
                    .with_tokens(vec![token_record("Mint2", "dexscreener")]),
            ),
        ]);

        let result = aggregator.aggregate().await;

        assert_eq!(result.count(), 2);
        assert_eq!(result.sources, vec!["pumpfun", "dexscreener"]);
    }

    #[tokio::test]
    async fn test_collision_keeps_richer_record() {
        let aggregator = TokenAggregator::new(vec![
            Arc::new(
                MockTokenSource::new("poor")
                    .with_tokens(vec![create_rich_record("SameMint", "poor", 2)]),
            ),
            Arc::new(
                MockTokenSource::new("rich")
                    .with_tokens(vec![create_rich_record("SameMint", "rich", 5)]),
            ),
        ]);

        let result = aggregator.aggregate().await;

        assert_eq!(result.count(), 1);
        assert_eq!(result.tokens[0].source, "rich");
        assert_eq!(result.tokens[0].liquidity, Some(55_000.0));
    }

    #[tokio::test]
    async fn test_richer_record_survives_either_registration_order() {
        let aggregator = TokenAggregator::new(vec![
            Arc::new(
                MockTokenSource::new("rich")
                    .with_tokens(vec![create_rich_record("SameMint", "rich", 5)]),
            ),
            Arc::new(
                MockTokenSource::new("poor")
                    .with_tokens(vec![create_rich_record("SameMint", "poor", 2)]),
            ),
        ]);

        let result = aggregator.aggregate().await;

        assert_eq!(result.count(), 1);
        assert_eq!(result.tokens[0].source, "rich");
    }

    #[tokio::test]
    async fn test_collision_tie_prefers_later_source() {
        let aggregator = TokenAggregator::new(vec![
            Arc::new(
                MockTokenSource::new("first")
                    .with_tokens(vec![create_rich_record("SameMint", "first", 3)]),
            ),
            Arc::new(
                MockTokenSource::new("second")
                    .with_tokens(vec![create_rich_record("SameMint", "second", 3)]),
            ),
        ]);

        let result = aggregator.aggregate().await;

        assert_eq!(result.count(), 1);
        assert_eq!(result.tokens[0].source, "second");
    }

    #[tokio::test]
    async fn test_addresses_collapse_case_insensitively() {
        let aggregator = TokenAggregator::new(vec![
            Arc::new(
                MockTokenSource::new("a").with_tokens(vec![token_record("AbCd1234", "a")]),
            ),
            Arc::new(
                MockTokenSource::new("b").with_tokens(vec![token_record("abcd1234", "b")]),
            ),
        ]);

        let result = aggregator.aggregate().await;
        assert_eq!(result.count(), 1);
    }

    #[tokio::test]
    async fn test_failed_source_does_not_poison_merge() {
        let aggregator = TokenAggregator::new(vec![
            Arc::new(MockTokenSource::new("down").with_error(SourceError::Timeout(
                "deadline elapsed".to_string(),
            ))),
            Arc::new(
                MockTokenSource::new("up").with_tokens(vec![token_record("Mint1", "up")]),
            ),
        ]);

        let result = aggregator.aggregate().await;

        assert_eq!(result.count(), 1);
        assert_eq!(result.tokens[0].source, "up");
        assert_eq!(result.sources, vec!["down", "up"]);
    }
}

// ============================================================================
// Fallback Source Selection
// ============================================================================

mod fallback_selection {
    use super::*;

    #[tokio::test]
    async fn test_healthy_primary_short_circuits() {
        let primary = MockTokenSource::new("pumpfun")
            .with_tokens(vec![token_record("Mint1", "pumpfun")]);
        let secondary = MockTokenSource::new("dexscreener")
            .with_tokens(vec![token_record("Mint2", "dexscreener")]);

        let outcome = fetch_with_fallback(
            primary.name(),
            primary.fetch_tokens(),
            secondary.name(),
            secondary.fetch_tokens(),
        )
        .await
        .unwrap();

        assert_eq!(outcome.source, "pumpfun");
        assert_eq!(outcome.tokens.len(), 1);
        // the secondary future was never polled
        assert_eq!(secondary.call_count(), 0);
    }

    #[tokio::test]
    async fn test_primary_error_selects_secondary() {
        let primary = MockTokenSource::new("pumpfun")
            .with_error(SourceError::Status {
                code: 530,
                message: "origin unreachable".to_string(),
            });
        let secondary = MockTokenSource::new("dexscreener")
            .with_tokens(vec![token_record("Mint2", "dexscreener")]);

        let outcome = fetch_with_fallback(
            primary.name(),
            primary.fetch_tokens(),
            secondary.name(),
            secondary.fetch_tokens(),
        )
        .await
        .unwrap();

        assert_eq!(outcome.source, "dexscreener");
        assert_eq!(primary.call_count(), 1);
        assert_eq!(secondary.call_count(), 1);
    }

    #[tokio::test]
    async fn test_primary_empty_selects_secondary() {
        let primary = MockTokenSource::new("pumpfun");
        let secondary = MockTokenSource::new("dexscreener")
            .with_tokens(vec![token_record("Mint2", "dexscreener")]);

        let outcome = fetch_with_fallback(
            primary.name(),
            primary.fetch_tokens(),
            secondary.name(),
            secondary.fetch_tokens(),
        )
        .await
        .unwrap();

        assert_eq!(outcome.source, "dexscreener");
    }

    #[tokio::test]
    async fn test_secondary_failure_surfaces_error() {
        let primary = MockTokenSource::new("pumpfun")
            .with_error(SourceError::Network("connection refused".to_string()));
        let secondary = MockTokenSource::new("dexscreener")
            .with_error(SourceError::Status {
                code: 429,
                message: "rate limited".to_string(),
            });

        let result = fetch_with_fallback(
            primary.name(),
            primary.fetch_tokens(),
            secondary.name(),
            secondary.fetch_tokens(),
        )
        .await;

        assert_eq!(
            result.unwrap_err(),
            SourceError::Status {
                code: 429,
                message: "rate limited".to_string()
            }
        );
    }
}

// ============================================================================
// HTTP Response Envelopes
// ============================================================================

mod http_envelopes {
    use super::*;

    #[tokio::test]
    async fn test_aggregated_envelope_shape() {
        let app = create_app(vec![
            Arc::new(
                MockTokenSource::new("pumpfun")
                    .with_tokens(vec![create_rich_record("Mint1", "pumpfun", 4)]),
            ),
            Arc::new(
                MockTokenSource::new("birdeye")
                    .with_tokens(vec![create_rich_record("Mint2", "birdeye", 2)]),
            ),
        ]);

        let (status, body) = get_json(app, "/api/coins/aggregated").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["count"], 2);
        assert_eq!(body["sources"], json!(["pumpfun", "birdeye"]));
        assert_eq!(body["tokens"].as_array().unwrap().len(), 2);

        let timestamp = body["timestamp"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());
    }

    #[tokio::test]
    async fn test_collision_resolution_visible_through_http() {
        let app = create_app(vec![
            Arc::new(
                MockTokenSource::new("poor")
                    .with_tokens(vec![create_rich_record("SameMint", "poor", 2)]),
            ),
            Arc::new(
                MockTokenSource::new("rich")
                    .with_tokens(vec![create_rich_record("SameMint", "rich", 6)]),
            ),
        ]);

        let (status, body) = get_json(app, "/api/coins/aggregated").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);
        assert_eq!(body["tokens"][0]["source"], "rich");
        assert_eq!(body["tokens"][0]["symbol"], "RICHSYM");
        assert_eq!(body["tokens"][0]["marketCap"], 1_000_000.0);
    }

    #[tokio::test]
    async fn test_all_sources_failed_is_500() {
        let app = create_app(vec![
            Arc::new(MockTokenSource::new("down1").with_error(SourceError::Network(
                "connection refused".to_string(),
            ))),
            Arc::new(MockTokenSource::new("down2").with_error(SourceError::Timeout(
                "deadline elapsed".to_string(),
            ))),
        ]);

        let (status, body) = get_json(app, "/api/coins/aggregated").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "All sources failed");
        assert!(body["message"].is_string());
        assert!(body["suggestion"].is_string());
    }

    #[tokio::test]
    async fn test_health_endpoint_reports_online() {
        let app = create_app(vec![]);
        let (status, body) = get_json(app, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "online");
        assert_eq!(body["service"], "tokenrelay");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert!(body["uptimeSecs"].as_i64().unwrap() >= 0);
    }

    #[tokio::test]
    async fn test_malformed_address_is_rejected_before_any_fetch() {
        let app = create_app(vec![]);
        let (status, body) = get_json(app, "/api/coin/l1l1l1-not-base58").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid address");
        assert!(body["message"].as_str().unwrap().contains("l1l1l1-not-base58"));
    }

    #[tokio::test]
    async fn test_quote_rejects_malformed_mint() {
        let app = create_app(vec![]);
        let (status, body) = post_json(
            app,
            "/api/jupiter/quote",
            json!({
                "inputMint": "definitely-not-a-mint",
                "outputMint": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
                "amount": 1_000_000u64
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid address");
    }

    #[tokio::test]
    async fn test_swap_rejects_scalar_quote_response() {
        let app = create_app(vec![]);
        let (status, body) = post_json(
            app,
            "/api/jupiter/swap",
            json!({
                "userPublicKey": "So11111111111111111111111111111111111111112",
                "quoteResponse": 42
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid quoteResponse");
    }

    #[tokio::test]
    async fn test_price_history_rejects_unknown_interval() {
        let app = create_app(vec![]);
        let (status, body) = get_json(
            app,
            "/api/price-history/So11111111111111111111111111111111111111112?interval=3w",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid interval");
        assert!(body["message"].as_str().unwrap().contains("1h"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = create_app(vec![]);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/not-a-route")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

// ============================================================================
// Config -> State Wiring
// ============================================================================

mod config_wiring {
    use super::*;

    #[tokio::test]
    async fn test_default_config_serves_health() {
        let state = AppState::from_config(&Config::default()).unwrap();
        assert_eq!(
            state.aggregator.source_names(),
            vec!["pumpfun", "dexscreener", "geckoterminal", "birdeye"]
        );

        let app = create_router(state);
        let (status, body) = get_json(app, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }
}
