//! API Routes
//!
//! All inbound endpoints. Single-source endpoints surface upstream
//! failures as 500 plus a remediation hint; the aggregated endpoint only
//! fails when every registered source came back empty. 400 is reserved
//! for malformed client input.

use axum::extract::{Path, Query, Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::adapters::dexscreener::{best_pair, DexPair};
use crate::adapters::jupiter::{QuoteRequest, QuoteResponse, SwapRequest, SwapResponse};
use crate::adapters::pump_fun::PumpFunCoin;
use crate::adapters::{dexscreener, pump_fun};
use crate::application::fetch_with_fallback;
use crate::domain::candle::{
    synthetic_history, Candle, CandleInterval, FALLBACK_BASE_PRICE, MAX_CANDLES,
};
use crate::domain::token::{parse_f64, NormalizedToken};
use crate::ports::TokenSource;

use super::error::ApiError;
use super::state::AppState;

/// Build the router with CORS (permissive: the relay exists so browser
/// clients can reach APIs that block them) and request logging.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/api/coins", get(get_coins))
        .route("/api/coins/aggregated", get(get_aggregated_coins))
        .route("/api/coin/:address", get(get_coin))
        .route("/api/jupiter/quote", post(post_jupiter_quote))
        .route("/api/jupiter/swap", post(post_jupiter_swap))
        .route("/api/price-history/:mint", get(get_price_history))
        .layer(middleware::from_fn(log_requests))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let response = next.run(req).await;
    info!("{} {} -> {}", method, path, response.status().as_u16());
    response
}

fn timestamp_now() -> String {
    Utc::now().to_rfc3339()
}

/// Reject strings that cannot be a Solana public key before any
/// upstream call is made
fn validate_solana_address(address: &str) -> Result<(), ApiError> {
    let bytes = bs58::decode(address).into_vec().map_err(|_| {
        ApiError::bad_request(
            "Invalid address",
            format!("'{}' is not valid base58", address),
        )
    })?;
    if bytes.len() != 32 {
        return Err(ApiError::bad_request(
            "Invalid address",
            format!("'{}' does not decode to a 32-byte public key", address),
        ));
    }
    Ok(())
}

// ==================== Health ====================

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "online",
        "service": "tokenrelay",
        "version": state.version,
        "uptimeSecs": state.uptime_secs(),
        "endpoints": {
            "coins": "GET /api/coins?limit=50&offset=0&includeNsfw=false",
            "aggregated": "GET /api/coins/aggregated",
            "coin": "GET /api/coin/:address",
            "jupiterQuote": "POST /api/jupiter/quote",
            "jupiterSwap": "POST /api/jupiter/swap",
            "priceHistory": "GET /api/price-history/:mint?interval=1m&limit=100"
        }
    }))
}

// ==================== Coins (fallback) ====================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CoinsQuery {
    limit: u32,
    offset: u32,
    include_nsfw: bool,
}

impl Default for CoinsQuery {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
            include_nsfw: false,
        }
    }
}

#[derive(Debug, Serialize)]
struct CoinsResponse {
    success: bool,
    source: String,
    count: usize,
    tokens: Vec<NormalizedToken>,
    timestamp: String,
}

async fn get_coins(
    State(state): State<AppState>,
    Query(params): Query<CoinsQuery>,
) -> Result<Json<CoinsResponse>, ApiError> {
    let CoinsQuery {
        limit,
        offset,
        include_nsfw,
    } = params;
    let pump_fun = state.pump_fun.clone();
    let dexscreener = state.dexscreener.clone();

    let outcome = fetch_with_fallback(
        pump_fun::SOURCE_NAME,
        async move {
            let coins = pump_fun.fetch_coins(limit, offset, include_nsfw).await?;
            Ok(coins.iter().map(PumpFunCoin::normalize).collect())
        },
        dexscreener::SOURCE_NAME,
        async move { dexscreener.fetch_tokens().await },
    )
    .await
    .map_err(|err| {
        ApiError::upstream("Failed to fetch coins", err.to_string()).with_suggestion(
            "Both pump.fun and DexScreener are unreachable - try again in a few seconds",
        )
    })?;

    let mut tokens = outcome.tokens;
    // the fallback source ignores paging, so cap its volume at the
    // requested page size
    tokens.truncate(limit as usize);

    Ok(Json(CoinsResponse {
        success: true,
        source: outcome.source,
        count: tokens.len(),
        tokens,
        timestamp: timestamp_now(),
    }))
}

// ==================== Coins (aggregated) ====================

#[derive(Debug, Serialize)]
struct AggregatedResponse {
    success: bool,
    count: usize,
    sources: Vec<String>,
    tokens: Vec<NormalizedToken>,
    timestamp: String,
}

async fn get_aggregated_coins(
    State(state): State<AppState>,
) -> Result<Json<AggregatedResponse>, ApiError> {
    let result = state.aggregator.aggregate().await;

    // per-source failures were already absorbed as empty contributions;
    // only a fully empty merge is an error
    if result.tokens.is_empty() {
        return Err(ApiError::upstream(
            "All sources failed",
            "Every registered source returned no records",
        )
        .with_suggestion("Upstream APIs may be rate limiting or down - retry shortly"));
    }

    Ok(Json(AggregatedResponse {
        success: true,
        count: result.count(),
        sources: result.sources,
        tokens: result.tokens,
        timestamp: timestamp_now(),
    }))
}

// ==================== Single coin passthrough ====================

async fn get_coin(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<Value>, ApiError> {
    validate_solana_address(&address)?;

    let coin = state.pump_fun.fetch_coin(&address).await.map_err(|err| {
        ApiError::upstream("Failed to fetch coin", err.to_string()).with_suggestion(format!(
            "Verify the mint address '{}' exists on pump.fun",
            address
        ))
    })?;

    Ok(Json(coin))
}

// ==================== Jupiter passthrough ====================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteBody {
    input_mint: String,
    output_mint: String,
    amount: u64,
    #[serde(default = "default_slippage_bps")]
    slippage_bps: u16,
}

fn default_slippage_bps() -> u16 {
    50
}

async fn post_jupiter_quote(
    State(state): State<AppState>,
    Json(body): Json<QuoteBody>,
) -> Result<Json<QuoteResponse>, ApiError> {
    validate_solana_address(&body.input_mint)?;
    validate_solana_address(&body.output_mint)?;
    if body.amount == 0 {
        return Err(ApiError::bad_request(
            "Invalid amount",
            "amount must be a positive integer in base units",
        ));
    }

    let request = QuoteRequest::new(
        body.input_mint,
        body.output_mint,
        body.amount,
        body.slippage_bps,
    );
    let quote = state.jupiter.get_quote(&request).await?;
    Ok(Json(quote))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SwapBody {
    user_public_key: String,
    quote_response: Value,
}

async fn post_jupiter_swap(
    State(state): State<AppState>,
    Json(body): Json<SwapBody>,
) -> Result<Json<SwapResponse>, ApiError> {
    validate_solana_address(&body.user_public_key)?;
    if !body.quote_response.is_object() {
        return Err(ApiError::bad_request(
            "Invalid quoteResponse",
            "quoteResponse must be the JSON object returned by /api/jupiter/quote",
        ));
    }

    let request = SwapRequest::new(body.user_public_key, body.quote_response);
    let swap = state.jupiter.get_swap_transaction(&request).await?;
    Ok(Json(swap))
}

// ==================== Price history ====================

#[derive(Debug, Deserialize)]
struct PriceHistoryQuery {
    #[serde(default = "default_interval")]
    interval: String,
    #[serde(default = "default_history_limit")]
    limit: usize,
}

fn default_interval() -> String {
    "1m".to_string()
}

fn default_history_limit() -> usize {
    100
}

/// Best-pair summary attached to the price-history response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PairSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pair_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dex_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price_usd: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    liquidity_usd: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    volume_24h: Option<f64>,
}

impl From<&DexPair> for PairSummary {
    fn from(pair: &DexPair) -> Self {
        Self {
            pair_address: pair.pair_address.clone(),
            dex_id: pair.dex_id.clone(),
            price_usd: parse_f64(pair.price_usd.as_deref()),
            liquidity_usd: pair.liquidity.as_ref().and_then(|l| l.usd),
            volume_24h: pair.volume.as_ref().and_then(|v| v.h24),
        }
    }
}

#[derive(Debug, Serialize)]
struct PriceHistoryResponse {
    success: bool,
    mint: String,
    interval: &'static str,
    synthetic: bool,
    candles: Vec<Candle>,
    pair: Option<PairSummary>,
    timestamp: String,
}

async fn get_price_history(
    State(state): State<AppState>,
    Path(mint): Path<String>,
    Query(params): Query<PriceHistoryQuery>,
) -> Result<Json<PriceHistoryResponse>, ApiError> {
    validate_solana_address(&mint)?;

    let interval = CandleInterval::parse(&params.interval).ok_or_else(|| {
        ApiError::bad_request(
            "Invalid interval",
            format!(
                "unknown interval '{}' (accepted: {})",
                params.interval,
                CandleInterval::ACCEPTED.join(", ")
            ),
        )
    })?;

    // one real lookup anchors the synthetic series at the live price
    let pair = match state.dexscreener.token_pairs(&mint).await {
        Ok(pairs) => best_pair(&pairs).map(PairSummary::from),
        Err(err) => {
            warn!("Pair lookup for '{}' failed: {}", mint, err);
            None
        }
    };

    let base_price = pair
        .as_ref()
        .and_then(|p| p.price_usd)
        .unwrap_or(FALLBACK_BASE_PRICE);
    let limit = params.limit.clamp(1, MAX_CANDLES);
    let candles = synthetic_history(base_price, interval, limit, &mut rand::thread_rng());

    Ok(Json(PriceHistoryResponse {
        success: true,
        mint,
        interval: interval.label(),
        synthetic: true,
        candles,
        pair,
        timestamp: timestamp_now(),
    }))
}
