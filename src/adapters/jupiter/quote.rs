//! Jupiter Quote Types
//!
//! Request and response structures for the Jupiter quote API. The
//! response keeps a flattened catch-all map so passthrough to clients
//! never drops fields the API adds later.

use serde::{Deserialize, Serialize};

/// Request parameters for a swap quote
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    /// Input token mint address
    pub input_mint: String,
    /// Output token mint address
    pub output_mint: String,
    /// Amount in base units (lamports for SOL)
    pub amount: u64,
    /// Slippage tolerance in basis points (1 = 0.01%)
    pub slippage_bps: u16,
}

impl QuoteRequest {
    /// Create a new quote request
    pub fn new(input_mint: String, output_mint: String, amount: u64, slippage_bps: u16) -> Self {
        Self {
            input_mint,
            output_mint,
            amount,
            slippage_bps,
        }
    }
}

/// Response from the Jupiter quote API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    /// Input token mint address
    pub input_mint: String,
    /// Output token mint address
    pub output_mint: String,
    /// Input amount in base units
    pub in_amount: String,
    /// Output amount in base units
    pub out_amount: String,
    /// Minimum output amount after slippage (otherAmountThreshold)
    pub other_amount_threshold: String,
    /// Swap mode (ExactIn or ExactOut)
    pub swap_mode: String,
    /// Slippage in basis points
    pub slippage_bps: u16,
    /// Price impact percentage (as string)
    #[serde(default)]
    pub price_impact_pct: String,
    /// Route plan with per-hop swap details
    pub route_plan: Vec<RoutePlanStep>,
    /// Context slot for the quote
    #[serde(default)]
    pub context_slot: Option<u64>,
    /// Time taken in milliseconds
    #[serde(default)]
    pub time_taken: Option<f64>,
    /// Catch-all for any additional fields from the API
    #[serde(flatten)]
    pub extra: std::collections::HashMap<String, serde_json::Value>,
}

impl QuoteResponse {
    /// Get input amount as u64
    pub fn input_amount(&self) -> u64 {
        self.in_amount.parse().unwrap_or(0)
    }

    /// Get output amount as u64
    pub fn output_amount(&self) -> u64 {
        self.out_amount.parse().unwrap_or(0)
    }

    /// Get minimum output amount as u64
    pub fn min_output_amount(&self) -> u64 {
        self.other_amount_threshold.parse().unwrap_or(0)
    }

    /// Get price impact as f64 percentage
    pub fn price_impact(&self) -> f64 {
        self.price_impact_pct.parse().unwrap_or(0.0)
    }

    /// DEX labels along the route, in hop order
    pub fn route_labels(&self) -> Vec<&str> {
        self.route_plan
            .iter()
            .map(|step| step.swap_info.label.as_str())
            .collect()
    }
}

/// A step in the route plan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePlanStep {
    /// Swap information for this step
    pub swap_info: SwapInfo,
    /// Percentage of the trade going through this route
    pub percent: u8,
}

/// Information about a single swap in the route
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapInfo {
    /// AMM key (pool identifier)
    pub amm_key: String,
    /// Label for the DEX (e.g., "Raydium", "Orca")
    pub label: String,
    /// Input mint for this hop
    pub input_mint: String,
    /// Output mint for this hop
    pub output_mint: String,
    /// Input amount for this hop
    pub in_amount: String,
    /// Output amount for this hop
    pub out_amount: String,
    /// Fee amount charged (not always returned)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_amount: Option<String>,
    /// Fee mint token (not always returned)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_mint: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_request_new() {
        let req = QuoteRequest::new(
            "So11111111111111111111111111111111111111112".to_string(),
            "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v".to_string(),
            1_000_000_000, // 1 SOL
            50,            // 0.5%
        );

        assert_eq!(req.amount, 1_000_000_000);
        assert_eq!(req.slippage_bps, 50);
    }

    #[test]
    fn test_quote_request_serializes_camel_case() {
        let req = QuoteRequest::new("SOL".to_string(), "USDC".to_string(), 1_000_000, 100);
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["inputMint"], "SOL");
        assert_eq!(json["outputMint"], "USDC");
        assert_eq!(json["slippageBps"], 100);
    }

    #[test]
    fn test_quote_response_parsing() {
        let json = r#"{
            "inputMint": "So11111111111111111111111111111111111111112",
            "outputMint": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
            "inAmount": "1000000000",
            "outAmount": "150000000",
            "otherAmountThreshold": "149250000",
            "swapMode": "ExactIn",
            "slippageBps": 50,
            "priceImpactPct": "0.12",
            "routePlan": [{
                "swapInfo": {
                    "ammKey": "pool123",
                    "label": "Raydium",
                    "inputMint": "SOL",
                    "outputMint": "USDC",
                    "inAmount": "1000000000",
                    "outAmount": "150000000",
                    "feeAmount": "1500",
                    "feeMint": "USDC"
                },
                "percent": 100
            }]
        }"#;

        let quote: QuoteResponse = serde_json::from_str(json).unwrap();
        assert_eq!(quote.input_amount(), 1_000_000_000);
        assert_eq!(quote.output_amount(), 150_000_000);
        assert_eq!(quote.min_output_amount(), 149_250_000);
        assert!((quote.price_impact() - 0.12).abs() < 0.001);
        assert_eq!(quote.route_labels(), vec!["Raydium"]);
    }

    #[test]
    fn test_quote_response_keeps_unknown_fields() {
        let json = r#"{
            "inputMint": "SOL",
            "outputMint": "USDC",
            "inAmount": "1",
            "outAmount": "2",
            "otherAmountThreshold": "2",
            "swapMode": "ExactIn",
            "slippageBps": 50,
            "routePlan": [],
            "platformFee": null,
            "scoreReport": {"venue": "jupiterz"}
        }"#;

        let quote: QuoteResponse = serde_json::from_str(json).unwrap();
        assert!(quote.extra.contains_key("scoreReport"));

        // unknown fields survive a round trip back to the client
        let reserialized = serde_json::to_value(&quote).unwrap();
        assert_eq!(reserialized["scoreReport"]["venue"], "jupiterz");
    }
}
