//! Jupiter Swap Types
//!
//! Request and response structures for building swap transactions. The
//! quote is forwarded opaquely so whatever Jupiter returned goes back
//! exactly as-is in the build request.

use serde::{Deserialize, Serialize};

/// Request to build a swap transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    /// The user's public key that will sign the transaction
    pub user_public_key: String,
    /// Quote response from the quote endpoint, passed through unchanged
    pub quote_response: serde_json::Value,
    /// Whether to automatically wrap and unwrap SOL
    #[serde(default = "default_true")]
    pub wrap_and_unwrap_sol: bool,
    /// Prioritization fee in lamports (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prioritization_fee_lamports: Option<u64>,
}

fn default_true() -> bool {
    true
}

impl SwapRequest {
    /// Create a swap request from a raw quote
    pub fn new(user_public_key: String, quote_response: serde_json::Value) -> Self {
        Self {
            user_public_key,
            quote_response,
            wrap_and_unwrap_sol: true,
            prioritization_fee_lamports: None,
        }
    }
}

/// Response containing the built swap transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapResponse {
    /// Base64-encoded serialized transaction
    pub swap_transaction: String,
    /// Last valid block height for the transaction
    pub last_valid_block_height: u64,
    /// Prioritization fee used (in lamports)
    #[serde(default)]
    pub prioritization_fee_lamports: u64,
    /// Catch-all for any additional fields from the API
    #[serde(flatten)]
    pub extra: std::collections::HashMap<String, serde_json::Value>,
}

impl SwapResponse {
    /// Decode the base64 transaction into bytes
    pub fn transaction_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.decode(&self.swap_transaction)
    }
}
