//! Client for the Helius enriched-transaction API.
//!
//! The endpoint returns confirmed transactions with transfers already
//! parsed out, which saves decoding program-specific instruction layouts.

use serde::Deserialize;

use crate::error::SolError;

/// Default enrichment endpoint for devnet.
pub const DEVNET_BASE_URL: &str = "https://api-devnet.helius.xyz";

/// HTTP client for `POST /v0/transactions`.
#[derive(Clone)]
pub struct EnrichmentClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// One enriched transaction record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedTransaction {
    #[serde(default)]
    pub native_transfers: Vec<NativeTransfer>,
    #[serde(default)]
    pub token_transfers: Vec<TokenTransfer>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeTransfer {
    pub from_user_account: String,
    pub to_user_account: String,
    /// Lamports.
    pub amount: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTransfer {
    pub from_user_account: String,
    pub to_user_account: String,
    pub from_token_account: String,
    pub to_token_account: String,
    /// Base units of the mint.
    pub token_amount: u64,
    pub mint: String,
    pub token_standard: String,
}

impl TokenTransfer {
    /// Only fungible transfers are bridged; NFT standards are skipped.
    pub fn is_fungible(&self) -> bool {
        self.token_standard == "Fungible"
    }
}

impl EnrichmentClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn devnet(api_key: &str) -> Self {
        Self::new(DEVNET_BASE_URL, api_key)
    }

    /// Fetch the enriched form of a confirmed transaction.
    pub async fn parse_transaction(
        &self,
        signature: &str,
    ) -> Result<Vec<EnrichedTransaction>, SolError> {
        let url = format!("{}/v0/transactions?api-key={}", self.base_url, self.api_key);
        tracing::debug!(signature, "enrichment api call");

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "transactions": [signature] }))
            .send()
            .await
            .map_err(|e| SolError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SolError::Transport(format!(
                "enrichment api returned {status}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| SolError::Transport(format!("malformed enrichment response: {e}")))
    }
}
