//! JSON-RPC client for a Sui fullnode.
//!
//! Every call is wrapped in a 30-second deadline covering both the HTTP
//! round trip and the response decode. Integer amounts cross the wire as
//! decimal strings, matching the node's BigInt encoding.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::SuiError;

/// Per-call deadline for all fullnode traffic.
pub const RPC_DEADLINE: Duration = Duration::from_secs(30);

/// Page size used when walking a sender's coins.
pub const COIN_PAGE_SIZE: u32 = 50;

/// JSON-RPC 2.0 client over HTTP POST.
#[derive(Clone)]
pub struct SuiRpcClient {
    client: reqwest::Client,
    url: String,
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'a str,
    id: u32,
    method: &'a str,
    params: serde_json::Value,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<serde_json::Value>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// One owned coin object.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
    pub coin_object_id: String,
    pub coin_type: String,
    balance: String,
}

impl Coin {
    /// Balance in base units. The node renders u64 as a decimal string.
    pub fn balance(&self) -> Result<u64, SuiError> {
        self.balance
            .parse()
            .map_err(|e| SuiError::Serialization(format!("invalid coin balance: {e}")))
    }
}

/// One page of a sender's coins.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinPage {
    pub data: Vec<Coin>,
    pub next_cursor: Option<String>,
    pub has_next_page: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinMetadata {
    pub decimals: u8,
    pub symbol: String,
    pub name: String,
}

/// BCS transaction bytes produced by a node-side constructor.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBytes {
    pub tx_bytes: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBlockResponse {
    pub digest: String,
    pub effects: Option<TransactionEffects>,
    #[serde(default)]
    pub balance_changes: Option<Vec<BalanceChange>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEffects {
    pub status: ExecutionStatus,
    pub transaction_digest: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExecutionStatus {
    pub status: String,
    pub error: Option<String>,
}

impl ExecutionStatus {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceChange {
    pub owner: Owner,
    pub coin_type: String,
    /// Signed i128 as a decimal string; negative on the debit side.
    pub amount: String,
}

/// Object ownership as the node reports it.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Owner {
    Address {
        #[serde(rename = "AddressOwner")]
        address: String,
    },
    Object {
        #[serde(rename = "ObjectOwner")]
        object: String,
    },
    Other(serde_json::Value),
}

impl Owner {
    /// The owning address, or an empty string for shared and immutable
    /// objects.
    pub fn address(&self) -> &str {
        match self {
            Owner::Address { address } => address,
            Owner::Object { object } => object,
            Owner::Other(_) => "",
        }
    }
}

impl SuiRpcClient {
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_string(),
        }
    }

    /// Current reference gas price in MIST per gas unit.
    pub async fn get_reference_gas_price(&self) -> Result<u64, SuiError> {
        let price: String = self
            .call("sui_getReferenceGasPrice", serde_json::json!([]))
            .await?;
        price
            .parse()
            .map_err(|e| SuiError::Serialization(format!("invalid gas price: {e}")))
    }

    /// One page of coins of `coin_type` owned by `owner`. A `None`
    /// coin type selects the native coin.
    pub async fn get_coins(
        &self,
        owner: &str,
        coin_type: Option<&str>,
        cursor: Option<&str>,
        limit: u32,
    ) -> Result<CoinPage, SuiError> {
        self.call(
            "sui_getCoins",
            serde_json::json!([owner, coin_type, cursor, limit]),
        )
        .await
    }

    /// Every native coin owned by `owner`, walking pages to exhaustion.
    pub async fn get_sui_coins_owned(&self, owner: &str) -> Result<Vec<Coin>, SuiError> {
        let mut coins = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let page = self
                .get_coins(owner, None, cursor.as_deref(), COIN_PAGE_SIZE)
                .await?;
            coins.extend(page.data);
            if !page.has_next_page {
                return Ok(coins);
            }
            cursor = page.next_cursor;
        }
    }

    pub async fn get_coin_metadata(&self, coin_type: &str) -> Result<CoinMetadata, SuiError> {
        self.call("suix_getCoinMetadata", serde_json::json!([coin_type]))
            .await
    }

    /// Node-side constructor for a native transfer. Gas is drawn from
    /// the input coins themselves.
    pub async fn pay_sui(
        &self,
        signer: &str,
        input_coins: &[String],
        recipients: &[String],
        amounts: &[u64],
        gas_budget: u64,
    ) -> Result<TransactionBytes, SuiError> {
        self.call(
            "sui_paySui",
            serde_json::json!([
                signer,
                input_coins,
                recipients,
                as_strings(amounts),
                gas_budget.to_string(),
            ]),
        )
        .await
    }

    /// Node-side constructor for a token transfer with a dedicated gas
    /// coin.
    pub async fn pay(
        &self,
        signer: &str,
        input_coins: &[String],
        recipients: &[String],
        amounts: &[u64],
        gas_coin: &str,
        gas_budget: u64,
    ) -> Result<TransactionBytes, SuiError> {
        self.call(
            "sui_pay",
            serde_json::json!([
                signer,
                input_coins,
                recipients,
                as_strings(amounts),
                gas_coin,
                gas_budget.to_string(),
            ]),
        )
        .await
    }

    /// Submit signed BCS bytes, waiting for the effects certificate.
    pub async fn execute_transaction_block(
        &self,
        tx_bytes_b64: &str,
        signatures_b64: &[String],
    ) -> Result<TransactionBlockResponse, SuiError> {
        self.call(
            "sui_executeTransactionBlock",
            serde_json::json!([
                tx_bytes_b64,
                signatures_b64,
                {"showEffects": true, "showEvents": true},
                "WaitForEffectsCert",
            ]),
        )
        .await
    }

    /// Look up an executed transaction by digest with the given
    /// response options.
    pub async fn get_transaction_block(
        &self,
        digest: &str,
        options: serde_json::Value,
    ) -> Result<TransactionBlockResponse, SuiError> {
        self.call("sui_getTransactionBlock", serde_json::json!([digest, options]))
            .await
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, SuiError> {
        tracing::debug!(method, url = %self.url, "sui rpc call");

        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };

        // The deadline covers the round trip and body decode together.
        tokio::time::timeout(RPC_DEADLINE, self.dispatch(&request))
            .await
            .map_err(|_| SuiError::Timeout(method.to_string()))?
            .and_then(|body| {
                if let Some(error) = body.error {
                    tracing::warn!(method, code = error.code, message = %error.message, "sui rpc error");
                    return Err(SuiError::Rpc {
                        code: error.code,
                        message: error.message,
                    });
                }
                let result = body.result.unwrap_or(serde_json::Value::Null);
                serde_json::from_value(result)
                    .map_err(|e| SuiError::Transport(format!("unexpected rpc result: {e}")))
            })
    }

    async fn dispatch(&self, request: &RpcRequest<'_>) -> Result<RpcResponse, SuiError> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| SuiError::Transport(e.to_string()))?;

        response
            .json()
            .await
            .map_err(|e| SuiError::Transport(format!("malformed rpc response: {e}")))
    }
}

fn as_strings(amounts: &[u64]) -> Vec<String> {
    amounts.iter().map(u64::to_string).collect()
}
