//! JSON-RPC client for a Solana node.
//!
//! Covers the four methods the bridge operator needs: latest blockhash,
//! account info, transaction submission, and confirmed-transaction lookup.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::error::SolError;

/// JSON-RPC 2.0 client over HTTP POST.
#[derive(Clone)]
pub struct SolRpcClient {
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

/// The raw result is kept as a `Value` so that a legitimate `null` result
/// (a not-found `getTransaction`) still decodes into `Option<T>` targets.
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

#[derive(Deserialize)]
struct WithContext<T> {
    value: T,
}

#[derive(Deserialize)]
struct BlockhashValue {
    blockhash: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountInfo {
    /// `[data, encoding]` pair as returned with `encoding: "base64"`.
    pub data: (String, String),
    pub owner: String,
}

impl SolRpcClient {
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_string(),
        }
    }

    /// Latest blockhash at confirmed commitment, as raw 32 bytes.
    pub async fn get_latest_blockhash(&self) -> Result<[u8; 32], SolError> {
        let result: WithContext<BlockhashValue> = self
            .call(
                "getLatestBlockhash",
                serde_json::json!([{"commitment": "confirmed"}]),
            )
            .await?;

        let bytes = bs58::decode(&result.value.blockhash)
            .into_vec()
            .map_err(|e| SolError::Serialization(format!("invalid blockhash base58: {e}")))?;
        bytes
            .try_into()
            .map_err(|_| SolError::Serialization("blockhash must be 32 bytes".into()))
    }

    /// Raw account data, or `None` when the account does not exist.
    pub async fn get_account_info(&self, pubkey_b58: &str) -> Result<Option<Vec<u8>>, SolError> {
        let result: WithContext<Option<AccountInfo>> = self
            .call(
                "getAccountInfo",
                serde_json::json!([pubkey_b58, {"encoding": "base64"}]),
            )
            .await?;

        result
            .value
            .map(|account| {
                BASE64
                    .decode(&account.data.0)
                    .map_err(|e| SolError::Serialization(format!("invalid account data: {e}")))
            })
            .transpose()
    }

    /// Submit a base58 wire transaction; returns the network-assigned
    /// signature.
    pub async fn send_transaction(&self, tx_b58: &str) -> Result<String, SolError> {
        self.call(
            "sendTransaction",
            serde_json::json!([tx_b58, {"encoding": "base58"}]),
        )
        .await
    }

    /// Look up a transaction at confirmed commitment. `None` means the
    /// node does not know the signature.
    pub async fn get_transaction(
        &self,
        signature_b58: &str,
    ) -> Result<Option<serde_json::Value>, SolError> {
        self.call(
            "getTransaction",
            serde_json::json!([signature_b58, {"commitment": "confirmed"}]),
        )
        .await
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, SolError> {
        tracing::debug!(method, url = %self.url, "solana rpc call");

        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SolError::Transport(e.to_string()))?;

        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| SolError::Transport(format!("malformed rpc response: {e}")))?;

        if let Some(error) = body.error {
            tracing::warn!(method, code = error.code, message = %error.message, "solana rpc error");
            return Err(SolError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        let result = body.result.unwrap_or(serde_json::Value::Null);
        serde_json::from_value(result)
            .map_err(|e| SolError::Transport(format!("unexpected rpc result: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_result<T: DeserializeOwned>(raw: &str) -> T {
        let body: RpcResponse = serde_json::from_str(raw).unwrap();
        assert!(body.error.is_none());
        serde_json::from_value(body.result.unwrap_or(serde_json::Value::Null)).unwrap()
    }

    #[test]
    fn blockhash_response_decodes() {
        let result: WithContext<BlockhashValue> = parse_result(
            r#"{"jsonrpc":"2.0","result":{"context":{"slot":123},
                "value":{"blockhash":"EkSnNWid2cvwEVnVx9aBqawnmiCNiDgp3gUdkDPTKN1N",
                         "lastValidBlockHeight":300}},"id":1}"#,
        );
        let blockhash = result.value.blockhash;
        assert_eq!(bs58::decode(&blockhash).into_vec().unwrap().len(), 32);
    }

    #[test]
    fn account_info_response_decodes() {
        let result: WithContext<Option<AccountInfo>> = parse_result(
            r#"{"jsonrpc":"2.0","result":{"context":{"slot":1},
                "value":{"data":["AQIDBA==","base64"],"executable":false,
                         "lamports":1000000,
                         "owner":"TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA",
                         "rentEpoch":0}},"id":1}"#,
        );
        let account = result.value.unwrap();
        assert_eq!(BASE64.decode(&account.data.0).unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(account.owner, "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
    }

    #[test]
    fn missing_account_decodes_to_none() {
        let result: WithContext<Option<AccountInfo>> = parse_result(
            r#"{"jsonrpc":"2.0","result":{"context":{"slot":1},"value":null},"id":1}"#,
        );
        assert!(result.value.is_none());
    }

    #[test]
    fn not_found_transaction_decodes_to_none() {
        // A null result must still decode into an Option target.
        let result: Option<serde_json::Value> =
            parse_result(r#"{"jsonrpc":"2.0","result":null,"id":1}"#);
        assert!(result.is_none());
    }

    #[test]
    fn rpc_error_decodes() {
        let body: RpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","error":{"code":-32002,
                "message":"Transaction simulation failed"},"id":1}"#,
        )
        .unwrap();
        let error = body.error.unwrap();
        assert_eq!(error.code, -32002);
        assert!(error.message.contains("simulation"));
    }
}
