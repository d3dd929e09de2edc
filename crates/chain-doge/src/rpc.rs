//! Minimal JSON-RPC 1.0 client for a Dogecoin Core node.
//!
//! Only the two methods the bridge operator needs: `getrawtransaction`
//! (verbose) and `sendrawtransaction`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::DogeError;

/// JSON-RPC 1.0 client over HTTP POST.
#[derive(Clone)]
pub struct DogeRpcClient {
    client: reqwest::Client,
    url: String,
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'a str,
    method: &'a str,
    params: serde_json::Value,
    id: u32,
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// A verbose transaction as returned by `getrawtransaction(txid, true)`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTransaction {
    pub txid: String,
    pub version: u32,
    pub locktime: u32,
    pub vin: Vec<Vin>,
    pub vout: Vec<Vout>,
    /// Absent while the transaction sits in the mempool.
    #[serde(default)]
    pub confirmations: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Vin {
    /// Absent for coinbase inputs.
    pub txid: Option<String>,
    pub vout: Option<u32>,
    #[serde(rename = "scriptSig")]
    pub script_sig: Option<ScriptSig>,
    pub sequence: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptSig {
    pub asm: String,
    pub hex: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Vout {
    /// Value in whole coins, as the node reports it.
    pub value: f64,
    pub n: u32,
    #[serde(rename = "scriptPubKey")]
    pub script_pub_key: ScriptPubKey,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptPubKey {
    pub asm: String,
    pub hex: String,
    #[serde(rename = "reqSigs")]
    pub req_sigs: Option<u32>,
    #[serde(rename = "type")]
    pub script_type: String,
    #[serde(default)]
    pub addresses: Vec<String>,
}

impl DogeRpcClient {
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_string(),
        }
    }

    /// Fetch a transaction in verbose (decoded) form.
    pub async fn get_raw_transaction(&self, txid: &str) -> Result<RawTransaction, DogeError> {
        self.call("getrawtransaction", serde_json::json!([txid, true]))
            .await
    }

    /// Broadcast a serialized transaction; returns the network txid.
    pub async fn send_raw_transaction(&self, tx_hex: &str) -> Result<String, DogeError> {
        self.call("sendrawtransaction", serde_json::json!([tx_hex]))
            .await
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, DogeError> {
        tracing::debug!(method, url = %self.url, "doge rpc call");

        let request = RpcRequest {
            jsonrpc: "1.0",
            method,
            params,
            id: 1,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| DogeError::Transport(e.to_string()))?;

        let body: RpcResponse<T> = response
            .json()
            .await
            .map_err(|e| DogeError::Transport(format!("malformed rpc response: {e}")))?;

        if let Some(error) = body.error {
            tracing::warn!(method, code = error.code, message = %error.message, "doge rpc error");
            return Err(DogeError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        body.result
            .ok_or_else(|| DogeError::Transport("rpc response missing result".into()))
    }
}
