//! # JSON-RPC Ledger
//!
//! `eth_call` against a node's HTTP endpoint. Reverts come back as JSON-RPC
//! errors; their `data` field carries the revert payload (and with it any
//! `OffchainLookup`).

use crate::ports::outbound::{Ledger, LedgerError};
use alloy_primitives::hex;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::{Address, Bytes};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::trace;

#[derive(Debug, Serialize)]
struct CallObject {
    to: Address,
    data: Bytes,
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: (CallObject, &'a str),
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Bytes>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

/// Ledger backed by a JSON-RPC endpoint.
pub struct JsonRpcLedger {
    client: reqwest::Client,
    url: String,
    block: String,
    next_id: AtomicU64,
}

impl JsonRpcLedger {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, LedgerError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LedgerError::Unavailable(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
            block: "latest".to_string(),
            next_id: AtomicU64::new(1),
        })
    }

    /// Pin calls to a block tag or hex number instead of `latest`.
    #[must_use]
    pub fn at_block(mut self, block: impl Into<String>) -> Self {
        self.block = block.into();
        self
    }
}

#[async_trait]
impl Ledger for JsonRpcLedger {
    async fn call(&self, target: Address, data: Bytes) -> Result<Bytes, LedgerError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest {
            jsonrpc: "2.0",
            id,
            method: "eth_call",
            params: (CallObject { to: target, data }, &self.block),
        };
        trace!(id, target = %target, "eth_call");

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| LedgerError::Unavailable(e.to_string()))?;
        if !response.status().is_success() {
            return Err(LedgerError::Unavailable(format!(
                "HTTP {}",
                response.status()
            )));
        }
        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| LedgerError::InvalidResponse(e.to_string()))?;
        into_call_result(body)
    }
}

fn into_call_result(response: RpcResponse) -> Result<Bytes, LedgerError> {
    if let Some(error) = response.error {
        return Err(into_ledger_error(error));
    }
    response
        .result
        .ok_or_else(|| LedgerError::InvalidResponse("response has neither result nor error".into()))
}

/// Nodes disagree on where revert data goes: a hex string in `data`, or a
/// nested `data.data`. Code 3 or a "revert" message without data is an
/// empty revert.
fn into_ledger_error(error: RpcErrorObject) -> LedgerError {
    let revert_hex = match &error.data {
        Some(Value::String(s)) => Some(s.as_str()),
        Some(Value::Object(map)) => map.get("data").and_then(Value::as_str),
        _ => None,
    };
    if let Some(revert) = revert_hex.and_then(|s| hex::decode(s).ok()) {
        return LedgerError::Reverted(revert.into());
    }
    if error.code == 3 || error.message.to_lowercase().contains("revert") {
        return LedgerError::Reverted(Bytes::new());
    }
    LedgerError::Unavailable(format!("RPC error {}: {}", error.code, error.message))
}
