//! The caller-supplied signing/submission capability.
//!
//! [`EvmProvider`] is the seam between the handlers and whatever actually
//! holds the keys: a node-managed account, a hardware wallet bridge, or a
//! test mock. The SDK never constructs or releases these resources; it
//! holds a shared reference only.

use crate::error::EvmError;
use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use url::Url;

/// A trait abstracting the account the SDK acts as.
///
/// Implementations sign and submit; the handlers only assemble calldata.
#[async_trait]
pub trait EvmProvider: Send + Sync {
    /// The account address transactions are sent from.
    fn address(&self) -> Address;

    /// Executes a read-only contract call and returns the raw return data.
    async fn call(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>, EvmError>;

    /// Signs and submits a state-changing transaction, returning its hash.
    async fn send(&self, to: Address, data: Vec<u8>, value: U256) -> Result<B256, EvmError>;

    /// Signs an arbitrary message with the account key (`personal_sign`),
    /// returning the raw 65-byte signature.
    async fn sign_message(&self, message: &[u8]) -> Result<Vec<u8>, EvmError>;
}

/// Rewrites legacy recovery bytes (0/1) to 27/28.
///
/// Some signers (ledgers in particular) return signatures ending on 00 or
/// 01 instead of 1b or 1c; contracts reject those.
pub fn normalize_signature(mut signature: Vec<u8>) -> Result<Vec<u8>, EvmError> {
    if signature.len() != 65 {
        return Err(EvmError::Signer(format!(
            "expected a 65-byte signature, got {} bytes",
            signature.len()
        )));
    }
    if signature[64] < 27 {
        signature[64] += 27;
    }
    Ok(signature)
}

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'a str,
    id: u32,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    result: Option<Value>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

/// An [`EvmProvider`] over a JSON-RPC node that manages its own accounts
/// (`eth_sendTransaction` / `personal_sign`).
pub struct NodeProvider {
    http: reqwest::Client,
    url: Url,
    address: Address,
}

impl NodeProvider {
    pub fn new(url: &str, address: Address) -> Result<Self, EvmError> {
        Ok(Self {
            http: reqwest::Client::new(),
            url: Url::parse(url).map_err(|e| EvmError::Rpc(e.to_string()))?,
            address,
        })
    }

    async fn rpc(&self, method: &str, params: Value) -> Result<Value, EvmError> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };
        let response: JsonRpcResponse = self
            .http
            .post(self.url.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| EvmError::Rpc(e.to_string()))?
            .json()
            .await
            .map_err(|e| EvmError::Rpc(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(EvmError::Rpc(format!(
                "{} (code {})",
                error.message, error.code
            )));
        }
        response
            .result
            .ok_or_else(|| EvmError::Rpc(format!("{method}: empty result")))
    }

    fn decode_hex(value: &Value) -> Result<Vec<u8>, EvmError> {
        let s = value
            .as_str()
            .ok_or_else(|| EvmError::Rpc("expected a hex string result".to_string()))?;
        hex::decode(s.trim_start_matches("0x")).map_err(|e| EvmError::Rpc(e.to_string()))
    }
}

#[async_trait]
impl EvmProvider for NodeProvider {
    fn address(&self) -> Address {
        self.address
    }

    async fn call(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>, EvmError> {
        let result = self
            .rpc(
                "eth_call",
                json!([
                    { "to": to.to_string(), "data": format!("0x{}", hex::encode(data)) },
                    "latest"
                ]),
            )
            .await?;
        Self::decode_hex(&result)
    }

    async fn send(&self, to: Address, data: Vec<u8>, value: U256) -> Result<B256, EvmError> {
        let result = self
            .rpc(
                "eth_sendTransaction",
                json!([{
                    "from": self.address.to_string(),
                    "to": to.to_string(),
                    "data": format!("0x{}", hex::encode(data)),
                    "value": format!("0x{value:x}"),
                }]),
            )
            .await?;
        result
            .as_str()
            .and_then(|s| s.parse::<B256>().ok())
            .ok_or_else(|| EvmError::Rpc("eth_sendTransaction: malformed hash".to_string()))
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Vec<u8>, EvmError> {
        let result = self
            .rpc(
                "personal_sign",
                json!([
                    format!("0x{}", hex::encode(message)),
                    self.address.to_string(),
                ]),
            )
            .await?;
        Self::decode_hex(&result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_fixes_legacy_recovery_bytes() {
        let mut sig = vec![0u8; 65];
        sig[64] = 0;
        assert_eq!(normalize_signature(sig.clone()).unwrap()[64], 27);
        sig[64] = 1;
        assert_eq!(normalize_signature(sig.clone()).unwrap()[64], 28);
        sig[64] = 28;
        assert_eq!(normalize_signature(sig).unwrap()[64], 28);
        assert!(normalize_signature(vec![0u8; 64]).is_err());
    }
}
