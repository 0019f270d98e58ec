//! RPC data types: configuration, JSON-RPC envelopes and response bodies.

use neo_primitives::{Fixed8, Uint256};
use neo_script::Script;
use neo_transaction::spend::{GAS_ASSET_ID, NEO_ASSET_ID};
use neo_transaction::UnspentOutput;
use serde::{Deserialize, Serialize};

use crate::error::RpcError;

/// Configuration for an [`RpcClient`](crate::RpcClient).
///
/// There are no built-in endpoints; every value is supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RpcConfig {
    /// JSON-RPC endpoint of a node (e.g. `http://127.0.0.1:20332`).
    pub endpoint: String,
    /// Base URL of the balance service; `/v2/address/balance/{address}` is appended.
    pub balance_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl RpcConfig {
    /// Create a config with the default timeout.
    pub fn new(endpoint: impl Into<String>, balance_url: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            balance_url: balance_url.into(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Load a config from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, RpcError> {
        let config: RpcConfig =
            serde_json::from_str(json).map_err(|e| RpcError::Config(e.to_string()))?;
        if config.timeout_secs == 0 {
            return Err(RpcError::Config("timeout_secs must be positive".to_string()));
        }
        Ok(config)
    }
}

/// A JSON-RPC 2.0 request.
#[derive(Debug, Serialize)]
pub(crate) struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub method: &'a str,
    pub params: serde_json::Value,
    pub id: u64,
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// A JSON-RPC 2.0 response.
#[derive(Debug, Deserialize)]
pub(crate) struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<RpcErrorObject>,
}

/// Result of a test invocation (`invokefunction`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokeResult {
    /// The script the node built, as hex.
    pub script: String,
    /// VM state after the run, e.g. `HALT` or `FAULT`.
    #[serde(default)]
    pub state: String,
    /// GAS the run consumed.
    pub gas_consumed: Fixed8,
    /// Result stack, left uninterpreted.
    #[serde(default)]
    pub stack: Vec<serde_json::Value>,
}

impl InvokeResult {
    /// Parse the returned script.
    pub fn script(&self) -> Result<Script, RpcError> {
        Ok(Script::from_hex(&self.script)?)
    }

    /// `true` if the VM halted without faulting.
    pub fn halted(&self) -> bool {
        self.state.split(',').any(|s| s.trim() == "HALT")
    }
}

/// Holdings of one asset, as reported by the balance service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetInfo {
    /// Sum of the unspent outputs.
    #[serde(default)]
    pub balance: Fixed8,
    /// The unspent outputs themselves.
    #[serde(default)]
    pub unspent: Vec<UnspentOutput>,
}

/// Wallet state returned by the balance service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balance {
    /// GAS holdings.
    #[serde(rename = "GAS", default)]
    pub gas: AssetInfo,
    /// NEO holdings.
    #[serde(rename = "NEO", default)]
    pub neo: AssetInfo,
    /// The address queried.
    pub address: String,
    /// Network name, e.g. `TestNet`.
    #[serde(default)]
    pub net: String,
}

impl Balance {
    /// Unspent outputs for `asset_id`, or `None` if the service does not
    /// report that asset.
    pub fn unspent(&self, asset_id: &Uint256) -> Option<&[UnspentOutput]> {
        if *asset_id == GAS_ASSET_ID {
            Some(&self.gas.unspent)
        } else if *asset_id == NEO_ASSET_ID {
            Some(&self.neo.unspent)
        } else {
            None
        }
    }
}
