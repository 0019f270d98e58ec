//! HTTP client for a node's JSON-RPC interface and the balance service.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use log::{debug, warn};
use neo_primitives::{Uint160, Uint256};
use neo_script::{Address, ContractParam};
use neo_transaction::{
    BalanceOracle, NetworkSubmitter, SubmitResult, TransactionError, UnspentOutput,
};
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::RpcError;
use crate::types::{Balance, InvokeResult, RpcConfig, RpcRequest, RpcResponse};

/// HTTP client for a node and its balance service.
#[derive(Debug)]
pub struct RpcClient {
    /// Client configuration.
    config: RpcConfig,
    /// Underlying HTTP client.
    client: reqwest::Client,
    /// Id of the next JSON-RPC request.
    next_id: AtomicU64,
}

impl RpcClient {
    /// Create a new client with the given configuration.
    pub fn new(config: RpcConfig) -> Result<Self, RpcError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            config,
            client,
            next_id: AtomicU64::new(1),
        })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    /// Send one JSON-RPC call and decode its `result`.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, RpcError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
        };
        debug!("rpc {} #{} -> {}", method, request.id, self.config.endpoint);

        let resp = self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        // Nodes report RPC errors with non-2xx codes too; prefer the error object.
        let response: RpcResponse<T> = match serde_json::from_str(&body) {
            Ok(r) => r,
            Err(e) if status.is_success() => return Err(e.into()),
            Err(_) => {
                return Err(RpcError::Status {
                    status: status.as_u16(),
                    body,
                })
            }
        };

        if let Some(err) = response.error {
            return Err(RpcError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        response
            .result
            .ok_or_else(|| RpcError::MissingResult(method.to_string()))
    }

    /// Run `operation` on `contract` without committing anything.
    ///
    /// # Returns
    /// The script the node assembled and the GAS it consumed.
    pub async fn invoke_function(
        &self,
        contract: &Uint160,
        operation: &str,
        params: &[ContractParam],
    ) -> Result<InvokeResult, RpcError> {
        let result: InvokeResult = self
            .call(
                "invokefunction",
                json!([contract.to_hex(), operation, params]),
            )
            .await?;
        if !result.halted() {
            warn!(
                "invokefunction {} on {} ended in state {}",
                operation, contract, result.state
            );
        }
        Ok(result)
    }

    /// Relay a raw transaction.
    ///
    /// # Returns
    /// The node's boolean verdict, or `Rpc` if the node refused with an
    /// error object.
    pub async fn send_raw_transaction(&self, raw_tx: &[u8]) -> Result<bool, RpcError> {
        self.call("sendrawtransaction", json!([hex::encode(raw_tx)]))
            .await
    }

    /// Fetch the balance and unspent outputs of `address`.
    pub async fn get_balance(&self, address: &str) -> Result<Balance, RpcError> {
        let url = format!(
            "{}/v2/address/balance/{}",
            self.config.balance_url.trim_end_matches('/'),
            address
        );
        debug!("balance lookup {}", url);

        let resp = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(RpcError::Status {
                status: status.as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }

        let balance: Balance = resp.json().await?;
        Ok(balance)
    }

    /// Drive `fut` to completion from synchronous code.
    fn block_on<F: Future>(&self, fut: F) -> Result<F::Output, RpcError> {
        match tokio::runtime::Handle::try_current() {
            // Inside a runtime: this requires the multi-threaded flavor.
            Ok(handle) => Ok(tokio::task::block_in_place(|| handle.block_on(fut))),
            Err(_) => {
                let rt = tokio::runtime::Runtime::new()
                    .map_err(|e| RpcError::Runtime(e.to_string()))?;
                Ok(rt.block_on(fut))
            }
        }
    }
}

impl BalanceOracle for RpcClient {
    fn unspent_outputs(
        &self,
        address: &Address,
        asset_id: &Uint256,
    ) -> Result<Vec<UnspentOutput>, TransactionError> {
        let balance = self.block_on(self.get_balance(&address.address_string))??;
        if balance.address != address.address_string {
            return Err(TransactionError::Network(format!(
                "balance service answered for {} instead of {}",
                balance.address, address
            )));
        }
        balance
            .unspent(asset_id)
            .map(<[UnspentOutput]>::to_vec)
            .ok_or_else(|| {
                TransactionError::Network(format!(
                    "balance service does not report asset {}",
                    asset_id
                ))
            })
    }
}

impl NetworkSubmitter for RpcClient {
    fn submit(&self, raw_tx: &[u8]) -> Result<SubmitResult, TransactionError> {
        match self.block_on(self.send_raw_transaction(raw_tx))? {
            Ok(true) => Ok(SubmitResult::accepted()),
            Ok(false) => Ok(SubmitResult {
                accepted: false,
                message: None,
            }),
            Err(RpcError::Rpc { code, message }) => {
                Ok(SubmitResult::rejected(format!("{} ({})", message, code)))
            }
            Err(e) => Err(e.into()),
        }
    }
}
