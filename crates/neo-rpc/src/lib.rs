#![deny(missing_docs)]

//! # neo-rpc
//!
//! HTTP client for a node's JSON-RPC interface (`invokefunction`,
//! `sendrawtransaction`) and for the address balance service.
//!
//! The client is async-first and also implements the synchronous
//! [`BalanceOracle`](neo_transaction::BalanceOracle) and
//! [`NetworkSubmitter`](neo_transaction::NetworkSubmitter) traits, so it
//! can be handed straight to a [`Spender`](neo_transaction::Spender).
//!
//! # Example
//!
//! ```no_run
//! use neo_rpc::{RpcClient, RpcConfig};
//!
//! let client = RpcClient::new(RpcConfig::new(
//!     "http://127.0.0.1:20332",
//!     "http://127.0.0.1:5000",
//! ))
//! .unwrap();
//! ```

pub mod client;
pub mod error;
pub mod types;


pub use client::RpcClient;
pub use error::RpcError;
pub use types::{AssetInfo, Balance, InvokeResult, RpcConfig};
