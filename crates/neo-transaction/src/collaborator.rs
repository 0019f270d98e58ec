//! Interfaces to the outside world: balance lookup and submission.
//!
//! The core never talks to the network itself. Callers supply
//! implementations of these traits (the `neo-rpc` crate provides HTTP
//! ones; tests use in-memory mocks).

use neo_primitives::Uint256;
use neo_script::Address;

use crate::utxo::UnspentOutput;
use crate::TransactionError;

/// Result of handing a raw transaction to the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResult {
    /// Whether the node accepted the transaction into its pool.
    pub accepted: bool,
    /// Optional message from the node, e.g. the rejection reason.
    pub message: Option<String>,
}

impl SubmitResult {
    /// An acceptance with no message.
    pub fn accepted() -> Self {
        SubmitResult {
            accepted: true,
            message: None,
        }
    }

    /// A rejection carrying the node's reason.
    pub fn rejected(message: impl Into<String>) -> Self {
        SubmitResult {
            accepted: false,
            message: Some(message.into()),
        }
    }
}

/// Source of unspent outputs.
pub trait BalanceOracle {
    /// List the unspent outputs of `asset_id` owned by `address`.
    ///
    /// # Returns
    /// The outputs in the order the source reports them, or a `Network`
    /// error if the lookup failed.
    fn unspent_outputs(
        &self,
        address: &Address,
        asset_id: &Uint256,
    ) -> Result<Vec<UnspentOutput>, TransactionError>;
}

/// Sink for signed transactions.
pub trait NetworkSubmitter {
    /// Submit the full wire encoding of a witnessed transaction.
    ///
    /// # Returns
    /// The node's verdict. Transport failures are errors; a rejection by
    /// the node is `Ok` with `accepted == false`.
    fn submit(&self, raw_tx: &[u8]) -> Result<SubmitResult, TransactionError>;
}
