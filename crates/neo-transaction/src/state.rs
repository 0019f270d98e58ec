//! Signing lifecycle: Draft -> Sealed -> Witnessed -> Submitted.
//!
//! A `Transaction` is a draft and can be edited freely. Sealing takes it by
//! value and snapshots the hashable bytes, so nothing can change between
//! computing the message and attaching the witnesses. A witnessed
//! transaction only goes back to draft by dropping its witnesses.

use std::fmt;

use log::{debug, info, warn};
use neo_primitives::ec::PrivateKey;
use neo_primitives::Uint256;

use crate::collaborator::{NetworkSubmitter, SubmitResult};
use crate::signer::{SingleSig, WitnessTemplate};
use crate::transaction::Transaction;
use crate::TransactionError;

/// Where a transaction is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxState {
    /// Editable, with no witnesses attached.
    Draft,
    /// Hashable bytes fixed and awaiting signatures.
    Sealed,
    /// Witnesses attached.
    Witnessed,
    /// Handed to the network, with its verdict recorded.
    Submitted,
}

impl fmt::Display for TxState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TxState::Draft => "draft",
            TxState::Sealed => "sealed",
            TxState::Witnessed => "witnessed",
            TxState::Submitted => "submitted",
        };
        f.write_str(name)
    }
}

/// A transaction whose hashable fields are final.
#[derive(Clone, Debug)]
pub struct SealedTransaction {
    tx: Transaction,
    hashable: Vec<u8>,
    hash: Uint256,
}

impl SealedTransaction {
    /// Only `Transaction::seal` constructs this, after checking for witnesses.
    pub(crate) fn new(tx: Transaction) -> Self {
        let hashable = tx.hashable_bytes();
        let hash = Uint256::hash_of(&hashable);
        SealedTransaction { tx, hashable, hash }
    }

    /// The sealed transaction.
    pub fn tx(&self) -> &Transaction {
        &self.tx
    }

    /// The message every witness signs.
    pub fn hashable_bytes(&self) -> &[u8] {
        &self.hashable
    }

    /// Transaction id, cached at sealing.
    pub fn hash(&self) -> Uint256 {
        self.hash
    }

    /// Always `Sealed`.
    pub fn state(&self) -> TxState {
        TxState::Sealed
    }

    /// Give the draft back for editing.
    pub fn into_draft(self) -> Transaction {
        self.tx
    }

    /// Produce one witness per signer and attach them in ascending
    /// script hash order.
    ///
    /// # Arguments
    /// * `signers` - One template per account that must authorize the transaction.
    ///
    /// # Returns
    /// The witnessed transaction, or `SigningError` if there are no
    /// signers, two signers share a script hash, or a signer fails.
    pub fn sign_with(
        self,
        signers: &[&dyn WitnessTemplate],
    ) -> Result<WitnessedTransaction, TransactionError> {
        if signers.is_empty() {
            return Err(TransactionError::SigningError(
                "no signers supplied".to_string(),
            ));
        }

        let mut witnesses = signers
            .iter()
            .map(|signer| signer.sign(&self.hashable))
            .collect::<Result<Vec<_>, _>>()?;
        witnesses.sort_by_key(|w| w.script_hash());
        if let Some(pair) = witnesses
            .windows(2)
            .find(|pair| pair[0].script_hash() == pair[1].script_hash())
        {
            return Err(TransactionError::SigningError(format!(
                "duplicate signer {}",
                pair[0].script_hash()
            )));
        }

        debug!("attached {} witness(es) to {}", witnesses.len(), self.hash);
        let mut tx = self.tx;
        tx.witnesses = witnesses;
        Ok(WitnessedTransaction { tx, hash: self.hash })
    }

    /// Sign with a single private key.
    pub fn sign(self, key: &PrivateKey) -> Result<WitnessedTransaction, TransactionError> {
        let signer = SingleSig::new(key.clone());
        self.sign_with(&[&signer])
    }
}

/// A transaction with its witnesses attached, ready to submit.
#[derive(Clone, Debug)]
pub struct WitnessedTransaction {
    tx: Transaction,
    hash: Uint256,
}

impl WitnessedTransaction {
    /// The transaction, witnesses included.
    pub fn tx(&self) -> &Transaction {
        &self.tx
    }

    /// Transaction id carried over from sealing.
    pub fn hash(&self) -> Uint256 {
        self.hash
    }

    /// Display form of the transaction id.
    pub fn tx_id_hex(&self) -> String {
        self.hash.to_hex()
    }

    pub fn state(&self) -> TxState {
        TxState::Witnessed
    }

    /// Full wire encoding, witnesses included.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.tx.to_bytes()
    }

    /// Hex of `to_bytes`, as relayed by `sendrawtransaction`.
    pub fn to_hex(&self) -> String {
        self.tx.to_hex()
    }

    /// Drop the witnesses and return to draft so fields can be edited.
    pub fn into_draft(self) -> Transaction {
        let mut tx = self.tx;
        tx.witnesses.clear();
        tx
    }

    /// Unwrap the transaction with its witnesses.
    pub fn into_transaction(self) -> Transaction {
        self.tx
    }

    /// Hand the encoded transaction to `submitter`.
    ///
    /// # Returns
    /// The submitted transaction with the network's verdict, or the
    /// collaborator's error. A rejection is a verdict, not an error.
    pub fn submit(
        self,
        submitter: &dyn NetworkSubmitter,
    ) -> Result<SubmittedTransaction, TransactionError> {
        let raw = self.tx.to_bytes();
        let result = submitter.submit(&raw)?;
        if result.accepted {
            info!("transaction {} accepted", self.hash);
        } else {
            warn!(
                "transaction {} rejected: {}",
                self.hash,
                result.message.as_deref().unwrap_or("no reason given")
            );
        }
        Ok(SubmittedTransaction {
            tx: self.tx,
            hash: self.hash,
            result,
        })
    }
}

/// Wrap a decoded transaction after checking its witnesses.
impl TryFrom<Transaction> for WitnessedTransaction {
    type Error = TransactionError;

    fn try_from(tx: Transaction) -> Result<Self, Self::Error> {
        tx.verify_witnesses()?;
        let hash = tx.hash();
        Ok(WitnessedTransaction { tx, hash })
    }
}

/// A transaction that has been handed to the network.
#[derive(Clone, Debug)]
pub struct SubmittedTransaction {
    tx: Transaction,
    hash: Uint256,
    result: SubmitResult,
}

impl SubmittedTransaction {
    /// The transaction as submitted.
    pub fn tx(&self) -> &Transaction {
        &self.tx
    }

    /// Transaction id.
    pub fn hash(&self) -> Uint256 {
        self.hash
    }

    /// Display form of the transaction id, as explorers show it.
    pub fn tx_id_hex(&self) -> String {
        self.hash.to_hex()
    }

    /// The network's verdict.
    pub fn result(&self) -> &SubmitResult {
        &self.result
    }

    /// Shorthand for `result().accepted`.
    pub fn accepted(&self) -> bool {
        self.result.accepted
    }

    pub fn state(&self) -> TxState {
        TxState::Submitted
    }
}
