/// NEO SDK - UTXO transaction building, signing, and serialization.
///
/// Provides the Transaction type with its binary codec, largest-first coin
/// selection, the assembler with per-asset overspend checks, witness
/// signing, the Draft / Sealed / Witnessed lifecycle, and the collaborator
/// traits used to fetch unspent outputs and submit raw transactions.

pub mod transaction;
pub mod data;
pub mod attribute;
pub mod input;
pub mod output;
pub mod witness;
pub mod utxo;
pub mod builder;
pub mod signer;
pub mod state;
pub mod collaborator;
pub mod spend;

mod error;
pub use error::{DecodeError, TransactionError};
pub use transaction::Transaction;
pub use data::{TransactionData, TransactionType};
pub use attribute::{AttributeUsage, TransactionAttribute};
pub use input::TransactionInput;
pub use output::TransactionOutput;
pub use witness::Witness;
pub use utxo::{select, select_with, Selection, SelectionPolicy, UnspentOutput};
pub use builder::{build, TransactionBuilder};
pub use signer::{attach_witness, sign, SingleSig, WitnessTemplate};
pub use state::{SealedTransaction, SubmittedTransaction, TxState, WitnessedTransaction};
pub use collaborator::{BalanceOracle, NetworkSubmitter, SubmitResult};
pub use spend::{KeyPair, SpendConfig, Spender};

#[cfg(test)]
mod tests;
