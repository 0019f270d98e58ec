//! Transaction input referencing a previous output.
//!
//! An input is only a pointer into ledger history: the id of the
//! transaction that created the output and the output's index. It carries
//! no value or script of its own; authorization comes from the witnesses.

use neo_primitives::util::{NeoReader, NeoWriter};
use neo_primitives::Uint256;

use crate::error::ReadContext;
use crate::DecodeError;

/// A single input in a transaction.
///
/// # Wire format
///
/// | Field      | Size          |
/// |------------|---------------|
/// | prev_hash  | 32 bytes      |
/// | prev_index | 2 bytes (LE)  |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransactionInput {
    /// Id of the transaction holding the output being spent, in wire order.
    pub prev_hash: Uint256,

    /// Index of the output within that transaction.
    pub prev_index: u16,
}

impl TransactionInput {
    /// Encoded size of an input in bytes.
    pub const SIZE: usize = 34;

    /// Create an input spending output `prev_index` of `prev_hash`.
    pub fn new(prev_hash: Uint256, prev_index: u16) -> Self {
        TransactionInput {
            prev_hash,
            prev_index,
        }
    }

    /// Deserialize a `TransactionInput` from a `NeoReader`.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of an encoded input.
    ///
    /// # Returns
    /// `Ok(TransactionInput)` on success, or a `DecodeError` if the data is truncated.
    pub fn read_from(reader: &mut NeoReader) -> Result<Self, DecodeError> {
        let prev_hash = Uint256::new(reader.read_array().field("input prev_hash")?);
        let prev_index = reader.read_u16_le().field("input prev_index")?;
        Ok(TransactionInput {
            prev_hash,
            prev_index,
        })
    }

    /// Serialize this input into a `NeoWriter`.
    pub fn write_to(&self, writer: &mut NeoWriter) {
        writer.write_bytes(self.prev_hash.as_bytes());
        writer.write_u16_le(self.prev_index);
    }
}
