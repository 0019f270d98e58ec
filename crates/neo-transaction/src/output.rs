//! Transaction output: an amount of one asset locked to a script hash.

use neo_primitives::util::{NeoReader, NeoWriter};
use neo_primitives::{Fixed8, Uint160, Uint256};

use crate::error::ReadContext;
use crate::DecodeError;

/// A single output in a transaction.
///
/// # Wire format
///
/// | Field       | Size          |
/// |-------------|---------------|
/// | asset_id    | 32 bytes      |
/// | value       | 8 bytes (LE)  |
/// | script_hash | 20 bytes      |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransactionOutput {
    /// The asset being transferred.
    pub asset_id: Uint256,

    /// Amount in units of 10^-8.
    pub value: Fixed8,

    /// Script hash of the receiving contract (the recipient's address).
    pub script_hash: Uint160,
}

impl TransactionOutput {
    /// Encoded size of an output in bytes.
    pub const SIZE: usize = 60;

    /// Create an output paying `value` of `asset_id` to `script_hash`.
    pub fn new(asset_id: Uint256, value: Fixed8, script_hash: Uint160) -> Self {
        TransactionOutput {
            asset_id,
            value,
            script_hash,
        }
    }

    /// Deserialize a `TransactionOutput` from a `NeoReader`.
    ///
    /// The ledger only accepts positive amounts, so a zero or negative value
    /// is `Malformed`.
    pub fn read_from(reader: &mut NeoReader) -> Result<Self, DecodeError> {
        let asset_id = Uint256::new(reader.read_array().field("output asset_id")?);
        let value = Fixed8::from_units(reader.read_i64_le().field("output value")?);
        let script_hash = Uint160::new(reader.read_array().field("output script_hash")?);
        if !value.is_positive() {
            return Err(DecodeError::Malformed {
                field: "output value",
                reason: format!("non-positive value {}", value),
            });
        }
        Ok(TransactionOutput {
            asset_id,
            value,
            script_hash,
        })
    }

    /// Serialize this output into a `NeoWriter`.
    pub fn write_to(&self, writer: &mut NeoWriter) {
        writer.write_bytes(self.asset_id.as_bytes());
        writer.write_i64_le(self.value.units());
        writer.write_bytes(self.script_hash.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_wire_format() {
        let output = TransactionOutput::new(
            Uint256::from_hex("602c79718b16e442de58778e148d0b1084e3b2dffd5de6b7b16cee7969282de7")
                .unwrap(),
            Fixed8::from_units(713_399_960_000),
            Uint160::from_bytes(&hex::decode("23ba2703c53263e8d6e522dc32203339dcd8eee9").unwrap())
                .unwrap(),
        );
        let mut writer = NeoWriter::new();
        output.write_to(&mut writer);
        let bytes = writer.into_bytes();
        assert_eq!(bytes.len(), TransactionOutput::SIZE);
        assert_eq!(
            hex::encode(&bytes),
            "e72d286979ee6cb1b7e65dfddfb2e384100b8d148e7758de42e4168b71792c60c081f319a600000023ba2703c53263e8d6e522dc32203339dcd8eee9"
        );

        let mut reader = NeoReader::new(&bytes);
        assert_eq!(TransactionOutput::read_from(&mut reader).unwrap(), output);
    }

    #[test]
    fn test_non_positive_value_rejected() {
        for units in [0i64, -990] {
            let output = TransactionOutput::new(
                Uint256::new([0x60; 32]),
                Fixed8::from_units(units),
                Uint160::new([7; 20]),
            );
            let mut writer = NeoWriter::new();
            output.write_to(&mut writer);
            let bytes = writer.into_bytes();
            let mut reader = NeoReader::new(&bytes);
            assert!(matches!(
                TransactionOutput::read_from(&mut reader),
                Err(DecodeError::Malformed { field: "output value", .. })
            ));
        }
    }
}
