//! The transaction type and its binary codec.

use std::collections::BTreeMap;

use neo_primitives::util::{NeoReader, NeoWriter, VarInt};
use neo_primitives::{Fixed8, Uint160, Uint256};

use crate::attribute::TransactionAttribute;
use crate::data::{TransactionData, TransactionType};
use crate::error::ReadContext;
use crate::input::TransactionInput;
use crate::output::TransactionOutput;
use crate::state::{SealedTransaction, TxState};
use crate::witness::Witness;
use crate::{DecodeError, TransactionError};

/// Smallest possible encoding of an attribute (usage + empty VarInt data).
const MIN_ATTRIBUTE_SIZE: usize = 2;

/// Smallest possible encoding of a witness (two empty scripts).
const MIN_WITNESS_SIZE: usize = 2;

/// A UTXO transaction.
///
/// # Wire format
///
/// | Field         | Size                          |
/// |---------------|-------------------------------|
/// | type          | 1 byte                        |
/// | version       | 1 byte                        |
/// | payload       | depends on type               |
/// | attributes    | VarInt count + attributes     |
/// | inputs        | VarInt count + 34 bytes each  |
/// | outputs       | VarInt count + 60 bytes each  |
/// | witnesses     | VarInt count + witnesses      |
///
/// Everything before the witnesses is the *hashable* section: it is what
/// gets signed and what the transaction id is computed over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    /// Format version; for invocations, version 1 adds the `gas` field.
    pub version: u8,

    /// Type-specific payload. Determines the type byte.
    pub data: TransactionData,

    /// Ordered attributes.
    pub attributes: Vec<TransactionAttribute>,

    /// Ordered inputs.
    pub inputs: Vec<TransactionInput>,

    /// Ordered outputs.
    pub outputs: Vec<TransactionOutput>,

    /// Witnesses, ascending by verification script hash.
    pub witnesses: Vec<Witness>,
}

impl Transaction {
    /// Create an empty transaction carrying `data`, at the type's default version.
    pub fn new(data: TransactionData) -> Self {
        Transaction {
            version: data.default_version(),
            data,
            attributes: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            witnesses: Vec::new(),
        }
    }

    /// The type byte derived from the payload.
    pub fn tx_type(&self) -> TransactionType {
        self.data.tx_type()
    }

    // -----------------------------------------------------------------
    // Deserialization
    // -----------------------------------------------------------------

    /// Parse a transaction from a hex-encoded string.
    pub fn from_hex(hex_str: &str) -> Result<Self, DecodeError> {
        let bytes = hex::decode(hex_str).map_err(|e| DecodeError::InvalidHex(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Parse a transaction from raw bytes.
    ///
    /// The slice must contain exactly one complete transaction, witnesses
    /// included, with no trailing data.
    ///
    /// # Returns
    /// `Ok(Transaction)` on success, or a `DecodeError` naming the field
    /// that was truncated or malformed.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = NeoReader::new(bytes);
        let tx = Self::read_from(&mut reader)?;
        if reader.remaining() != 0 {
            return Err(DecodeError::TrailingBytes(reader.remaining()));
        }
        Ok(tx)
    }

    /// Deserialize a full transaction (hashable section plus witnesses).
    pub fn read_from(reader: &mut NeoReader) -> Result<Self, DecodeError> {
        let mut tx = Self::read_hashable(reader)?;

        let count = reader.read_count(MIN_WITNESS_SIZE).field("witness count")?;
        let mut witnesses = Vec::with_capacity(count);
        for _ in 0..count {
            witnesses.push(Witness::read_from(reader)?);
        }
        tx.witnesses = witnesses;
        Ok(tx)
    }

    /// Deserialize only the hashable section; the result has no witnesses.
    pub fn read_hashable(reader: &mut NeoReader) -> Result<Self, DecodeError> {
        let tx_type = TransactionType::from_byte(reader.read_u8().field("type")?)?;
        let version = reader.read_u8().field("version")?;
        let data = TransactionData::read_from(reader, tx_type, version)?;

        let count = reader
            .read_count(MIN_ATTRIBUTE_SIZE)
            .field("attribute count")?;
        let mut attributes = Vec::with_capacity(count);
        for _ in 0..count {
            attributes.push(TransactionAttribute::read_from(reader)?);
        }

        let count = reader
            .read_count(TransactionInput::SIZE)
            .field("input count")?;
        let mut inputs = Vec::with_capacity(count);
        for _ in 0..count {
            inputs.push(TransactionInput::read_from(reader)?);
        }

        let count = reader
            .read_count(TransactionOutput::SIZE)
            .field("output count")?;
        let mut outputs = Vec::with_capacity(count);
        for _ in 0..count {
            outputs.push(TransactionOutput::read_from(reader)?);
        }

        Ok(Transaction {
            version,
            data,
            attributes,
            inputs,
            outputs,
            witnesses: Vec::new(),
        })
    }

    // -----------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------

    /// Write the hashable section: everything except the witnesses.
    pub fn write_hashable(&self, writer: &mut NeoWriter) {
        writer.write_u8(self.tx_type() as u8);
        writer.write_u8(self.version);
        self.data.write_to(writer, self.version);

        writer.write_varint(VarInt::from(self.attributes.len()));
        for attribute in &self.attributes {
            attribute.write_to(writer);
        }

        writer.write_varint(VarInt::from(self.inputs.len()));
        for input in &self.inputs {
            input.write_to(writer);
        }

        writer.write_varint(VarInt::from(self.outputs.len()));
        for output in &self.outputs {
            output.write_to(writer);
        }
    }

    /// The bytes that are signed and hashed. Witnesses are excluded.
    pub fn hashable_bytes(&self) -> Vec<u8> {
        let mut writer = NeoWriter::with_capacity(256);
        self.write_hashable(&mut writer);
        writer.into_bytes()
    }

    /// Serialize the full transaction: hashable section then witnesses.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = NeoWriter::with_capacity(512);
        self.write_hashable(&mut writer);
        writer.write_varint(VarInt::from(self.witnesses.len()));
        for witness in &self.witnesses {
            witness.write_to(&mut writer);
        }
        writer.into_bytes()
    }

    /// Serialize the full transaction as lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    // -----------------------------------------------------------------
    // Identity
    // -----------------------------------------------------------------

    /// Transaction id: double SHA-256 of the hashable bytes.
    pub fn hash(&self) -> Uint256 {
        Uint256::hash_of(&self.hashable_bytes())
    }

    /// Transaction id in display (byte-reversed) hex.
    pub fn tx_id_hex(&self) -> String {
        self.hash().to_hex()
    }

    // -----------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------

    /// `Draft` while no witnesses are attached, `Witnessed` afterwards.
    pub fn state(&self) -> TxState {
        if self.witnesses.is_empty() {
            TxState::Draft
        } else {
            TxState::Witnessed
        }
    }

    /// Freeze the hashable fields for signing.
    ///
    /// # Returns
    /// The sealed transaction, or `SigningError` if witnesses are already
    /// attached (signing over them would be self-referential).
    pub fn seal(self) -> Result<SealedTransaction, TransactionError> {
        if !self.witnesses.is_empty() {
            return Err(TransactionError::SigningError(format!(
                "transaction {} already has {} witness(es)",
                self.tx_id_hex(),
                self.witnesses.len()
            )));
        }
        Ok(SealedTransaction::new(self))
    }

    /// Script hashes that must be covered by a witness: those named by
    /// `Script` attributes, deduplicated and ascending.
    pub fn attribute_script_hashes(&self) -> Vec<Uint160> {
        let mut hashes: Vec<Uint160> = self
            .attributes
            .iter()
            .filter_map(TransactionAttribute::script_hash)
            .collect();
        hashes.sort();
        hashes.dedup();
        hashes
    }

    /// Check the attached witnesses against the current hashable bytes.
    ///
    /// Fails if there are no witnesses, if they are not strictly ascending
    /// by script hash, if a standard single-signature witness does not
    /// verify, or if a `Script` attribute hash has no witness. Non-standard
    /// verification scripts are not executed.
    pub fn verify_witnesses(&self) -> Result<(), TransactionError> {
        if self.witnesses.is_empty() {
            return Err(TransactionError::InvalidWitness(
                "transaction has no witnesses".to_string(),
            ));
        }

        let hashes: Vec<Uint160> = self.witnesses.iter().map(Witness::script_hash).collect();
        if hashes.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(TransactionError::InvalidWitness(
                "witnesses are not in ascending script hash order".to_string(),
            ));
        }

        let message = self.hashable_bytes();
        for (witness, hash) in self.witnesses.iter().zip(&hashes) {
            if witness.verification_script.is_signature_contract() && !witness.verify(&message) {
                return Err(TransactionError::InvalidWitness(format!(
                    "signature for {} does not verify",
                    hash
                )));
            }
        }

        for required in self.attribute_script_hashes() {
            if hashes.binary_search(&required).is_err() {
                return Err(TransactionError::InvalidWitness(format!(
                    "no witness for script hash {}",
                    required
                )));
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------
    // Amounts
    // -----------------------------------------------------------------

    /// Sum of output values per asset.
    ///
    /// # Returns
    /// The totals, or `AmountOverflow` if an asset's sum does not fit.
    pub fn output_totals(&self) -> Result<BTreeMap<Uint256, Fixed8>, TransactionError> {
        let mut totals: BTreeMap<Uint256, Fixed8> = BTreeMap::new();
        for output in &self.outputs {
            let entry = totals.entry(output.asset_id).or_insert(Fixed8::ZERO);
            *entry = entry
                .checked_add(output.value)
                .ok_or(TransactionError::AmountOverflow)?;
        }
        Ok(totals)
    }
}
