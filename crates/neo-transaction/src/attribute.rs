//! Transaction attributes.
//!
//! Attributes attach metadata to a transaction without moving value. The
//! usage byte decides how the data is framed on the wire: hashes and keys
//! are fixed-size, URLs carry a one-byte length and descriptions and
//! remarks are VarInt-prefixed.

use neo_primitives::util::{NeoReader, NeoWriter};
use neo_primitives::Uint160;

use crate::error::ReadContext;
use crate::{DecodeError, TransactionError};

/// What an attribute's data means.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeUsage {
    ContractHash,
    Ecdh02,
    Ecdh03,
    /// A script hash that must be covered by a witness.
    Script,
    Vote,
    DescriptionUrl,
    Description,
    /// `Hash1`..`Hash15`; holds the index 1..=15.
    Hash(u8),
    /// `Remark`, `Remark1`..`Remark15`; holds the index 0..=15.
    Remark(u8),
}

/// How an attribute's data is framed on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Framing {
    Fixed(usize),
    ByteLength,
    VarBytes,
}

impl AttributeUsage {
    /// Decode a usage byte.
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0x00 => Some(AttributeUsage::ContractHash),
            0x02 => Some(AttributeUsage::Ecdh02),
            0x03 => Some(AttributeUsage::Ecdh03),
            0x20 => Some(AttributeUsage::Script),
            0x30 => Some(AttributeUsage::Vote),
            0x81 => Some(AttributeUsage::DescriptionUrl),
            0x90 => Some(AttributeUsage::Description),
            0xa1..=0xaf => Some(AttributeUsage::Hash(b - 0xa0)),
            0xf0..=0xff => Some(AttributeUsage::Remark(b - 0xf0)),
            _ => None,
        }
    }

    /// The usage byte written on the wire.
    ///
    /// Out-of-range indices in `Hash` / `Remark` are clamped into range.
    pub fn to_byte(self) -> u8 {
        match self {
            AttributeUsage::ContractHash => 0x00,
            AttributeUsage::Ecdh02 => 0x02,
            AttributeUsage::Ecdh03 => 0x03,
            AttributeUsage::Script => 0x20,
            AttributeUsage::Vote => 0x30,
            AttributeUsage::DescriptionUrl => 0x81,
            AttributeUsage::Description => 0x90,
            AttributeUsage::Hash(i) => 0xa0 + i.clamp(1, 15),
            AttributeUsage::Remark(i) => 0xf0 + i.min(15),
        }
    }

    fn framing(self) -> Framing {
        match self {
            AttributeUsage::ContractHash
            | AttributeUsage::Ecdh02
            | AttributeUsage::Ecdh03
            | AttributeUsage::Vote
            | AttributeUsage::Hash(_) => Framing::Fixed(32),
            AttributeUsage::Script => Framing::Fixed(20),
            AttributeUsage::DescriptionUrl => Framing::ByteLength,
            AttributeUsage::Description | AttributeUsage::Remark(_) => Framing::VarBytes,
        }
    }
}

/// A single attribute: a usage tag and its data.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransactionAttribute {
    usage: AttributeUsage,
    data: Vec<u8>,
}

impl TransactionAttribute {
    /// Create an attribute, checking that `data` fits the usage's framing.
    ///
    /// # Returns
    /// The attribute, or `InvalidTransaction` if a fixed-size usage gets the
    /// wrong length or a URL exceeds 255 bytes.
    pub fn new(usage: AttributeUsage, data: Vec<u8>) -> Result<Self, TransactionError> {
        if AttributeUsage::from_byte(usage.to_byte()) != Some(usage) {
            return Err(TransactionError::InvalidTransaction(format!(
                "attribute usage {:?} has no wire encoding",
                usage
            )));
        }
        match usage.framing() {
            Framing::Fixed(n) if data.len() != n => {
                return Err(TransactionError::InvalidTransaction(format!(
                    "attribute {:?} needs {} bytes, got {}",
                    usage,
                    n,
                    data.len()
                )));
            }
            Framing::ByteLength if data.len() > u8::MAX as usize => {
                return Err(TransactionError::InvalidTransaction(format!(
                    "attribute {:?} is limited to 255 bytes, got {}",
                    usage,
                    data.len()
                )));
            }
            _ => {}
        }
        Ok(TransactionAttribute { usage, data })
    }

    /// A `Script` attribute naming `script_hash` as a required signer.
    pub fn script(script_hash: &Uint160) -> Self {
        TransactionAttribute {
            usage: AttributeUsage::Script,
            data: script_hash.to_bytes().to_vec(),
        }
    }

    /// A `Remark` attribute carrying free-form bytes.
    pub fn remark(data: &[u8]) -> Self {
        TransactionAttribute {
            usage: AttributeUsage::Remark(0),
            data: data.to_vec(),
        }
    }

    pub fn usage(&self) -> AttributeUsage {
        self.usage
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The script hash named by a `Script` attribute.
    pub fn script_hash(&self) -> Option<Uint160> {
        match self.usage {
            AttributeUsage::Script => Uint160::from_bytes(&self.data).ok(),
            _ => None,
        }
    }

    /// Deserialize an attribute from a `NeoReader`.
    pub fn read_from(reader: &mut NeoReader) -> Result<Self, DecodeError> {
        let b = reader.read_u8().field("attribute usage")?;
        let usage = AttributeUsage::from_byte(b).ok_or(DecodeError::UnknownAttributeUsage(b))?;
        let data = match usage.framing() {
            Framing::Fixed(n) => reader.read_bytes(n).field("attribute data")?,
            Framing::ByteLength => {
                let len = reader.read_u8().field("attribute length")? as usize;
                if len > reader.remaining() {
                    return Err(DecodeError::LengthExceedsBuffer {
                        field: "attribute data",
                        declared: len as u64,
                        remaining: reader.remaining(),
                    });
                }
                reader.read_bytes(len).field("attribute data")?
            }
            Framing::VarBytes => reader.read_var_bytes().field("attribute data")?,
        };
        Ok(TransactionAttribute {
            usage,
            data: data.to_vec(),
        })
    }

    /// Serialize this attribute into a `NeoWriter`.
    pub fn write_to(&self, writer: &mut NeoWriter) {
        writer.write_u8(self.usage.to_byte());
        match self.usage.framing() {
            Framing::Fixed(_) => writer.write_bytes(&self.data),
            Framing::ByteLength => {
                writer.write_u8(self.data.len() as u8);
                writer.write_bytes(&self.data);
            }
            Framing::VarBytes => writer.write_var_bytes(&self.data),
        }
    }
}
