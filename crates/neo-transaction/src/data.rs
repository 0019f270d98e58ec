//! Transaction types and their type-specific payloads.
//!
//! The payload sits between the version byte and the attributes. Keeping
//! the type tag derived from the payload means the two can never disagree.

use std::fmt;

use neo_primitives::util::{NeoReader, NeoWriter, VarInt};
use neo_primitives::Fixed8;
use neo_script::Script;

use crate::error::ReadContext;
use crate::input::TransactionInput;
use crate::DecodeError;

/// The leading type byte of a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TransactionType {
    Miner = 0x00,
    Issue = 0x01,
    Claim = 0x02,
    Contract = 0x80,
    Invocation = 0xd1,
}

impl TransactionType {
    /// Decode a type byte.
    pub fn from_byte(b: u8) -> Result<Self, DecodeError> {
        match b {
            0x00 => Ok(TransactionType::Miner),
            0x01 => Ok(TransactionType::Issue),
            0x02 => Ok(TransactionType::Claim),
            0x80 => Ok(TransactionType::Contract),
            0xd1 => Ok(TransactionType::Invocation),
            other => Err(DecodeError::UnknownType(other)),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransactionType::Miner => "MinerTransaction",
            TransactionType::Issue => "IssueTransaction",
            TransactionType::Claim => "ClaimTransaction",
            TransactionType::Contract => "ContractTransaction",
            TransactionType::Invocation => "InvocationTransaction",
        };
        f.write_str(name)
    }
}

/// Type-specific payload of a transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransactionData {
    /// Block reward; the nonce makes each miner transaction unique.
    Miner { nonce: u32 },
    /// Issues a registered asset.
    Issue,
    /// Claims GAS generated by the listed spent NEO outputs.
    Claim { claims: Vec<TransactionInput> },
    /// Plain asset transfer.
    Contract,
    /// Runs `script` on the VM. `gas` is only serialized from version 1 on.
    Invocation { script: Script, gas: Fixed8 },
}

impl TransactionData {
    /// An invocation payload with no system fee.
    pub fn invocation(script: Script) -> Self {
        TransactionData::Invocation {
            script,
            gas: Fixed8::ZERO,
        }
    }

    /// The type byte this payload is written under.
    pub fn tx_type(&self) -> TransactionType {
        match self {
            TransactionData::Miner { .. } => TransactionType::Miner,
            TransactionData::Issue => TransactionType::Issue,
            TransactionData::Claim { .. } => TransactionType::Claim,
            TransactionData::Contract => TransactionType::Contract,
            TransactionData::Invocation { .. } => TransactionType::Invocation,
        }
    }

    /// The version a new transaction of this type is created with.
    pub fn default_version(&self) -> u8 {
        match self {
            TransactionData::Invocation { .. } => 1,
            _ => 0,
        }
    }

    /// Deserialize the payload for `tx_type` at `version`.
    pub fn read_from(
        reader: &mut NeoReader,
        tx_type: TransactionType,
        version: u8,
    ) -> Result<Self, DecodeError> {
        match tx_type {
            TransactionType::Miner => Ok(TransactionData::Miner {
                nonce: reader.read_u32_le().field("miner nonce")?,
            }),
            TransactionType::Issue => Ok(TransactionData::Issue),
            TransactionType::Claim => {
                let count = reader
                    .read_count(TransactionInput::SIZE)
                    .field("claim count")?;
                let mut claims = Vec::with_capacity(count);
                for _ in 0..count {
                    claims.push(TransactionInput::read_from(reader)?);
                }
                Ok(TransactionData::Claim { claims })
            }
            TransactionType::Contract => Ok(TransactionData::Contract),
            TransactionType::Invocation => {
                let script = reader.read_var_bytes().field("invocation script")?;
                let gas = if version >= 1 {
                    Fixed8::from_units(reader.read_i64_le().field("invocation gas")?)
                } else {
                    Fixed8::ZERO
                };
                if gas.units() < 0 {
                    return Err(DecodeError::Malformed {
                        field: "invocation gas",
                        reason: format!("negative gas {}", gas),
                    });
                }
                Ok(TransactionData::Invocation {
                    script: Script::from_bytes(script),
                    gas,
                })
            }
        }
    }

    /// Serialize the payload for a transaction at `version`.
    pub fn write_to(&self, writer: &mut NeoWriter, version: u8) {
        match self {
            TransactionData::Miner { nonce } => writer.write_u32_le(*nonce),
            TransactionData::Issue | TransactionData::Contract => {}
            TransactionData::Claim { claims } => {
                writer.write_varint(VarInt::from(claims.len()));
                for claim in claims {
                    claim.write_to(writer);
                }
            }
            TransactionData::Invocation { script, gas } => {
                writer.write_var_bytes(script.to_bytes());
                if version >= 1 {
                    writer.write_i64_le(gas.units());
                }
            }
        }
    }
}
