use neo_primitives::{Fixed8, PrimitivesError, Uint256};

/// Reasons a byte sequence is not a well-formed transaction.
///
/// Every variant names the field being read, so callers can tell a
/// truncated witness from a truncated input without parsing messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The buffer ended inside a fixed-width field.
    #[error("truncated {field}: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },

    /// A length prefix or element count promises more than the buffer holds.
    #[error("{field} declares {declared} but only {remaining} bytes remain")]
    LengthExceedsBuffer {
        field: &'static str,
        declared: u64,
        remaining: usize,
    },

    /// A VarInt used a wider encoding than its value needs.
    #[error("non-canonical varint in {field}")]
    NonCanonicalVarInt { field: &'static str },

    /// The leading type byte is not a known transaction type.
    #[error("unknown transaction type 0x{0:02x}")]
    UnknownType(u8),

    /// An attribute usage byte is not a known usage.
    #[error("unknown attribute usage 0x{0:02x}")]
    UnknownAttributeUsage(u8),

    /// Bytes remain after a complete transaction.
    #[error("trailing {0} bytes after transaction")]
    TrailingBytes(usize),

    /// A field decoded but holds a value the ledger rejects.
    #[error("malformed {field}: {reason}")]
    Malformed { field: &'static str, reason: String },

    /// The input was not valid hex.
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Wire bytes could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Coin selection cannot cover the required amount.
    #[error("insufficient funds: required {required}, available {available}, short by {shortfall}")]
    InsufficientFunds {
        required: Fixed8,
        available: Fixed8,
        shortfall: Fixed8,
    },

    /// Outputs plus fee for an asset exceed what the caller declared available.
    #[error("overspend of asset {asset_id}: required {required}, available {available}")]
    Overspend {
        asset_id: Uint256,
        required: Fixed8,
        available: Fixed8,
    },

    /// Key material is missing or invalid, or the transaction is already witnessed.
    #[error("signing error: {0}")]
    SigningError(String),

    /// A witness does not authorize the transaction it is attached to.
    #[error("invalid witness: {0}")]
    InvalidWitness(String),

    /// The transaction structure is invalid (e.g. a fixed-size attribute of the wrong length).
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    /// A sum of amounts does not fit in a `Fixed8`.
    #[error("amount overflow")]
    AmountOverflow,

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),

    /// A collaborator (balance lookup or submission) failed.
    #[error("network error: {0}")]
    Network(String),

    /// An underlying script error (forwarded from `neo-script`).
    #[error("script error: {0}")]
    Script(#[from] neo_script::ScriptError),

    /// An underlying primitives error (forwarded from `neo-primitives`).
    #[error("primitives error: {0}")]
    Primitives(#[from] PrimitivesError),
}

/// Attach the name of the field being read to a reader error.
pub(crate) trait ReadContext<T> {
    fn field(self, name: &'static str) -> Result<T, DecodeError>;
}

impl<T> ReadContext<T> for Result<T, PrimitivesError> {
    fn field(self, name: &'static str) -> Result<T, DecodeError> {
        self.map_err(|e| match e {
            PrimitivesError::UnexpectedEof { needed, remaining } => DecodeError::Truncated {
                field: name,
                needed,
                remaining,
            },
            PrimitivesError::LengthExceedsBuffer { declared, remaining } => {
                DecodeError::LengthExceedsBuffer {
                    field: name,
                    declared,
                    remaining,
                }
            }
            PrimitivesError::NonCanonicalVarInt(_) => DecodeError::NonCanonicalVarInt { field: name },
            other => DecodeError::Malformed {
                field: name,
                reason: other.to_string(),
            },
        })
    }
}
