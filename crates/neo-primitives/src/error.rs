/// Unified error type for all primitives operations.
///
/// Covers errors from EC operations, encoding, amount parsing, and binary reads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrimitivesError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("invalid WIF format: {0}")]
    InvalidWif(String),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid hash: {0}")]
    InvalidHash(String),

    #[error("invalid base58: {0}")]
    InvalidBase58(String),

    #[error("invalid fixed8 amount: {0}")]
    InvalidFixed8(String),

    #[error("fixed8 amount overflow")]
    Fixed8Overflow,

    #[error("unexpected end of data: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("declared length {declared} exceeds remaining {remaining} bytes")]
    LengthExceedsBuffer { declared: u64, remaining: usize },

    #[error("non-canonical varint encoding of {0}")]
    NonCanonicalVarInt(u64),
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}
