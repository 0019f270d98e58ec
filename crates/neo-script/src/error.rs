/// Error types for script operations.
///
/// Covers parsing errors, push-data encoding limits, witness script
/// classification and address validation.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Generic invalid script error.
    #[error("invalid script: {0}")]
    InvalidScript(String),

    /// Attempted to use append_opcodes for a push data opcode.
    #[error("use append_push_data for push data opcodes: {0}")]
    InvalidOpcodeType(String),

    /// Invalid address string.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid address length after Base58 decoding.
    #[error("invalid address length for '{0}'")]
    InvalidAddressLength(String),

    /// Address version byte does not match the expected network version.
    #[error("unsupported address version 0x{found:02x}, expected 0x{expected:02x}")]
    UnsupportedAddressVersion { found: u8, expected: u8 },

    /// Base58Check checksum does not match.
    #[error("checksum failed")]
    EncodingChecksumFailed,

    /// Invalid hex string.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Push data exceeds maximum allowed size.
    #[error("data too big")]
    DataTooBig,

    /// Script is not a standard single-signature verification script.
    #[error("not a signature contract")]
    NotSignatureContract,

    /// Error from primitives crate.
    #[error("primitives error: {0}")]
    Primitives(#[from] neo_primitives::PrimitivesError),
}
