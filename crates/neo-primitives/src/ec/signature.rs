//! ECDSA signature in the 64-byte `r || s` form used by invocation scripts.
//!
//! Signing hashes the message with SHA-256 and draws the nonce per RFC6979,
//! so signatures are deterministic for a given key and message.

use p256::ecdsa::signature::{Signer, Verifier};
use p256::ecdsa;

use crate::ec::private_key::PrivateKey;
use crate::ec::public_key::PublicKey;
use crate::PrimitivesError;

/// Length of a serialized signature.
pub const SIGNATURE_LEN: usize = 64;

/// An ECDSA signature with R and S components.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// The R component of the signature (32 bytes, big-endian).
    r: [u8; 32],
    /// The S component of the signature (32 bytes, big-endian).
    s: [u8; 32],
}

impl Signature {
    /// Create a signature from raw R and S 32-byte arrays.
    pub fn new(r: [u8; 32], s: [u8; 32]) -> Self {
        Signature { r, s }
    }

    /// Access the R component of the signature.
    pub fn r(&self) -> &[u8; 32] {
        &self.r
    }

    /// Access the S component of the signature.
    pub fn s(&self) -> &[u8; 32] {
        &self.s
    }

    /// Parse a 64-byte `r || s` signature.
    ///
    /// # Arguments
    /// * `bytes` - Exactly 64 bytes.
    ///
    /// # Returns
    /// `Ok(Signature)` on success, or an error for a wrong length.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != SIGNATURE_LEN {
            return Err(PrimitivesError::InvalidSignature(format!(
                "expected {} bytes, got {}",
                SIGNATURE_LEN,
                bytes.len()
            )));
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Ok(Signature { r, s })
    }

    /// Serialize as 64 bytes `r || s`.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        let mut out = [0u8; SIGNATURE_LEN];
        out[..32].copy_from_slice(&self.r);
        out[32..].copy_from_slice(&self.s);
        out
    }

    /// Sign `message` with `key` (SHA-256, RFC6979 nonce).
    ///
    /// # Arguments
    /// * `message` - The unhashed message bytes.
    /// * `key` - The signing key.
    ///
    /// # Returns
    /// `Ok(Signature)` on success, or an error if the backend rejects the key.
    pub fn sign(message: &[u8], key: &PrivateKey) -> Result<Self, PrimitivesError> {
        let sig: ecdsa::Signature = key
            .signing_key()
            .try_sign(message)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;
        Self::from_bytes(&sig.to_bytes())
    }

    /// Verify this signature against `message` and `key`.
    ///
    /// Returns `false` for any malformed component rather than an error.
    pub fn verify(&self, message: &[u8], key: &PublicKey) -> bool {
        let sig = match ecdsa::Signature::from_slice(&self.to_bytes()) {
            Ok(s) => s,
            Err(_) => return false,
        };
        key.verifying_key().verify(message, &sig).is_ok()
    }
}
