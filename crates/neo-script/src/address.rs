/// Address handling.
///
/// An address is the Base58Check encoding of a version byte followed by a
/// 20-byte script hash. Addresses identify the owner of outputs and are
/// the key into the balance lookup.

use std::fmt;

use neo_primitives::base58;
use neo_primitives::ec::PublicKey;
use neo_primitives::{PrimitivesError, Uint160};

use crate::{Script, ScriptError};

/// Address version byte used by the public network (addresses start with 'A').
pub const ADDRESS_VERSION: u8 = 0x17;

/// Length of the decoded payload: version(1) + script hash(20) + checksum(4).
const ADDRESS_DECODED_LEN: usize = 25;

/// A Base58Check address together with its decoded parts.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    /// The human-readable Base58Check address string.
    pub address_string: String,
    /// Script hash of the verification script, in wire order.
    pub script_hash: Uint160,
    /// The version byte the address was encoded with.
    pub version: u8,
}

impl Address {
    /// Parse an address carrying the default version byte.
    pub fn from_string(addr: &str) -> Result<Self, ScriptError> {
        Self::from_string_with_version(addr, ADDRESS_VERSION)
    }

    /// Parse an address, requiring `version` as its version byte.
    ///
    /// # Arguments
    /// * `addr` - The Base58Check address string.
    /// * `version` - Expected version byte.
    ///
    /// # Returns
    /// An `Address` or an error for a bad encoding, length, checksum or version.
    pub fn from_string_with_version(addr: &str, version: u8) -> Result<Self, ScriptError> {
        let decoded = base58::decode(addr)
            .map_err(|_| ScriptError::InvalidAddress(format!("bad char for '{}'", addr)))?;
        if decoded.len() != ADDRESS_DECODED_LEN {
            return Err(ScriptError::InvalidAddressLength(addr.to_string()));
        }

        let payload = base58::check_decode(addr).map_err(|e| match e {
            PrimitivesError::ChecksumMismatch => ScriptError::EncodingChecksumFailed,
            other => ScriptError::Primitives(other),
        })?;

        if payload[0] != version {
            return Err(ScriptError::UnsupportedAddressVersion {
                found: payload[0],
                expected: version,
            });
        }

        Ok(Address {
            address_string: addr.to_string(),
            script_hash: Uint160::from_bytes(&payload[1..21])?,
            version,
        })
    }

    /// Create an address from a script hash.
    pub fn from_script_hash(script_hash: &Uint160, version: u8) -> Self {
        let mut payload = Vec::with_capacity(21);
        payload.push(version);
        payload.extend_from_slice(script_hash.as_bytes());
        Address {
            address_string: base58::check_encode(&payload),
            script_hash: *script_hash,
            version,
        }
    }

    /// Create the address of the single-signature contract for `key`.
    pub fn from_public_key(key: &PublicKey, version: u8) -> Self {
        let script = Script::signature_contract(key);
        Self::from_script_hash(&script.script_hash(), version)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address_string)
    }
}

/// Extract the script hash (payload bytes 1..21) from a default-version address.
///
/// # Returns
/// The script hash in wire order, or an error if the address has the wrong
/// length, version or checksum.
pub fn script_hash_from_address(addr: &str) -> Result<Uint160, ScriptError> {
    Ok(Address::from_string(addr)?.script_hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_ADDRESS: &str = "AK2nJJpJr6o664CWJKi1QRXjqeic2zRp8y";
    const TEST_SCRIPT_HASH: &str = "23ba2703c53263e8d6e522dc32203339dcd8eee9";

    #[test]
    fn test_script_hash_from_address() {
        let hash = script_hash_from_address(TEST_ADDRESS).unwrap();
        assert_eq!(hex::encode(hash.as_bytes()), TEST_SCRIPT_HASH);
    }

    #[test]
    fn test_from_public_key() {
        let key = PublicKey::from_hex(
            "031a6c6fbbdf02ca351745fa86b9ba5a9452d785ac4f7fc2b7548ca2a46c4fcf4a",
        )
        .unwrap();
        let addr = Address::from_public_key(&key, ADDRESS_VERSION);
        assert_eq!(addr.to_string(), TEST_ADDRESS);
        assert_eq!(Address::from_string(TEST_ADDRESS).unwrap(), addr);
    }

    #[test]
    fn test_bad_checksum() {
        assert!(matches!(
            script_hash_from_address("AK2nJJpJr6o664CWJKi1QRXjqeic2zRp8z"),
            Err(ScriptError::EncodingChecksumFailed)
        ));
    }

    #[test]
    fn test_bad_length_and_chars() {
        assert!(matches!(
            script_hash_from_address("AK2nJJpJr6o664"),
            Err(ScriptError::InvalidAddressLength(_))
        ));
        assert!(matches!(
            script_hash_from_address("AK2nJJpJr6o664CWJKi1QRXjqeic2zRp80"),
            Err(ScriptError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_wrong_version() {
        let hash = Uint160::new([0x42; 20]);
        let other = Address::from_script_hash(&hash, 0x35);
        assert!(matches!(
            Address::from_string(&other.address_string),
            Err(ScriptError::UnsupportedAddressVersion { found: 0x35, expected: 0x17 })
        ));
        let parsed = Address::from_string_with_version(&other.address_string, 0x35).unwrap();
        assert_eq!(parsed.script_hash, hash);
    }
}
