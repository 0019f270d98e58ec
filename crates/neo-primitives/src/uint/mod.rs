//! Fixed-width ledger identifiers.
//!
//! `Uint256` identifies transactions and assets, `Uint160` identifies
//! scripts (and therefore addresses). Both are stored in wire order, which
//! is little-endian, and displayed as byte-reversed hex, matching the way
//! the ledger and its tooling print them.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::hash::{hash160, sha256d};
use crate::PrimitivesError;

macro_rules! fixed_uint {
    ($(#[$meta:meta])* $name:ident, $size:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name([u8; $size]);

        impl $name {
            /// Size of the identifier in bytes.
            pub const SIZE: usize = $size;

            /// Create from bytes already in wire (little-endian) order.
            pub const fn new(bytes: [u8; $size]) -> Self {
                $name(bytes)
            }

            /// Create from a wire-order byte slice.
            ///
            /// # Arguments
            /// * `bytes` - A slice that must be exactly `SIZE` bytes long.
            ///
            /// # Returns
            /// The identifier, or an error if the length is wrong.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
                if bytes.len() != $size {
                    return Err(PrimitivesError::InvalidHash(format!(
                        "invalid {} length of {}, want {}",
                        stringify!($name),
                        bytes.len(),
                        $size
                    )));
                }
                let mut arr = [0u8; $size];
                arr.copy_from_slice(bytes);
                Ok($name(arr))
            }

            /// Parse the display form: byte-reversed hex, optionally `0x`-prefixed.
            ///
            /// # Arguments
            /// * `hex_str` - Exactly `2 * SIZE` hex characters after the optional prefix.
            ///
            /// # Returns
            /// The identifier, or an error for bad hex or a bad length.
            pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
                let trimmed = hex_str.strip_prefix("0x").unwrap_or(hex_str);
                if trimmed.len() != $size * 2 {
                    return Err(PrimitivesError::InvalidHash(format!(
                        "{} hex must be {} characters, got {}",
                        stringify!($name),
                        $size * 2,
                        trimmed.len()
                    )));
                }
                let mut bytes = hex::decode(trimmed)?;
                bytes.reverse();
                Self::from_bytes(&bytes)
            }

            /// Return the display form (byte-reversed hex, no prefix).
            pub fn to_hex(&self) -> String {
                let mut reversed = self.0;
                reversed.reverse();
                hex::encode(reversed)
            }

            /// Access the wire-order bytes.
            pub fn as_bytes(&self) -> &[u8; $size] {
                &self.0
            }

            /// Return a copy of the wire-order bytes.
            pub fn to_bytes(&self) -> [u8; $size] {
                self.0
            }

            /// Check whether every byte is zero.
            pub fn is_zero(&self) -> bool {
                self.0.iter().all(|b| *b == 0)
            }
        }

        /// Identifiers compare as little-endian numbers: the most significant
        /// (last) byte decides first.
        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.iter().rev().cmp(other.0.iter().rev())
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_hex())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl FromStr for $name {
            type Err = PrimitivesError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::from_hex(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

fixed_uint!(
    /// A 256-bit identifier: transaction id or asset id.
    Uint256,
    32
);

fixed_uint!(
    /// A 160-bit identifier: the Hash160 of a script.
    Uint160,
    20
);

impl Uint256 {
    /// Double SHA-256 of `data`, as an identifier.
    pub fn hash_of(data: &[u8]) -> Self {
        Uint256(sha256d(data))
    }
}

impl Uint160 {
    /// Hash160 of `script`, i.e. its script hash.
    pub fn hash_of(script: &[u8]) -> Self {
        Uint160(hash160(script))
    }
}
