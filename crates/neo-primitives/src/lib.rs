/// NEO SDK - Cryptographic primitives, identifiers, amounts, and codec utilities.
///
/// This crate provides the foundational building blocks for the NEO SDK:
/// - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160)
/// - `Uint256` / `Uint160` identifiers (transaction ids, asset ids, script hashes)
/// - `Fixed8` fixed-point amounts
/// - Variable-length integer encoding and the `NeoReader` / `NeoWriter` cursors
/// - Base58 / Base58Check encoding
/// - Elliptic curve keys and signatures on NIST P-256 (secp256r1)

pub mod hash;
pub mod uint;
pub mod fixed8;
pub mod util;
pub mod base58;
pub mod ec;

mod error;
pub use error::PrimitivesError;
pub use fixed8::Fixed8;
pub use uint::{Uint160, Uint256};
