//! Base58 encoding and decoding with optional checksum support.
//!
//! Base58Check (payload followed by the first four bytes of its SHA-256d)
//! is used for WIF private keys and for addresses.

use crate::hash::sha256d;
use crate::PrimitivesError;

/// Encode a byte slice to a Base58 string (Bitcoin alphabet).
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data).with_alphabet(bs58::Alphabet::BITCOIN).into_string()
}

/// Decode a Base58 string to a byte vector.
///
/// # Returns
/// `Ok(Vec<u8>)` on success, or an error for invalid characters.
pub fn decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    bs58::decode(s)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()
        .map_err(|e| PrimitivesError::InvalidBase58(e.to_string()))
}

/// Encode a byte slice with a 4-byte double-SHA-256 checksum appended.
///
/// # Arguments
/// * `data` - The bytes to encode (typically version byte + payload).
///
/// # Returns
/// A Base58Check-encoded string.
pub fn check_encode(data: &[u8]) -> String {
    let checksum = sha256d(data);
    let mut payload = Vec::with_capacity(data.len() + 4);
    payload.extend_from_slice(data);
    payload.extend_from_slice(&checksum[..4]);
    encode(&payload)
}

/// Decode a Base58Check string, verifying and stripping the checksum.
///
/// # Returns
/// The payload without its checksum, or an error for invalid encoding or
/// checksum mismatch.
pub fn check_decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    let decoded = decode(s)?;
    if decoded.len() < 4 {
        return Err(PrimitivesError::InvalidBase58(
            "data too short for checksum".to_string(),
        ));
    }
    let (payload, checksum) = decoded.split_at(decoded.len() - 4);
    let expected = sha256d(payload);
    if checksum != &expected[..4] {
        return Err(PrimitivesError::ChecksumMismatch);
    }
    Ok(payload.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base58_leading_zeros() {
        let input = hex::decode("000000287FB4CD").unwrap();
        assert_eq!(encode(&input), "111233QC4");
        assert_eq!(decode("111233QC4").unwrap(), input);
    }

    #[test]
    fn test_base58_empty() {
        assert_eq!(encode(&[]), "");
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_base58_invalid_character() {
        assert!(decode("0OIl").is_err());
    }

    #[test]
    fn test_check_decode_address_payload() {
        let payload = check_decode("AK2nJJpJr6o664CWJKi1QRXjqeic2zRp8y").unwrap();
        assert_eq!(
            hex::encode(&payload),
            "1723ba2703c53263e8d6e522dc32203339dcd8eee9"
        );
        assert_eq!(check_encode(&payload), "AK2nJJpJr6o664CWJKi1QRXjqeic2zRp8y");
    }

    #[test]
    fn test_check_decode_bad_checksum() {
        // Last character altered.
        assert_eq!(
            check_decode("AK2nJJpJr6o664CWJKi1QRXjqeic2zRp8z"),
            Err(PrimitivesError::ChecksumMismatch)
        );
        assert!(check_decode("1").is_err());
    }
}
