/// NEO VM script type - a sequence of opcodes and data pushes.
///
/// Scripts appear in witnesses (invocation and verification scripts) and
/// in invocation transactions. The Script wraps a `Vec<u8>` and provides
/// construction helpers for the standard single-signature contract,
/// classification and hashing.

use std::fmt;

use neo_primitives::ec::{PublicKey, Signature};
use neo_primitives::Uint160;

use crate::opcodes::*;
use crate::ScriptError;

/// Length of the standard single-signature verification script:
/// PUSHBYTES33 <33-byte key> CHECKSIG.
const SIGNATURE_CONTRACT_LEN: usize = 35;

/// Length of the standard invocation script: PUSHBYTES64 <64-byte signature>.
const SIGNATURE_INVOCATION_LEN: usize = 65;

/// A NEO VM script, represented as a byte vector newtype.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Script(Vec<u8>);

impl Script {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Create a new empty script.
    pub fn new() -> Self {
        Script(Vec::new())
    }

    /// Create a script from a hex-encoded string.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string (e.g. "21031a6c...ac").
    ///
    /// # Returns
    /// A `Script` wrapping the decoded bytes, or an error if the hex is invalid.
    pub fn from_hex(hex_str: &str) -> Result<Self, ScriptError> {
        let bytes = hex::decode(hex_str).map_err(|e| ScriptError::InvalidHex(e.to_string()))?;
        Ok(Script(bytes))
    }

    /// Create a script from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Script(bytes.to_vec())
    }

    /// Build the standard single-signature verification script for `key`.
    ///
    /// Layout: `PUSHBYTES33 <compressed key> CHECKSIG`.
    pub fn signature_contract(key: &PublicKey) -> Self {
        let mut bytes = Vec::with_capacity(SIGNATURE_CONTRACT_LEN);
        bytes.push(OP_PUSHBYTES33);
        bytes.extend_from_slice(&key.to_compressed());
        bytes.push(OP_CHECKSIG);
        Script(bytes)
    }

    /// Build the invocation script that supplies `sig` to a signature contract.
    ///
    /// Layout: `PUSHBYTES64 <r || s>`.
    pub fn signature_invocation(sig: &Signature) -> Self {
        let mut bytes = Vec::with_capacity(SIGNATURE_INVOCATION_LEN);
        bytes.push(OP_PUSHBYTES64);
        bytes.extend_from_slice(&sig.to_bytes());
        Script(bytes)
    }

    // -----------------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------------

    /// Encode the script as a hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Return a reference to the underlying bytes.
    pub fn to_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the script and return its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Return the length of the script in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the script is empty (zero bytes).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hash160 of the script bytes: the script hash that identifies the
    /// contract (and, for a verification script, its address).
    pub fn script_hash(&self) -> Uint160 {
        Uint160::hash_of(&self.0)
    }

    // -----------------------------------------------------------------------
    // Script classification
    // -----------------------------------------------------------------------

    /// Check if this is a standard single-signature verification script.
    ///
    /// Pattern: PUSHBYTES33 <33 bytes> CHECKSIG
    pub fn is_signature_contract(&self) -> bool {
        let b = &self.0;
        b.len() == SIGNATURE_CONTRACT_LEN && b[0] == OP_PUSHBYTES33 && b[34] == OP_CHECKSIG
    }

    /// Extract the public key from a single-signature verification script.
    ///
    /// # Returns
    /// The embedded key, or `NotSignatureContract` / a key error.
    pub fn signature_contract_key(&self) -> Result<PublicKey, ScriptError> {
        if !self.is_signature_contract() {
            return Err(ScriptError::NotSignatureContract);
        }
        Ok(PublicKey::from_bytes(&self.0[1..34])?)
    }

    /// Extract the signature from a standard invocation script.
    ///
    /// Returns `None` unless the script is exactly `PUSHBYTES64 <64 bytes>`.
    pub fn invocation_signature(&self) -> Option<Signature> {
        let b = &self.0;
        if b.len() != SIGNATURE_INVOCATION_LEN || b[0] != OP_PUSHBYTES64 {
            return None;
        }
        Signature::from_bytes(&b[1..]).ok()
    }

    // -----------------------------------------------------------------------
    // Mutation / building
    // -----------------------------------------------------------------------

    /// Append data bytes to the script with the proper PUSHDATA prefix.
    ///
    /// Chooses the minimal encoding: direct push for 0-75 bytes,
    /// PUSHDATA1 for 76-255, PUSHDATA2 for 256-65535, PUSHDATA4 above.
    pub fn append_push_data(&mut self, data: &[u8]) -> Result<(), ScriptError> {
        let prefix = push_data_prefix(data.len())?;
        self.0.extend_from_slice(&prefix);
        self.0.extend_from_slice(data);
        Ok(())
    }

    /// Append an integer push.
    ///
    /// Values in `-1..=16` use the single-byte constants; everything else is
    /// pushed as its minimal little-endian two's complement encoding.
    pub fn append_push_int(&mut self, n: i64) -> Result<(), ScriptError> {
        if let Some(op) = small_int_op(n) {
            self.0.push(op);
            return Ok(());
        }
        self.append_push_data(&int_to_bytes(n))
    }

    /// Append a boolean push (PUSHT / PUSHF).
    pub fn append_push_bool(&mut self, value: bool) {
        self.0.push(if value { OP_PUSHT } else { OP_PUSHF });
    }

    /// Append raw opcodes to the script.
    ///
    /// Rejects push data opcodes (PUSHBYTES1..PUSHDATA4).
    /// Use `append_push_data` for those.
    pub fn append_opcodes(&mut self, opcodes: &[u8]) -> Result<(), ScriptError> {
        for &op in opcodes {
            if (OP_PUSHBYTES1..=OP_PUSHDATA4).contains(&op) {
                return Err(ScriptError::InvalidOpcodeType(opcode_to_string(op)));
            }
        }
        self.0.extend_from_slice(opcodes);
        Ok(())
    }

    /// Append `APPCALL <contract>` with the 20-byte hash in wire order.
    pub fn append_app_call(&mut self, contract: &Uint160) {
        self.0.push(OP_APPCALL);
        self.0.extend_from_slice(contract.as_bytes());
    }
}

/// PUSHDATA prefix for a push of `len` bytes, in its minimal form.
///
/// - 0..=75: single byte (PUSHBYTESn, or PUSH0 for empty data)
/// - 76..=255: PUSHDATA1 + 1-byte length
/// - 256..=65535: PUSHDATA2 + 2-byte LE length
/// - larger: PUSHDATA4 + 4-byte LE length
fn push_data_prefix(len: usize) -> Result<Vec<u8>, ScriptError> {
    if len <= OP_PUSHBYTES75 as usize {
        Ok(vec![len as u8])
    } else if len <= 0xff {
        Ok(vec![OP_PUSHDATA1, len as u8])
    } else if len <= 0xffff {
        let mut v = vec![OP_PUSHDATA2];
        v.extend_from_slice(&(len as u16).to_le_bytes());
        Ok(v)
    } else if len <= u32::MAX as usize {
        let mut v = vec![OP_PUSHDATA4];
        v.extend_from_slice(&(len as u32).to_le_bytes());
        Ok(v)
    } else {
        Err(ScriptError::DataTooBig)
    }
}

/// Minimal little-endian two's complement encoding of `n`.
///
/// 20 encodes as `[0x14]`, 128 as `[0x80, 0x00]`, -129 as `[0x7f, 0xff]`.
pub fn int_to_bytes(n: i64) -> Vec<u8> {
    let mut bytes = n.to_le_bytes().to_vec();
    while bytes.len() > 1 {
        let last = bytes[bytes.len() - 1];
        let sign_bit = bytes[bytes.len() - 2] & 0x80;
        if (last == 0x00 && sign_bit == 0) || (last == 0xff && sign_bit != 0) {
            bytes.pop();
        } else {
            break;
        }
    }
    bytes
}

impl Default for Script {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<u8>> for Script {
    fn from(bytes: Vec<u8>) -> Self {
        Script(bytes)
    }
}

impl fmt::Display for Script {
    /// Display the script as a lowercase hex string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", self.to_hex())
    }
}

impl serde::Serialize for Script {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Script {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Script::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo_primitives::ec::PrivateKey;

    const TEST_PUBKEY: &str = "031a6c6fbbdf02ca351745fa86b9ba5a9452d785ac4f7fc2b7548ca2a46c4fcf4a";

    #[test]
    fn test_from_hex_roundtrip() {
        let hex_str = "21031a6c6fbbdf02ca351745fa86b9ba5a9452d785ac4f7fc2b7548ca2a46c4fcf4aac";
        let script = Script::from_hex(hex_str).expect("valid hex should parse");
        assert_eq!(script.to_hex(), hex_str);
        assert!(Script::from_hex("ZZZZ").is_err());
    }

    #[test]
    fn test_signature_contract() {
        let key = PublicKey::from_hex(TEST_PUBKEY).unwrap();
        let script = Script::signature_contract(&key);
        assert_eq!(script.to_hex(), format!("21{}ac", TEST_PUBKEY));
        assert!(script.is_signature_contract());
        assert_eq!(script.signature_contract_key().unwrap(), key);
        assert_eq!(
            hex::encode(script.script_hash().as_bytes()),
            "23ba2703c53263e8d6e522dc32203339dcd8eee9"
        );
    }

    #[test]
    fn test_not_signature_contract() {
        let script = Script::from_hex("51").unwrap();
        assert!(!script.is_signature_contract());
        assert!(matches!(
            script.signature_contract_key(),
            Err(ScriptError::NotSignatureContract)
        ));
    }

    #[test]
    fn test_signature_invocation() {
        let key = PrivateKey::new();
        let sig = key.sign(b"msg").unwrap();
        let script = Script::signature_invocation(&sig);
        assert_eq!(script.len(), 65);
        assert_eq!(script.to_bytes()[0], 0x40);
        assert_eq!(script.invocation_signature(), Some(sig));
        assert_eq!(Script::from_hex("4001").unwrap().invocation_signature(), None);
    }

    #[test]
    fn test_append_push_int() {
        let cases: &[(i64, &str)] = &[
            (-1, "4f"),
            (0, "00"),
            (1, "51"),
            (16, "60"),
            (17, "0111"),
            (20, "0114"),
            (127, "017f"),
            (128, "028000"),
            (255, "02ff00"),
            (256, "020001"),
            (-2, "01fe"),
            (-128, "0180"),
            (-129, "027fff"),
        ];
        for (n, expected) in cases {
            let mut script = Script::new();
            script.append_push_int(*n).unwrap();
            assert_eq!(script.to_hex(), *expected, "push of {}", n);
        }
    }

    #[test]
    fn test_append_opcodes_rejects_pushes() {
        let mut script = Script::new();
        assert!(script.append_opcodes(&[OP_PACK, OP_RET]).is_ok());
        assert!(matches!(
            script.append_opcodes(&[OP_PUSHBYTES20]),
            Err(ScriptError::InvalidOpcodeType(_))
        ));
        assert_eq!(script.to_hex(), "c166");
    }

    #[test]
    fn test_append_push_data_sizes() {
        let mut script = Script::new();
        script.append_push_data(&[0xab; 80]).unwrap();
        assert_eq!(&script.to_bytes()[..2], &[0x4c, 80]);
        assert_eq!(script.len(), 82);
    }

    #[test]
    fn test_serde_as_hex() {
        let script = Script::from_hex("c166").unwrap();
        let json = serde_json::to_string(&script).unwrap();
        assert_eq!(json, r#""c166""#);
        let back: Script = serde_json::from_str(&json).unwrap();
        assert_eq!(back, script);
    }

    #[test]
    fn test_push_data_prefix() {
        assert_eq!(push_data_prefix(0).unwrap(), vec![0x00]);
        assert_eq!(push_data_prefix(33).unwrap(), vec![0x21]);
        assert_eq!(push_data_prefix(75).unwrap(), vec![0x4b]);
        assert_eq!(push_data_prefix(76).unwrap(), vec![0x4c, 76]);
        assert_eq!(push_data_prefix(256).unwrap(), vec![0x4d, 0x00, 0x01]);
        assert_eq!(push_data_prefix(65536).unwrap(), vec![0x4e, 0x00, 0x00, 0x01, 0x00]);
    }
}
