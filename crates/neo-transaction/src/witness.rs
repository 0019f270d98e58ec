//! Witness: the invocation / verification script pair that authorizes a
//! transaction.
//!
//! The verification script identifies the signer (its hash is the
//! signer's address); the invocation script supplies the arguments, which
//! for a standard account is one signature over the hashable bytes.

use neo_primitives::util::{NeoReader, NeoWriter};
use neo_primitives::Uint160;
use neo_script::Script;

use crate::error::ReadContext;
use crate::DecodeError;

/// A witness attached to a transaction.
///
/// # Wire format
///
/// | Field               | Size                 |
/// |---------------------|----------------------|
/// | invocation_script   | VarInt len + bytes   |
/// | verification_script | VarInt len + bytes   |
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Witness {
    /// Pushes the arguments (signatures) for the verification script.
    pub invocation_script: Script,
    /// The contract being satisfied, e.g. `PUSHBYTES33 <key> CHECKSIG`.
    pub verification_script: Script,
}

impl Witness {
    /// Pair an invocation script with the verification script it satisfies.
    pub fn new(invocation_script: Script, verification_script: Script) -> Self {
        Witness {
            invocation_script,
            verification_script,
        }
    }

    /// Script hash of the verification script, i.e. the account this
    /// witness speaks for.
    pub fn script_hash(&self) -> Uint160 {
        self.verification_script.script_hash()
    }

    /// Check a standard single-signature witness against `message`.
    ///
    /// Returns `false` when either script is not in the standard form, when
    /// the embedded key is invalid, or when the signature does not verify.
    pub fn verify(&self, message: &[u8]) -> bool {
        let key = match self.verification_script.signature_contract_key() {
            Ok(k) => k,
            Err(_) => return false,
        };
        match self.invocation_script.invocation_signature() {
            Some(sig) => key.verify(message, &sig),
            None => false,
        }
    }

    /// Deserialize a witness from a `NeoReader`.
    pub fn read_from(reader: &mut NeoReader) -> Result<Self, DecodeError> {
        let invocation = reader.read_var_bytes().field("witness invocation_script")?;
        let verification = reader.read_var_bytes().field("witness verification_script")?;
        Ok(Witness {
            invocation_script: Script::from_bytes(invocation),
            verification_script: Script::from_bytes(verification),
        })
    }

    /// Serialize this witness into a `NeoWriter`.
    pub fn write_to(&self, writer: &mut NeoWriter) {
        writer.write_var_bytes(self.invocation_script.to_bytes());
        writer.write_var_bytes(self.verification_script.to_bytes());
    }
}
