//! Contract-call scripts.
//!
//! A call to a deployed contract pushes its parameters in reverse order,
//! packs them into an array, pushes the method name and ends with
//! `APPCALL <script hash>`.

use serde::{Deserialize, Serialize};

use neo_primitives::Uint160;

use crate::opcodes::OP_PACK;
use crate::script::Script;
use crate::ScriptError;

/// A typed argument for a contract method.
///
/// Serializes the way JSON-RPC `invokefunction` expects parameters:
/// `{"type": "String", "value": "lul"}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum ContractParam {
    String(String),
    Integer(i64),
    Boolean(bool),
    ByteArray(#[serde(with = "hex_bytes")] Vec<u8>),
    Hash160(Uint160),
    Array(Vec<ContractParam>),
}

impl ContractParam {
    /// Append the push sequence for this parameter to `script`.
    fn push_onto(&self, script: &mut Script) -> Result<(), ScriptError> {
        match self {
            ContractParam::String(s) => script.append_push_data(s.as_bytes()),
            ContractParam::Integer(n) => script.append_push_int(*n),
            ContractParam::Boolean(b) => {
                script.append_push_bool(*b);
                Ok(())
            }
            ContractParam::ByteArray(bytes) => script.append_push_data(bytes),
            ContractParam::Hash160(hash) => script.append_push_data(hash.as_bytes()),
            ContractParam::Array(items) => push_packed(script, items),
        }
    }
}

impl From<&str> for ContractParam {
    fn from(s: &str) -> Self {
        ContractParam::String(s.to_string())
    }
}

impl From<i64> for ContractParam {
    fn from(n: i64) -> Self {
        ContractParam::Integer(n)
    }
}

impl From<bool> for ContractParam {
    fn from(b: bool) -> Self {
        ContractParam::Boolean(b)
    }
}

/// Push `items` in reverse, then the item count, then PACK.
fn push_packed(script: &mut Script, items: &[ContractParam]) -> Result<(), ScriptError> {
    for item in items.iter().rev() {
        item.push_onto(script)?;
    }
    let count = i64::try_from(items.len())
        .map_err(|_| ScriptError::InvalidScript("too many parameters".to_string()))?;
    script.append_push_int(count)?;
    script.append_opcodes(&[OP_PACK])
}

/// Build the script that calls `method` on `contract` with `params`.
///
/// # Arguments
/// * `contract` - Script hash of the deployed contract.
/// * `method` - Method (operation) name, pushed as UTF-8 bytes.
/// * `params` - Arguments in declaration order.
///
/// # Returns
/// The invocation script, or an error if a push exceeds the size limits.
pub fn contract_call_script(
    contract: &Uint160,
    method: &str,
    params: &[ContractParam],
) -> Result<Script, ScriptError> {
    let mut script = Script::new();
    push_packed(&mut script, params)?;
    script.append_push_data(method.as_bytes())?;
    script.append_app_call(contract);
    Ok(script)
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s).map_err(serde::de::Error::custom)
    }
}
