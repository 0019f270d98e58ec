/// NEO SDK - VM scripts, contract invocation and address handling.
///
/// Provides the `Script` type, NEO VM opcode definitions, the standard
/// single-signature witness scripts, the contract-call script builder and
/// Base58Check addresses.

pub mod script;
pub mod opcodes;
pub mod contract;
pub mod address;

mod error;
pub use error::ScriptError;
pub use script::Script;
pub use address::{script_hash_from_address, Address, ADDRESS_VERSION};
pub use contract::{contract_call_script, ContractParam};
