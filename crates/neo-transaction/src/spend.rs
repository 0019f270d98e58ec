//! End-to-end spend pipeline: select, assemble, sign, submit.
//!
//! `Spender` owns one key and a `SpendConfig`. Each operation asks the
//! balance oracle for the sender's unspent outputs, selects enough of them,
//! returns change to the sender, and signs the result. Nothing is
//! submitted until `submit` is called with the witnessed transaction.

use std::fmt;

use log::debug;
use neo_primitives::ec::{PrivateKey, PublicKey};
use neo_primitives::{Fixed8, Uint160, Uint256};
use neo_script::{Address, Script};
use serde::Deserialize;

use crate::attribute::TransactionAttribute;
use crate::builder::TransactionBuilder;
use crate::collaborator::{BalanceOracle, NetworkSubmitter};
use crate::data::TransactionData;
use crate::output::TransactionOutput;
use crate::state::{SubmittedTransaction, WitnessedTransaction};
use crate::transaction::Transaction;
use crate::utxo::select;
use crate::TransactionError;

/// Governing token asset id (display form `c56f33fc…7c9b`), wire order.
pub const NEO_ASSET_ID: Uint256 = Uint256::new([
    0x9b, 0x7c, 0xff, 0xda, 0xa6, 0x74, 0xbe, 0xae, 0x0f, 0x93, 0x0e, 0xbe, 0x60, 0x85, 0xaf, 0x90,
    0x93, 0xe5, 0xfe, 0x56, 0xb3, 0x4a, 0x5c, 0x22, 0x0c, 0xcd, 0xcf, 0x6e, 0xfc, 0x33, 0x6f, 0xc5,
]);

/// Utility token asset id (display form `602c7971…2de7`), wire order.
pub const GAS_ASSET_ID: Uint256 = Uint256::new([
    0xe7, 0x2d, 0x28, 0x69, 0x79, 0xee, 0x6c, 0xb1, 0xb7, 0xe6, 0x5d, 0xfd, 0xdf, 0xb2, 0xe3, 0x84,
    0x10, 0x0b, 0x8d, 0x14, 0x8e, 0x77, 0x58, 0xde, 0x42, 0xe4, 0x16, 0x8b, 0x71, 0x79, 0x2c, 0x60,
]);

/// Settings for a `Spender`. Every value is explicit; there are no
/// built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpendConfig {
    /// Asset the network fee (and invocation gas) is paid in.
    pub fee_asset_id: Uint256,
    /// Network fee added to every transaction.
    pub network_fee: Fixed8,
    /// Version byte of the addresses in use.
    pub address_version: u8,
}

impl SpendConfig {
    /// Load a config from a JSON document, e.g.
    /// `{"fee_asset_id": "602c…", "network_fee": "0.0001", "address_version": 23}`.
    pub fn from_json(json: &str) -> Result<Self, TransactionError> {
        let config: SpendConfig =
            serde_json::from_str(json).map_err(|e| TransactionError::Config(e.to_string()))?;
        if config.network_fee.units() < 0 {
            return Err(TransactionError::Config(format!(
                "network_fee must not be negative, got {}",
                config.network_fee
            )));
        }
        Ok(config)
    }
}

/// A private key with its public key and address.
#[derive(Clone)]
pub struct KeyPair {
    pub private_key: PrivateKey,
    pub public_key: PublicKey,
    pub address: Address,
}

impl KeyPair {
    /// Derive the key pair from a WIF string.
    ///
    /// # Returns
    /// The key pair, or `SigningError` if the WIF is malformed.
    pub fn from_wif(wif: &str, address_version: u8) -> Result<Self, TransactionError> {
        let private_key = PrivateKey::from_wif(wif)
            .map_err(|e| TransactionError::SigningError(format!("invalid WIF: {}", e)))?;
        Ok(Self::from_private_key(private_key, address_version))
    }

    /// Wrap an existing key, deriving its public key and address.
    pub fn from_private_key(private_key: PrivateKey, address_version: u8) -> Self {
        let public_key = private_key.pub_key();
        let address = Address::from_public_key(&public_key, address_version);
        KeyPair {
            private_key,
            public_key,
            address,
        }
    }

    /// Script hash of the standard verification script for this key.
    pub fn script_hash(&self) -> Uint160 {
        self.address.script_hash
    }

    /// `PUSHBYTES33 <key> CHECKSIG` for this key.
    pub fn verification_script(&self) -> Script {
        Script::signature_contract(&self.public_key)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("address", &self.address.address_string)
            .finish_non_exhaustive()
    }
}

/// Builds and signs transactions spending one key's outputs.
#[derive(Debug, Clone)]
pub struct Spender {
    config: SpendConfig,
    keypair: KeyPair,
}

impl Spender {
    /// Spend from `keypair`'s address under `config`.
    pub fn new(config: SpendConfig, keypair: KeyPair) -> Self {
        Spender { config, keypair }
    }

    pub fn config(&self) -> &SpendConfig {
        &self.config
    }

    pub fn keypair(&self) -> &KeyPair {
        &self.keypair
    }

    /// Build and sign an invocation of `script`.
    ///
    /// # Arguments
    /// * `oracle` - Source of the sender's unspent outputs.
    /// * `script` - The VM script to run.
    /// * `gas` - System fee attached to the invocation.
    ///
    /// # Returns
    /// The witnessed transaction. Fails with `InsufficientFunds` if the
    /// sender cannot cover `gas` plus the network fee in the fee asset, and
    /// with `InvalidTransaction` from the assembler if `gas` is negative.
    pub fn invoke(
        &self,
        oracle: &dyn BalanceOracle,
        script: Script,
        gas: Fixed8,
    ) -> Result<WitnessedTransaction, TransactionError> {
        let fee_asset = self.config.fee_asset_id;
        let required = gas
            .checked_add(self.config.network_fee)
            .ok_or(TransactionError::AmountOverflow)?;

        let builder = TransactionBuilder::new(TransactionData::Invocation { script, gas })
            .attribute(TransactionAttribute::script(&self.keypair.script_hash()));
        let builder = self.fund(builder, oracle, fee_asset, required, required)?;
        self.seal_and_sign(builder.build()?)
    }

    /// Build and sign a transfer of `amount` of `asset_id` to `recipient`.
    ///
    /// The network fee comes out of the same selection when `asset_id` is
    /// the fee asset, otherwise from a separate selection of the fee asset.
    pub fn transfer(
        &self,
        oracle: &dyn BalanceOracle,
        asset_id: &Uint256,
        recipient: &Uint160,
        amount: Fixed8,
    ) -> Result<WitnessedTransaction, TransactionError> {
        if !amount.is_positive() {
            return Err(TransactionError::InvalidTransaction(format!(
                "transfer amount must be positive, got {}",
                amount
            )));
        }
        let fee_asset = self.config.fee_asset_id;
        let fee = self.config.network_fee;

        let builder = TransactionBuilder::new(TransactionData::Contract)
            .attribute(TransactionAttribute::script(&self.keypair.script_hash()))
            .output(TransactionOutput::new(*asset_id, amount, *recipient));

        let builder = if *asset_id == fee_asset {
            let required = amount
                .checked_add(fee)
                .ok_or(TransactionError::AmountOverflow)?;
            self.fund(builder, oracle, fee_asset, required, fee)?
        } else {
            let builder = self.fund(builder, oracle, *asset_id, amount, Fixed8::ZERO)?;
            if fee.is_positive() {
                self.fund(builder, oracle, fee_asset, fee, fee)?
            } else {
                builder
            }
        };
        self.seal_and_sign(builder.build()?)
    }

    /// Submit a witnessed transaction.
    ///
    /// # Returns
    /// The submitted transaction, carrying the tx id and the node's verdict.
    pub fn submit(
        &self,
        submitter: &dyn NetworkSubmitter,
        witnessed: WitnessedTransaction,
    ) -> Result<SubmittedTransaction, TransactionError> {
        witnessed.submit(submitter)
    }

    /// Select `required` of `asset_id`, add the inputs, declare the selected
    /// total as available, reserve `fee`, and return change to the sender.
    fn fund(
        &self,
        builder: TransactionBuilder,
        oracle: &dyn BalanceOracle,
        asset_id: Uint256,
        required: Fixed8,
        fee: Fixed8,
    ) -> Result<TransactionBuilder, TransactionError> {
        let candidates = oracle.unspent_outputs(&self.keypair.address, &asset_id)?;
        let selection = select(&candidates, required)?;
        let change = selection.change(required);

        let mut builder = builder
            .inputs(selection.inputs())
            .available(asset_id, selection.total)
            .fee(asset_id, fee);
        if change.is_positive() {
            builder = builder.output(TransactionOutput::new(
                asset_id,
                change,
                self.keypair.script_hash(),
            ));
        }
        debug!(
            "funded {} of {} from {} input(s), change {}",
            required,
            asset_id,
            selection.selected.len(),
            change
        );
        Ok(builder)
    }

    fn seal_and_sign(&self, tx: Transaction) -> Result<WitnessedTransaction, TransactionError> {
        tx.seal()?.sign(&self.keypair.private_key)
    }
}
