//! Tests for the neo-transaction crate.
//!
//! Covers decoding and re-encoding a transaction captured from the ledger,
//! coin selection examples, assembly checks, the signing lifecycle and the
//! spend pipeline against in-memory collaborators.

use std::cell::RefCell;

use neo_primitives::ec::PrivateKey;
use neo_primitives::{Fixed8, Uint160, Uint256};
use neo_script::{contract_call_script, Address, ContractParam, Script, ADDRESS_VERSION};

use crate::attribute::{AttributeUsage, TransactionAttribute};
use crate::builder::{build, TransactionBuilder};
use crate::collaborator::{BalanceOracle, NetworkSubmitter, SubmitResult};
use crate::data::{TransactionData, TransactionType};
use crate::input::TransactionInput;
use crate::output::TransactionOutput;
use crate::signer::sign;
use crate::spend::{KeyPair, SpendConfig, Spender, GAS_ASSET_ID, NEO_ASSET_ID};
use crate::state::{TxState, WitnessedTransaction};
use crate::transaction::Transaction;
use crate::utxo::{select, UnspentOutput};
use crate::{DecodeError, TransactionError};

// -----------------------------------------------------------------------
// Captured ledger vectors
// -----------------------------------------------------------------------

/// An invocation of `confirmupload("lul", "file1", 20)` signed by `WIF`.
const SAMPLE_TX: &str = "d1013101140566696c6531036c756c53c10d636f6e6669726d75706c6f616467cd3558286ec7b188303b7f6ff6869a770e6a7edc0000000000000000012023ba2703c53263e8d6e522dc32203339dcd8eee901e58b25af169798844e8ea148960994d9a1c71a7b8f27ae24638eb254707f11a5000001e72d286979ee6cb1b7e65dfddfb2e384100b8d148e7758de42e4168b71792c60c081f319a600000023ba2703c53263e8d6e522dc32203339dcd8eee9014140c6de83f81e815fa492fa8359d6be9c56829af9b2536149493d202c46684bf40f2a820c53e651723d7493451d8021de61a199ebf2b00c193a62dba5800a19adb12321031a6c6fbbdf02ca351745fa86b9ba5a9452d785ac4f7fc2b7548ca2a46c4fcf4aac";

/// Length in bytes of the hashable section of `SAMPLE_TX`.
const SAMPLE_HASHABLE_LEN: usize = 178;

const SAMPLE_TX_ID: &str = "faacb7b753dfdd15b1fb2b7ea2022ab7e174195dc80fd32039507e3d516c7bcb";

/// Display form of the output spent by `SAMPLE_TX`.
const SAMPLE_PREV_HASH: &str = "a5117f7054b28e6324ae278f7b1ac7a1d994099648a18e4e84989716af258be5";

/// Change returned to the sender in `SAMPLE_TX`, in units.
const SAMPLE_CHANGE_UNITS: i64 = 713_399_960_000;

const WIF: &str = "KxDgvEKzgSBPPfuVfw67oPQBSjidEiqTHURKSDL1R7yGaGYAeYnr";
const SENDER_ADDRESS: &str = "AK2nJJpJr6o664CWJKi1QRXjqeic2zRp8y";
const SENDER_HASH: &str = "23ba2703c53263e8d6e522dc32203339dcd8eee9";
const CONTRACT_HASH: &str = "cd3558286ec7b188303b7f6ff6869a770e6a7edc";

fn sample_bytes() -> Vec<u8> {
    hex::decode(SAMPLE_TX).unwrap()
}

fn sender_hash() -> Uint160 {
    Uint160::from_bytes(&hex::decode(SENDER_HASH).unwrap()).unwrap()
}

fn network_fee() -> Fixed8 {
    "0.0001".parse().unwrap()
}

fn gas_config() -> SpendConfig {
    SpendConfig {
        fee_asset_id: GAS_ASSET_ID,
        network_fee: network_fee(),
        address_version: ADDRESS_VERSION,
    }
}

fn utxo(n: u8, units: i64) -> UnspentOutput {
    UnspentOutput::new(Uint256::new([n; 32]), n as u16, Fixed8::from_units(units))
}

// -----------------------------------------------------------------------
// In-memory collaborators
// -----------------------------------------------------------------------

/// Serves fixed GAS and NEO outputs for one address.
struct MockOracle {
    address: String,
    gas: Vec<UnspentOutput>,
    neo: Vec<UnspentOutput>,
    calls: RefCell<Vec<Uint256>>,
}

impl MockOracle {
    fn new(gas: Vec<UnspentOutput>, neo: Vec<UnspentOutput>) -> Self {
        MockOracle {
            address: SENDER_ADDRESS.to_string(),
            gas,
            neo,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl BalanceOracle for MockOracle {
    fn unspent_outputs(
        &self,
        address: &Address,
        asset_id: &Uint256,
    ) -> Result<Vec<UnspentOutput>, TransactionError> {
        self.calls.borrow_mut().push(*asset_id);
        if address.address_string != self.address {
            return Err(TransactionError::Network(format!(
                "unknown address {}",
                address
            )));
        }
        if *asset_id == GAS_ASSET_ID {
            Ok(self.gas.clone())
        } else if *asset_id == NEO_ASSET_ID {
            Ok(self.neo.clone())
        } else {
            Ok(Vec::new())
        }
    }
}

/// Records every submission and answers with a fixed verdict.
struct MockSubmitter {
    verdict: SubmitResult,
    submitted: RefCell<Vec<Vec<u8>>>,
}

impl MockSubmitter {
    fn new(verdict: SubmitResult) -> Self {
        MockSubmitter {
            verdict,
            submitted: RefCell::new(Vec::new()),
        }
    }
}

impl NetworkSubmitter for MockSubmitter {
    fn submit(&self, raw_tx: &[u8]) -> Result<SubmitResult, TransactionError> {
        self.submitted.borrow_mut().push(raw_tx.to_vec());
        Ok(self.verdict.clone())
    }
}

// -----------------------------------------------------------------------
// Codec
// -----------------------------------------------------------------------

#[test]
fn test_sample_decodes() {
    let tx = Transaction::from_hex(SAMPLE_TX).unwrap();

    assert_eq!(tx.tx_type(), TransactionType::Invocation);
    assert_eq!(tx.version, 1);
    match &tx.data {
        TransactionData::Invocation { script, gas } => {
            assert_eq!(script.len(), 49);
            assert_eq!(*gas, Fixed8::ZERO);
        }
        other => panic!("expected invocation payload, got {:?}", other),
    }

    assert_eq!(tx.attributes.len(), 1);
    assert_eq!(tx.attributes[0].usage(), AttributeUsage::Script);
    assert_eq!(tx.attributes[0].script_hash(), Some(sender_hash()));

    assert_eq!(tx.inputs.len(), 1);
    assert_eq!(tx.inputs[0].prev_hash.to_hex(), SAMPLE_PREV_HASH);
    assert_eq!(tx.inputs[0].prev_index, 0);

    assert_eq!(tx.outputs.len(), 1);
    assert_eq!(tx.outputs[0].asset_id, GAS_ASSET_ID);
    assert_eq!(tx.outputs[0].value.units(), SAMPLE_CHANGE_UNITS);
    assert_eq!(tx.outputs[0].script_hash, sender_hash());

    assert_eq!(tx.witnesses.len(), 1);
    assert_eq!(tx.witnesses[0].script_hash(), sender_hash());
}

#[test]
fn test_sample_reencodes_byte_identically() {
    let tx = Transaction::from_hex(SAMPLE_TX).unwrap();
    assert_eq!(tx.to_hex(), SAMPLE_TX);
    assert_eq!(tx.hashable_bytes(), &sample_bytes()[..SAMPLE_HASHABLE_LEN]);
}

#[test]
fn test_sample_id_and_witness() {
    let tx = Transaction::from_hex(SAMPLE_TX).unwrap();
    assert_eq!(tx.tx_id_hex(), SAMPLE_TX_ID);
    assert_eq!(tx.state(), TxState::Witnessed);
    tx.verify_witnesses().unwrap();

    let witnessed = WitnessedTransaction::try_from(tx).unwrap();
    assert_eq!(witnessed.tx_id_hex(), SAMPLE_TX_ID);
    assert_eq!(witnessed.to_hex(), SAMPLE_TX);
}

#[test]
fn test_sample_script_matches_contract_call() {
    let contract = Uint160::from_bytes(&hex::decode(CONTRACT_HASH).unwrap()).unwrap();
    let script = contract_call_script(
        &contract,
        "confirmupload",
        &[
            ContractParam::from("lul"),
            ContractParam::from("file1"),
            ContractParam::from(20i64),
        ],
    )
    .unwrap();

    let tx = Transaction::from_hex(SAMPLE_TX).unwrap();
    match tx.data {
        TransactionData::Invocation { script: decoded, .. } => assert_eq!(decoded, script),
        other => panic!("expected invocation payload, got {:?}", other),
    }
}

#[test]
fn test_tampered_sample_fails_verification() {
    let mut tx = Transaction::from_hex(SAMPLE_TX).unwrap();
    tx.outputs[0].value = Fixed8::from_units(SAMPLE_CHANGE_UNITS + 1);
    assert!(matches!(
        tx.verify_witnesses(),
        Err(TransactionError::InvalidWitness(_))
    ));
}

#[test]
fn test_unwitnessed_script_attribute_fails_verification() {
    let mut tx = Transaction::from_hex(SAMPLE_TX).unwrap();
    tx.attributes.push(TransactionAttribute::script(&Uint160::new([1; 20])));
    // re-sign so the only problem left is the missing witness
    tx.witnesses.clear();
    let key = PrivateKey::from_wif(WIF).unwrap();
    let witness = sign(&tx, &key).unwrap();
    tx.witnesses.push(witness);
    assert!(matches!(
        tx.verify_witnesses(),
        Err(TransactionError::InvalidWitness(msg)) if msg.contains("no witness")
    ));
}

#[test]
fn test_minimal_roundtrip() {
    let tx = build(
        vec![TransactionInput::new(Uint256::new([9; 32]), 3)],
        vec![TransactionOutput::new(
            GAS_ASSET_ID,
            Fixed8::from_units(42),
            Uint160::new([4; 20]),
        )],
        vec![TransactionAttribute::remark(b"hello")],
        TransactionData::Contract,
        &[(GAS_ASSET_ID, Fixed8::from_units(42))],
    )
    .unwrap();

    let bytes = tx.to_bytes();
    let decoded = Transaction::from_bytes(&bytes).unwrap();
    assert_eq!(decoded, tx);
    assert_eq!(decoded.hashable_bytes(), tx.hashable_bytes());
    assert_eq!(decoded.state(), TxState::Draft);
}

#[test]
fn test_decode_errors() {
    let bytes = sample_bytes();

    assert!(matches!(
        Transaction::from_bytes(&[]),
        Err(DecodeError::Truncated { field: "type", .. })
    ));
    assert!(matches!(
        Transaction::from_bytes(&bytes[..1]),
        Err(DecodeError::Truncated { field: "version", .. })
    ));

    let mut unknown = bytes.clone();
    unknown[0] = 0x42;
    assert_eq!(
        Transaction::from_bytes(&unknown),
        Err(DecodeError::UnknownType(0x42))
    );

    let mut trailing = bytes.clone();
    trailing.push(0x00);
    assert_eq!(
        Transaction::from_bytes(&trailing),
        Err(DecodeError::TrailingBytes(1))
    );

    // Cut inside the invocation script: its length prefix promises more.
    assert!(matches!(
        Transaction::from_bytes(&bytes[..20]),
        Err(DecodeError::LengthExceedsBuffer { field: "invocation script", .. })
    ));

    // Cut inside the only output.
    assert!(matches!(
        Transaction::from_bytes(&bytes[..SAMPLE_HASHABLE_LEN - 10]),
        Err(DecodeError::LengthExceedsBuffer { field: "output count", .. })
    ));

    assert!(matches!(
        Transaction::from_hex("zz"),
        Err(DecodeError::InvalidHex(_))
    ));
}

#[test]
fn test_unknown_attribute_usage() {
    // Contract transaction with one attribute of usage 0x05.
    let bytes = hex::decode("80000105000000").unwrap();
    assert_eq!(
        Transaction::from_bytes(&bytes),
        Err(DecodeError::UnknownAttributeUsage(0x05))
    );
}

// -----------------------------------------------------------------------
// Selection and assembly
// -----------------------------------------------------------------------

#[test]
fn test_selection_examples() {
    let candidates = [utxo(1, 5), utxo(2, 3), utxo(3, 2), utxo(4, 1)];
    let selection = select(&candidates, Fixed8::from_units(6)).unwrap();
    let values: Vec<i64> = selection.selected.iter().map(|u| u.value.units()).collect();
    assert_eq!(values, vec![5, 3]);
    assert_eq!(selection.total.units(), 8);

    match select(&[utxo(1, 1), utxo(2, 1)], Fixed8::from_units(5)) {
        Err(TransactionError::InsufficientFunds { shortfall, .. }) => {
            assert_eq!(shortfall.units(), 3)
        }
        other => panic!("expected InsufficientFunds, got {:?}", other),
    }
}

#[test]
fn test_overspend_names_asset() {
    let result = TransactionBuilder::new(TransactionData::Contract)
        .output(TransactionOutput::new(
            NEO_ASSET_ID,
            Fixed8::from_units(3),
            Uint160::new([1; 20]),
        ))
        .available(NEO_ASSET_ID, Fixed8::from_units(2))
        .build();
    match result {
        Err(TransactionError::Overspend {
            asset_id,
            required,
            available,
        }) => {
            assert_eq!(asset_id, NEO_ASSET_ID);
            assert_eq!(required.units(), 3);
            assert_eq!(available.units(), 2);
        }
        other => panic!("expected Overspend, got {:?}", other),
    }
}

// -----------------------------------------------------------------------
// Signing lifecycle
// -----------------------------------------------------------------------

#[test]
fn test_lifecycle() {
    let key = PrivateKey::new();
    let sender = Script::signature_contract(&key.pub_key()).script_hash();
    let draft = TransactionBuilder::new(TransactionData::Contract)
        .attribute(TransactionAttribute::script(&sender))
        .build()
        .unwrap();
    assert_eq!(draft.state(), TxState::Draft);

    let sealed = draft.clone().seal().unwrap();
    assert_eq!(sealed.state(), TxState::Sealed);
    assert_eq!(sealed.hashable_bytes(), &draft.hashable_bytes()[..]);
    assert_eq!(sealed.hash(), draft.hash());

    let witnessed = sealed.sign(&key).unwrap();
    assert_eq!(witnessed.state(), TxState::Witnessed);
    assert_eq!(witnessed.hash(), draft.hash());
    witnessed.tx().verify_witnesses().unwrap();

    let back = witnessed.into_draft();
    assert_eq!(back, draft);
}

#[test]
fn test_signing_witnessed_transaction_fails() {
    let tx = Transaction::from_hex(SAMPLE_TX).unwrap();
    let key = PrivateKey::from_wif(WIF).unwrap();
    assert!(matches!(
        sign(&tx, &key),
        Err(TransactionError::SigningError(_))
    ));
    assert!(matches!(
        tx.seal(),
        Err(TransactionError::SigningError(_))
    ));
}

#[test]
fn test_resigning_sample_verifies() {
    let mut tx = Transaction::from_hex(SAMPLE_TX).unwrap();
    let captured = tx.witnesses.remove(0);
    let key = PrivateKey::from_wif(WIF).unwrap();

    let witnessed = tx.seal().unwrap().sign(&key).unwrap();
    let witness = &witnessed.tx().witnesses[0];
    assert_eq!(witness.verification_script, captured.verification_script);
    assert!(witness.verify(&sample_bytes()[..SAMPLE_HASHABLE_LEN]));
    assert_eq!(witnessed.tx_id_hex(), SAMPLE_TX_ID);
}

#[test]
fn test_multiple_signers_sorted() {
    let keys: Vec<PrivateKey> = (0..3).map(|_| PrivateKey::new()).collect();
    let signers: Vec<crate::SingleSig> = keys.iter().cloned().map(crate::SingleSig::new).collect();
    let refs: Vec<&dyn crate::WitnessTemplate> =
        signers.iter().map(|s| s as &dyn crate::WitnessTemplate).collect();

    let mut builder = TransactionBuilder::new(TransactionData::Contract);
    for key in &keys {
        let hash = Script::signature_contract(&key.pub_key()).script_hash();
        builder = builder.attribute(TransactionAttribute::script(&hash));
    }
    let witnessed = builder.build().unwrap().seal().unwrap().sign_with(&refs).unwrap();
    witnessed.tx().verify_witnesses().unwrap();

    let duplicate = Transaction::new(TransactionData::Contract)
        .seal()
        .unwrap()
        .sign_with(&[refs[0], refs[0]]);
    assert!(matches!(duplicate, Err(TransactionError::SigningError(_))));

    let none = Transaction::new(TransactionData::Contract)
        .seal()
        .unwrap()
        .sign_with(&[]);
    assert!(matches!(none, Err(TransactionError::SigningError(_))));
}

// -----------------------------------------------------------------------
// Spend pipeline
// -----------------------------------------------------------------------

#[test]
fn test_keypair_from_wif() {
    let keypair = KeyPair::from_wif(WIF, ADDRESS_VERSION).unwrap();
    assert_eq!(keypair.address.address_string, SENDER_ADDRESS);
    assert_eq!(keypair.script_hash(), sender_hash());
    assert_eq!(
        keypair.verification_script().to_hex(),
        "21031a6c6fbbdf02ca351745fa86b9ba5a9452d785ac4f7fc2b7548ca2a46c4fcf4aac"
    );
    assert!(!format!("{:?}", keypair).contains("private_key"));

    assert!(matches!(
        KeyPair::from_wif("not-a-wif", ADDRESS_VERSION),
        Err(TransactionError::SigningError(_))
    ));
}

#[test]
fn test_spend_config_from_json() {
    let config = SpendConfig::from_json(
        r#"{
            "fee_asset_id": "602c79718b16e442de58778e148d0b1084e3b2dffd5de6b7b16cee7969282de7",
            "network_fee": "0.0001",
            "address_version": 23
        }"#,
    )
    .unwrap();
    assert_eq!(config, gas_config());

    assert!(matches!(
        SpendConfig::from_json(r#"{"network_fee": "0.0001"}"#),
        Err(TransactionError::Config(_))
    ));
    assert!(matches!(
        SpendConfig::from_json(
            r#"{"fee_asset_id": "602c79718b16e442de58778e148d0b1084e3b2dffd5de6b7b16cee7969282de7",
                "network_fee": "-1", "address_version": 23}"#
        ),
        Err(TransactionError::Config(_))
    ));
}

#[test]
fn test_invoke_reproduces_sample() {
    let _ = env_logger::builder().is_test(true).try_init();

    let sample = Transaction::from_hex(SAMPLE_TX).unwrap();
    let script = match &sample.data {
        TransactionData::Invocation { script, .. } => script.clone(),
        other => panic!("expected invocation payload, got {:?}", other),
    };
    let oracle = MockOracle::new(
        vec![UnspentOutput::new(
            Uint256::from_hex(SAMPLE_PREV_HASH).unwrap(),
            0,
            Fixed8::from_units(SAMPLE_CHANGE_UNITS + network_fee().units()),
        )],
        Vec::new(),
    );
    let spender = Spender::new(gas_config(), KeyPair::from_wif(WIF, ADDRESS_VERSION).unwrap());

    let witnessed = spender.invoke(&oracle, script, Fixed8::ZERO).unwrap();
    assert_eq!(
        witnessed.tx().hashable_bytes(),
        &sample_bytes()[..SAMPLE_HASHABLE_LEN]
    );
    assert_eq!(witnessed.tx_id_hex(), SAMPLE_TX_ID);
    witnessed.tx().verify_witnesses().unwrap();
    assert_eq!(*oracle.calls.borrow(), vec![GAS_ASSET_ID]);

    let submitter = MockSubmitter::new(SubmitResult::accepted());
    let submitted = spender.submit(&submitter, witnessed).unwrap();
    assert!(submitted.accepted());
    assert_eq!(submitted.state(), TxState::Submitted);
    assert_eq!(submitted.tx_id_hex(), SAMPLE_TX_ID);
    let raw = submitter.submitted.borrow();
    assert_eq!(raw.len(), 1);
    assert_eq!(&raw[0][..SAMPLE_HASHABLE_LEN], &sample_bytes()[..SAMPLE_HASHABLE_LEN]);
}

#[test]
fn test_invoke_insufficient_funds() {
    let oracle = MockOracle::new(vec![utxo(1, 4_000), utxo(2, 5_000)], Vec::new());
    let spender = Spender::new(gas_config(), KeyPair::from_wif(WIF, ADDRESS_VERSION).unwrap());
    match spender.invoke(&oracle, Script::from_hex("66").unwrap(), Fixed8::ZERO) {
        Err(TransactionError::InsufficientFunds {
            required,
            available,
            shortfall,
        }) => {
            assert_eq!(required.units(), 10_000);
            assert_eq!(available.units(), 9_000);
            assert_eq!(shortfall.units(), 1_000);
        }
        other => panic!("expected InsufficientFunds, got {:?}", other),
    }
}

#[test]
fn test_invoke_with_gas_and_exact_funds_has_no_change() {
    let oracle = MockOracle::new(vec![utxo(1, 60_000), utxo(2, 50_000)], Vec::new());
    let spender = Spender::new(gas_config(), KeyPair::from_wif(WIF, ADDRESS_VERSION).unwrap());
    let witnessed = spender
        .invoke(&oracle, Script::from_hex("66").unwrap(), Fixed8::from_units(100_000))
        .unwrap();
    let tx = witnessed.tx();
    assert_eq!(tx.inputs.len(), 2);
    assert!(tx.outputs.is_empty());
    assert!(matches!(
        tx.data,
        TransactionData::Invocation { gas, .. } if gas.units() == 100_000
    ));
}

#[test]
fn test_transfer_fee_asset() {
    let oracle = MockOracle::new(vec![utxo(1, 30_000), utxo(2, 100_000)], Vec::new());
    let spender = Spender::new(gas_config(), KeyPair::from_wif(WIF, ADDRESS_VERSION).unwrap());
    let recipient = Uint160::new([0xaa; 20]);

    let witnessed = spender
        .transfer(&oracle, &GAS_ASSET_ID, &recipient, Fixed8::from_units(50_000))
        .unwrap();
    let tx = witnessed.tx();
    assert_eq!(tx.tx_type(), TransactionType::Contract);
    assert_eq!(tx.inputs.len(), 1);
    assert_eq!(tx.inputs[0].prev_index, 2);
    assert_eq!(tx.outputs.len(), 2);
    assert_eq!(tx.outputs[0].script_hash, recipient);
    assert_eq!(tx.outputs[0].value.units(), 50_000);
    assert_eq!(tx.outputs[1].script_hash, sender_hash());
    assert_eq!(tx.outputs[1].value.units(), 40_000);
    assert_eq!(*oracle.calls.borrow(), vec![GAS_ASSET_ID]);
    tx.verify_witnesses().unwrap();
}

#[test]
fn test_transfer_other_asset_pays_fee_separately() {
    let oracle = MockOracle::new(vec![utxo(1, 25_000)], vec![utxo(7, 500_000_000)]);
    let spender = Spender::new(gas_config(), KeyPair::from_wif(WIF, ADDRESS_VERSION).unwrap());
    let recipient = Uint160::new([0xbb; 20]);

    let witnessed = spender
        .transfer(&oracle, &NEO_ASSET_ID, &recipient, Fixed8::from_units(200_000_000))
        .unwrap();
    let tx = witnessed.tx();
    assert_eq!(*oracle.calls.borrow(), vec![NEO_ASSET_ID, GAS_ASSET_ID]);
    assert_eq!(tx.inputs.len(), 2);

    let totals = tx.output_totals().unwrap();
    assert_eq!(totals[&NEO_ASSET_ID].units(), 500_000_000);
    assert_eq!(totals[&GAS_ASSET_ID].units(), 15_000);
    tx.verify_witnesses().unwrap();
}

#[test]
fn test_transfer_rejects_non_positive_amount() {
    let oracle = MockOracle::new(Vec::new(), Vec::new());
    let spender = Spender::new(gas_config(), KeyPair::from_wif(WIF, ADDRESS_VERSION).unwrap());
    assert!(matches!(
        spender.transfer(&oracle, &GAS_ASSET_ID, &Uint160::new([1; 20]), Fixed8::ZERO),
        Err(TransactionError::InvalidTransaction(_))
    ));
    assert!(oracle.calls.borrow().is_empty());
}

#[test]
fn test_negative_output_does_not_decode() {
    let mut bytes = sample_bytes();
    let at = SAMPLE_TX.find("c081f319a6000000").unwrap() / 2;
    bytes[at..at + 8].copy_from_slice(&(-SAMPLE_CHANGE_UNITS).to_le_bytes());
    assert!(matches!(
        Transaction::from_bytes(&bytes),
        Err(DecodeError::Malformed { field: "output value", .. })
    ));
}

#[test]
fn test_invoke_rejects_negative_gas() {
    let oracle = MockOracle::new(vec![utxo(1, 1_000_000)], Vec::new());
    let spender = Spender::new(gas_config(), KeyPair::from_wif(WIF, ADDRESS_VERSION).unwrap());
    assert!(matches!(
        spender.invoke(&oracle, Script::from_hex("66").unwrap(), Fixed8::from_units(-5)),
        Err(TransactionError::InvalidTransaction(msg)) if msg.contains("negative")
    ));
}

#[test]
fn test_rejected_submission_is_not_an_error() {
    let oracle = MockOracle::new(vec![utxo(1, 1_000_000)], Vec::new());
    let spender = Spender::new(gas_config(), KeyPair::from_wif(WIF, ADDRESS_VERSION).unwrap());
    let witnessed = spender
        .invoke(&oracle, Script::from_hex("66").unwrap(), Fixed8::ZERO)
        .unwrap();

    let submitter = MockSubmitter::new(SubmitResult::rejected("double spend"));
    let submitted = spender.submit(&submitter, witnessed).unwrap();
    assert!(!submitted.accepted());
    assert_eq!(submitted.result().message.as_deref(), Some("double spend"));
}

#[test]
fn test_oracle_error_propagates() {
    let mut oracle = MockOracle::new(vec![utxo(1, 1_000_000)], Vec::new());
    oracle.address = "somebody-else".to_string();
    let spender = Spender::new(gas_config(), KeyPair::from_wif(WIF, ADDRESS_VERSION).unwrap());
    assert!(matches!(
        spender.invoke(&oracle, Script::from_hex("66").unwrap(), Fixed8::ZERO),
        Err(TransactionError::Network(_))
    ));
}
