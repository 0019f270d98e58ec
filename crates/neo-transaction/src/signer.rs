//! Witness templates and the single-key signer.
//!
//! A template knows which account it speaks for (its script hash) and how
//! to turn the hashable bytes into a witness. `SingleSig` covers the
//! standard account: one P-256 key, `PUSHBYTES33 <key> CHECKSIG`.

use neo_primitives::ec::PrivateKey;
use neo_primitives::Uint160;
use neo_script::Script;

use crate::transaction::Transaction;
use crate::witness::Witness;
use crate::TransactionError;

/// Trait for anything that can authorize a transaction.
///
/// Any signing strategy (single key, multi-signature, custom contracts)
/// implements this trait. `sign` receives the hashable bytes, which are the
/// same for every witness of a transaction.
pub trait WitnessTemplate {
    /// Produce a witness over `message`.
    ///
    /// # Arguments
    /// * `message` - The transaction's hashable bytes.
    ///
    /// # Returns
    /// `Ok(Witness)`, or a `SigningError` if the key material fails.
    fn sign(&self, message: &[u8]) -> Result<Witness, TransactionError>;

    /// Script hash of the verification script this template produces.
    fn script_hash(&self) -> Uint160;
}

/// Single-key signing template.
pub struct SingleSig {
    private_key: PrivateKey,
    verification_script: Script,
}

impl SingleSig {
    /// Create a template for `private_key`; the verification script is
    /// derived from its compressed public key.
    pub fn new(private_key: PrivateKey) -> Self {
        let verification_script = Script::signature_contract(&private_key.pub_key());
        SingleSig {
            private_key,
            verification_script,
        }
    }

    /// The verification script every witness from this template carries.
    pub fn verification_script(&self) -> &Script {
        &self.verification_script
    }
}

impl WitnessTemplate for SingleSig {
    /// Sign `message` (ECDSA P-256, SHA-256, RFC6979) and build
    /// `PUSHBYTES64 <r || s>` as the invocation script.
    fn sign(&self, message: &[u8]) -> Result<Witness, TransactionError> {
        let sig = self
            .private_key
            .sign(message)
            .map_err(|e| TransactionError::SigningError(e.to_string()))?;
        Ok(Witness::new(
            Script::signature_invocation(&sig),
            self.verification_script.clone(),
        ))
    }

    fn script_hash(&self) -> Uint160 {
        self.verification_script.script_hash()
    }
}

/// Sign `tx` with `key` and return the witness without attaching it.
///
/// # Returns
/// The witness, or `SigningError` if `tx` already carries witnesses.
pub fn sign(tx: &Transaction, key: &PrivateKey) -> Result<Witness, TransactionError> {
    if !tx.witnesses.is_empty() {
        return Err(TransactionError::SigningError(
            "refusing to sign a transaction that already has witnesses".to_string(),
        ));
    }
    SingleSig::new(key.clone()).sign(&tx.hashable_bytes())
}

/// Insert `witness` into `tx`, keeping witnesses ascending by script hash.
///
/// # Returns
/// `SigningError` if a witness for the same script hash is already present.
pub fn attach_witness(tx: &mut Transaction, witness: Witness) -> Result<(), TransactionError> {
    let hash = witness.script_hash();
    match tx
        .witnesses
        .binary_search_by_key(&hash, |w| w.script_hash())
    {
        Ok(_) => Err(TransactionError::SigningError(format!(
            "a witness for {} is already attached",
            hash
        ))),
        Err(pos) => {
            tx.witnesses.insert(pos, witness);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TransactionData;

    #[test]
    fn test_sign_produces_standard_witness() {
        let key = PrivateKey::new();
        let tx = Transaction::new(TransactionData::Contract);
        let witness = sign(&tx, &key).unwrap();
        assert_eq!(witness.invocation_script.len(), 65);
        assert!(witness.verification_script.is_signature_contract());
        assert!(witness.verify(&tx.hashable_bytes()));
    }

    #[test]
    fn test_sign_refuses_witnessed_transaction() {
        let key = PrivateKey::new();
        let mut tx = Transaction::new(TransactionData::Contract);
        let witness = sign(&tx, &key).unwrap();
        attach_witness(&mut tx, witness).unwrap();
        assert!(matches!(
            sign(&tx, &key),
            Err(TransactionError::SigningError(_))
        ));
    }

    #[test]
    fn test_attach_keeps_order_and_rejects_duplicates() {
        let tx = Transaction::new(TransactionData::Contract);
        let witnesses: Vec<Witness> = (0..4).map(|_| sign(&tx, &PrivateKey::new()).unwrap()).collect();

        let mut signed = tx.clone();
        for w in witnesses.iter().cloned() {
            attach_witness(&mut signed, w).unwrap();
        }
        let hashes: Vec<Uint160> = signed.witnesses.iter().map(Witness::script_hash).collect();
        let mut sorted = hashes.clone();
        sorted.sort();
        assert_eq!(hashes, sorted);

        assert!(attach_witness(&mut signed, witnesses[0].clone()).is_err());
    }

    #[test]
    fn test_template_script_hash() {
        let key = PrivateKey::from_wif("KxDgvEKzgSBPPfuVfw67oPQBSjidEiqTHURKSDL1R7yGaGYAeYnr").unwrap();
        let signer = SingleSig::new(key);
        assert_eq!(
            hex::encode(signer.script_hash().as_bytes()),
            "23ba2703c53263e8d6e522dc32203339dcd8eee9"
        );
    }
}
