//! Transaction assembler.
//!
//! Collects the payload, attributes, inputs and outputs in caller order and
//! checks, per asset, that outputs plus fee do not exceed what the caller
//! declared as available. Every output must carry a positive value, and an
//! invocation's gas must survive encoding at the chosen version. Assembly is
//! pure: nothing is fetched or signed.

use std::collections::BTreeMap;

use log::debug;
use neo_primitives::{Fixed8, Uint256};

use crate::attribute::TransactionAttribute;
use crate::data::TransactionData;
use crate::input::TransactionInput;
use crate::output::TransactionOutput;
use crate::transaction::Transaction;
use crate::TransactionError;

/// Step-by-step assembler for an unsigned transaction.
#[derive(Clone, Debug)]
pub struct TransactionBuilder {
    tx: Transaction,
    available: BTreeMap<Uint256, Fixed8>,
    fees: BTreeMap<Uint256, Fixed8>,
    overflowed: bool,
}

impl TransactionBuilder {
    /// Start a draft carrying `data` at the type's default version.
    pub fn new(data: TransactionData) -> Self {
        TransactionBuilder {
            tx: Transaction::new(data),
            available: BTreeMap::new(),
            fees: BTreeMap::new(),
            overflowed: false,
        }
    }

    /// Override the version byte. Invocations below version 1 carry no gas.
    pub fn version(mut self, version: u8) -> Self {
        self.tx.version = version;
        self
    }

    /// Append one attribute.
    pub fn attribute(mut self, attribute: TransactionAttribute) -> Self {
        self.tx.attributes.push(attribute);
        self
    }

    /// Append attributes in iteration order.
    pub fn attributes<I: IntoIterator<Item = TransactionAttribute>>(mut self, attributes: I) -> Self {
        self.tx.attributes.extend(attributes);
        self
    }

    /// Append one input.
    pub fn input(mut self, input: TransactionInput) -> Self {
        self.tx.inputs.push(input);
        self
    }

    /// Append inputs in iteration order.
    pub fn inputs<I: IntoIterator<Item = TransactionInput>>(mut self, inputs: I) -> Self {
        self.tx.inputs.extend(inputs);
        self
    }

    /// Append one output. Its value must be positive by the time `build` runs.
    pub fn output(mut self, output: TransactionOutput) -> Self {
        self.tx.outputs.push(output);
        self
    }

    /// Append outputs in iteration order.
    pub fn outputs<I: IntoIterator<Item = TransactionOutput>>(mut self, outputs: I) -> Self {
        self.tx.outputs.extend(outputs);
        self
    }

    /// Declare `amount` of `asset_id` as spendable. Repeated calls add up.
    pub fn available(mut self, asset_id: Uint256, amount: Fixed8) -> Self {
        self.accumulate(Side::Available, asset_id, amount);
        self
    }

    /// Reserve `amount` of `asset_id` as fee. Repeated calls add up.
    pub fn fee(mut self, asset_id: Uint256, amount: Fixed8) -> Self {
        self.accumulate(Side::Fee, asset_id, amount);
        self
    }

    fn accumulate(&mut self, side: Side, asset_id: Uint256, amount: Fixed8) {
        let map = match side {
            Side::Available => &mut self.available,
            Side::Fee => &mut self.fees,
        };
        let entry = map.entry(asset_id).or_insert(Fixed8::ZERO);
        match entry.checked_add(amount) {
            Some(sum) => *entry = sum,
            None => self.overflowed = true,
        }
    }

    /// Check every asset and return the assembled draft.
    ///
    /// # Returns
    /// The transaction with attributes, inputs and outputs in the order they
    /// were added, or `Overspend` naming the first asset (in id order) whose
    /// outputs plus fee exceed its declared availability. An asset that was
    /// never declared counts as zero available. A non-positive output or an
    /// invocation gas the wire format cannot carry is `InvalidTransaction`.
    pub fn build(self) -> Result<Transaction, TransactionError> {
        if self.overflowed {
            return Err(TransactionError::AmountOverflow);
        }
        check_payload(&self.tx)?;
        check_outputs(&self.tx.outputs)?;

        let mut required = self.tx.output_totals()?;
        for (asset_id, fee) in &self.fees {
            let entry = required.entry(*asset_id).or_insert(Fixed8::ZERO);
            *entry = entry
                .checked_add(*fee)
                .ok_or(TransactionError::AmountOverflow)?;
        }
        check_overspend(&required, &self.available)?;

        debug!(
            "assembled {} with {} input(s), {} output(s), {} attribute(s)",
            self.tx.tx_type(),
            self.tx.inputs.len(),
            self.tx.outputs.len(),
            self.tx.attributes.len()
        );
        Ok(self.tx)
    }
}

enum Side {
    Available,
    Fee,
}

fn check_payload(tx: &Transaction) -> Result<(), TransactionError> {
    if let TransactionData::Invocation { gas, .. } = &tx.data {
        if gas.units() < 0 {
            return Err(TransactionError::InvalidTransaction(format!(
                "negative invocation gas {}",
                gas
            )));
        }
        // version 0 has no gas field on the wire
        if tx.version == 0 && gas.is_positive() {
            return Err(TransactionError::InvalidTransaction(format!(
                "version 0 invocation cannot carry gas {}",
                gas
            )));
        }
    }
    Ok(())
}

fn check_outputs(outputs: &[TransactionOutput]) -> Result<(), TransactionError> {
    match outputs
        .iter()
        .enumerate()
        .find(|(_, output)| !output.value.is_positive())
    {
        Some((index, output)) => Err(TransactionError::InvalidTransaction(format!(
            "output {} carries non-positive value {}",
            index, output.value
        ))),
        None => Ok(()),
    }
}

fn check_overspend(
    required: &BTreeMap<Uint256, Fixed8>,
    available: &BTreeMap<Uint256, Fixed8>,
) -> Result<(), TransactionError> {
    for (asset_id, required) in required {
        let available = available.get(asset_id).copied().unwrap_or(Fixed8::ZERO);
        if *required > available {
            return Err(TransactionError::Overspend {
                asset_id: *asset_id,
                required: *required,
                available,
            });
        }
    }
    Ok(())
}

/// Assemble a draft from its parts in one call.
///
/// # Arguments
/// * `inputs`, `outputs`, `attributes` - Kept in the given order.
/// * `data` - The type-specific payload.
/// * `declared` - Spendable amount per asset; repeated assets add up.
///
/// # Returns
/// The draft, or `Overspend` if an asset's outputs exceed its declaration.
/// The same payload and output checks as `TransactionBuilder::build` apply.
pub fn build(
    inputs: Vec<TransactionInput>,
    outputs: Vec<TransactionOutput>,
    attributes: Vec<TransactionAttribute>,
    data: TransactionData,
    declared: &[(Uint256, Fixed8)],
) -> Result<Transaction, TransactionError> {
    declared
        .iter()
        .fold(TransactionBuilder::new(data), |builder, (asset_id, amount)| {
            builder.available(*asset_id, *amount)
        })
        .inputs(inputs)
        .outputs(outputs)
        .attributes(attributes)
        .build()
}
