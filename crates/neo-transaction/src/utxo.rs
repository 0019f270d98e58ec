//! Coin selection over unspent outputs.
//!
//! Given the unspent outputs of one asset and a required amount, pick a
//! subset whose total covers it. The default policy is largest-first,
//! which keeps the input count low.

use log::{debug, warn};
use neo_primitives::{Fixed8, Uint256};
use serde::{Deserialize, Serialize};

use crate::input::TransactionInput;
use crate::TransactionError;

/// One spendable output of a single asset, as reported by a balance lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnspentOutput {
    /// Id of the transaction that created the output.
    #[serde(rename = "txid")]
    pub tx_id: Uint256,
    /// Position of the output in that transaction.
    pub index: u16,
    /// Amount held by the output.
    pub value: Fixed8,
}

impl UnspentOutput {
    /// Output `index` of transaction `tx_id`, holding `value`.
    pub fn new(tx_id: Uint256, index: u16, value: Fixed8) -> Self {
        UnspentOutput { tx_id, index, value }
    }

    /// The input that spends this output.
    pub fn to_input(&self) -> TransactionInput {
        TransactionInput::new(self.tx_id, self.index)
    }
}

/// Order in which candidates are considered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Biggest values first: fewest inputs.
    #[default]
    LargestFirst,
    /// Smallest values first: consolidates dust.
    SmallestFirst,
}

/// The outcome of a successful selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    /// Chosen outputs, in the order they were taken.
    pub selected: Vec<UnspentOutput>,
    /// Sum of `selected`.
    pub total: Fixed8,
}

impl Selection {
    /// What is left over after paying `required`. Never negative.
    pub fn change(&self, required: Fixed8) -> Fixed8 {
        match self.total.checked_sub(required) {
            Some(change) if change.is_positive() => change,
            _ => Fixed8::ZERO,
        }
    }

    /// Inputs spending the selected outputs, in selection order.
    pub fn inputs(&self) -> Vec<TransactionInput> {
        self.selected.iter().map(UnspentOutput::to_input).collect()
    }

    /// True when nothing was selected, which only happens for a
    /// non-positive required amount.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

/// Largest-first selection.
///
/// # Arguments
/// * `candidates` - Unspent outputs of a single asset.
/// * `required` - Amount the selection must cover.
///
/// # Returns
/// The shortest largest-first prefix whose total reaches `required`, or
/// `InsufficientFunds` if all candidates together fall short.
pub fn select(candidates: &[UnspentOutput], required: Fixed8) -> Result<Selection, TransactionError> {
    select_with(SelectionPolicy::LargestFirst, candidates, required)
}

/// Selection with an explicit policy.
///
/// Candidates with a non-positive value are skipped. Ties keep their
/// input order, so the result is deterministic for a given input.
pub fn select_with(
    policy: SelectionPolicy,
    candidates: &[UnspentOutput],
    required: Fixed8,
) -> Result<Selection, TransactionError> {
    if !required.is_positive() {
        return Ok(Selection {
            selected: Vec::new(),
            total: Fixed8::ZERO,
        });
    }

    let mut ordered: Vec<UnspentOutput> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if candidate.value.is_positive() {
            ordered.push(*candidate);
        } else {
            warn!(
                "ignoring unspent output {}:{} with value {}",
                candidate.tx_id, candidate.index, candidate.value
            );
        }
    }
    // sort_by is stable
    match policy {
        SelectionPolicy::LargestFirst => ordered.sort_by(|a, b| b.value.cmp(&a.value)),
        SelectionPolicy::SmallestFirst => ordered.sort_by(|a, b| a.value.cmp(&b.value)),
    }

    let mut total = Fixed8::ZERO;
    let mut taken = 0;
    for candidate in &ordered {
        if total >= required {
            break;
        }
        total = total
            .checked_add(candidate.value)
            .ok_or(TransactionError::AmountOverflow)?;
        taken += 1;
    }

    if total < required {
        let shortfall = required
            .checked_sub(total)
            .ok_or(TransactionError::AmountOverflow)?;
        return Err(TransactionError::InsufficientFunds {
            required,
            available: total,
            shortfall,
        });
    }

    ordered.truncate(taken);
    debug!(
        "selected {} of {} outputs totalling {} for {}",
        taken,
        candidates.len(),
        total,
        required
    );
    Ok(Selection {
        selected: ordered,
        total,
    })
}
