//! UTXO selection.
//!
//! A deliberately simple first-fit selector: filter to outputs unlocked at
//! the current height, then accumulate in presentation order until the
//! target is covered. Traffic generation does not need UTXO-set hygiene, so
//! determinism wins over value- or size-optimal picking.

use thiserror::Error;
use txgen_types::UnspentOutput;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("selection target must be positive")]
    ZeroTarget,

    #[error("insufficient unspent value: need {needed}, have {available}")]
    Insufficient { needed: u64, available: u64 },
}

/// Result of a successful selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionResult {
    /// The selected outputs, in presentation order.
    pub selected: Vec<UnspentOutput>,
    /// Total value of the selection (>= the target).
    pub total: u64,
}

/// Select the minimal in-order prefix of eligible outputs covering `target`.
///
/// Outputs with `unlock_height > current_height` are skipped. Returns
/// [`SelectionError::Insufficient`] when the eligible total falls short of
/// the target, and [`SelectionError::ZeroTarget`] for a zero target (a zero
/// target would otherwise select nothing and build an empty transaction).
pub fn select_utxos(
    candidates: &[UnspentOutput],
    target: u64,
    current_height: u64,
) -> Result<SelectionResult, SelectionError> {
    if target == 0 {
        return Err(SelectionError::ZeroTarget);
    }

    let mut selected = Vec::new();
    let mut total = 0u64;
    for candidate in candidates {
        if !candidate.unlocked_at(current_height) {
            continue;
        }
        selected.push(candidate.clone());
        total = total.saturating_add(candidate.amount);
        if total >= target {
            return Ok(SelectionResult { selected, total });
        }
    }

    Err(SelectionError::Insufficient {
        needed: target,
        available: total,
    })
}
