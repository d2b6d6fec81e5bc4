//! Turns an edited [`VariantMatrix`] into the writes needed to bring the
//! persisted sizes in line with it.
//!
//! There is no delete operation. Clearing a size is an `Update` to 0, and a
//! size the edit session never touched is left alone, because zero-quantity
//! rows are kept for stock history.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::VariantError;
use crate::key::VariantKey;
use crate::matrix::VariantMatrix;

/// One required remote change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ReconciliationOperation {
    /// No persisted row exists yet for the key.
    Create { key: VariantKey, quantity: u32 },
    /// A persisted row exists and its quantity changes.
    Update { key: VariantKey, quantity: u32 },
}

impl ReconciliationOperation {
    #[must_use]
    pub fn key(&self) -> &VariantKey {
        match self {
            ReconciliationOperation::Create { key, .. }
            | ReconciliationOperation::Update { key, .. } => key,
        }
    }

    #[must_use]
    pub fn quantity(&self) -> u32 {
        match self {
            ReconciliationOperation::Create { quantity, .. }
            | ReconciliationOperation::Update { quantity, .. } => *quantity,
        }
    }
}

impl fmt::Display for ReconciliationOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconciliationOperation::Create { key, quantity } => {
                write!(f, "create {key} = {quantity}")
            }
            ReconciliationOperation::Update { key, quantity } => {
                write!(f, "update {key} = {quantity}")
            }
        }
    }
}

/// Computes the operations that move remote state from `baseline` to
/// `desired`, sorted by key.
///
/// Only the visible entries of `desired` are considered:
///
/// - no baseline row and a positive quantity: `Create`;
/// - a baseline row with a different quantity: `Update` (including to 0);
/// - no baseline row and a zero quantity, or an unchanged quantity: nothing.
///
/// Keys missing from `desired`, or orphaned by its sizing mode, are untouched.
/// Running `diff` on two identical matrices yields no operations.
///
/// # Errors
///
/// Returns [`VariantError::InvalidQuantity`] if either matrix holds a negative
/// quantity or a quantity that does not fit a `u32`.
pub fn diff(
    baseline: &VariantMatrix,
    desired: &VariantMatrix,
) -> Result<Vec<ReconciliationOperation>, VariantError> {
    baseline.validate()?;
    desired.validate()?;

    let mut operations = Vec::new();
    for (key, wanted) in desired.entries() {
        let quantity = u32::try_from(wanted)
            .map_err(|_| VariantError::invalid_quantity(key.as_str(), wanted))?;

        let operation = if baseline.contains(key) {
            if baseline.get(key) == wanted {
                continue;
            }
            ReconciliationOperation::Update {
                key: key.clone(),
                quantity,
            }
        } else if quantity > 0 {
            ReconciliationOperation::Create {
                key: key.clone(),
                quantity,
            }
        } else {
            continue;
        };

        tracing::debug!(%operation, "planned size operation");
        operations.push(operation);
    }

    tracing::debug!(
        operations = operations.len(),
        orphaned = desired.orphaned().count(),
        "size reconciliation planned"
    );
    Ok(operations)
}
