//! Guards for the return ("devolución") workflow.
//!
//! A return swaps one item the customer brings back ("received") for one or
//! more items handed to the customer ("given"). The given cart must be worth
//! at least as much as the received item; that check runs before any size
//! reconciliation is attempted.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::VariantError;
use crate::key::{normalize, VariantKey, UNIQUE_TOKEN};
use crate::matrix::VariantMatrix;
use crate::product::ProductKind;
use crate::reconcile::{diff, ReconciliationOperation};

/// One item on either side of a return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnLine {
    pub kind: ProductKind,
    /// Product id for shoes and bags, garment name for clothing.
    pub reference: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    pub price: Decimal,
}

impl ReturnLine {
    /// Normalized size key. Bags are always the unique size.
    #[must_use]
    pub fn variant_key(&self) -> Option<VariantKey> {
        if self.kind.is_sized() {
            self.size
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .map(normalize)
        } else {
            Some(normalize(UNIQUE_TOKEN))
        }
    }
}

/// Validated return, ready to be sent to the returns endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnSummary {
    pub received: ReturnLine,
    pub received_key: Option<VariantKey>,
    pub given: Vec<ReturnLine>,
    pub given_total: Decimal,
    /// `given_total - received.price`; never negative once validated.
    pub price_difference: Decimal,
    /// Shared color of the given clothing items, if any were given.
    pub given_color: Option<String>,
    /// Given references joined with `"; "`.
    pub given_products: String,
    /// Given size keys joined with `"; "`.
    pub given_sizes: String,
}

/// A validated return together with the size writes it requires.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnPlan {
    pub summary: ReturnSummary,
    pub operations: Vec<ReconciliationOperation>,
}

/// Checks that the given cart is worth at least the received item and
/// returns the cart total.
///
/// # Errors
///
/// Returns [`VariantError::BusinessRule`] when the cart total is lower than
/// `received_price`.
pub fn check_cross_total(
    received_price: Decimal,
    given: &[ReturnLine],
) -> Result<Decimal, VariantError> {
    let given_total: Decimal = given.iter().map(|line| line.price).sum();
    if given_total < received_price {
        return Err(VariantError::BusinessRule(format!(
            "given total {given_total} must be equal to or greater than the received price {received_price}"
        )));
    }
    Ok(given_total)
}

/// Validates a return: required selections, numeric shoe sizes, the
/// cross-total guard and the single-color rule for given clothing.
///
/// # Errors
///
/// Returns [`VariantError::BusinessRule`] describing the first failed rule.
pub fn validate_return(
    received: &ReturnLine,
    given: &[ReturnLine],
) -> Result<ReturnSummary, VariantError> {
    if received.price < Decimal::ZERO {
        return Err(rule("the received price must not be negative"));
    }
    if received.reference.trim().is_empty() {
        return Err(rule(format!("select the returned {}", received.kind)));
    }

    let received_key = received.variant_key();
    if received.kind.is_sized() {
        let Some(size) = received.size.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
            return Err(rule(format!(
                "enter the size of the returned {}",
                received.kind
            )));
        };
        if received.kind == ProductKind::Shoe && size.parse::<f64>().is_err() {
            return Err(rule("the returned shoe size must be numeric"));
        }
    }

    if given.is_empty() {
        return Err(rule("add at least one given item to the cart"));
    }
    let mut given_keys = Vec::with_capacity(given.len());
    for line in given {
        if line.reference.trim().is_empty() {
            return Err(rule(format!("a given {} has no reference", line.kind)));
        }
        if line.price < Decimal::ZERO {
            return Err(rule(format!(
                "the price of the given {} {} must not be negative",
                line.kind,
                line.reference.trim()
            )));
        }
        let Some(key) = line.variant_key() else {
            return Err(rule(format!("select the size of the given {}", line.kind)));
        };
        if line.kind == ProductKind::Clothing
            && line.color.as_deref().is_none_or(|c| c.trim().is_empty())
        {
            return Err(rule("given clothing requires a name and a color"));
        }
        given_keys.push(key);
    }

    let given_total = check_cross_total(received.price, given)?;

    let colors: BTreeSet<&str> = given
        .iter()
        .filter(|line| line.kind == ProductKind::Clothing)
        .filter_map(|line| line.color.as_deref())
        .collect();
    if colors.len() > 1 {
        return Err(rule(
            "given clothing items in one return must share the same color",
        ));
    }

    Ok(ReturnSummary {
        received: received.clone(),
        received_key,
        given: given.to_vec(),
        given_total,
        price_difference: given_total - received.price,
        given_color: colors.into_iter().next().map(str::to_string),
        given_products: given
            .iter()
            .map(|line| line.reference.trim())
            .collect::<Vec<_>>()
            .join("; "),
        given_sizes: given_keys
            .iter()
            .map(VariantKey::as_str)
            .collect::<Vec<_>>()
            .join("; "),
    })
}

/// Validates a return and only then plans the size writes for the edited
/// matrix.
///
/// # Errors
///
/// Returns the first [`VariantError::BusinessRule`] from
/// [`validate_return`]; in that case `diff` is never run. Otherwise
/// propagates [`VariantError::InvalidQuantity`] from [`diff`].
pub fn plan_return(
    received: &ReturnLine,
    given: &[ReturnLine],
    baseline: &VariantMatrix,
    desired: &VariantMatrix,
) -> Result<ReturnPlan, VariantError> {
    let summary = validate_return(received, given)?;
    let operations = diff(baseline, desired)?;
    tracing::info!(
        given_total = %summary.given_total,
        difference = %summary.price_difference,
        operations = operations.len(),
        "return validated"
    );
    Ok(ReturnPlan {
        summary,
        operations,
    })
}

fn rule(message: impl Into<String>) -> VariantError {
    VariantError::BusinessRule(message.into())
}
