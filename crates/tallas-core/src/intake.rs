//! Merchandise intake ("ingreso") line validation.
//!
//! Every line is checked and all problems are reported together, numbered by
//! line, so the user can fix the whole form in one pass. Only a form without
//! errors produces entries.

use serde::{Deserialize, Serialize};

use crate::error::VariantError;
use crate::key::{normalize, VariantKey};
use crate::product::ProductKind;

/// One line of the intake form as the user filled it in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeLine {
    pub kind: Option<ProductKind>,
    /// Product id for shoes and bags, garment name for clothing.
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
}

/// A validated intake line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeEntry {
    pub kind: ProductKind,
    pub product: String,
    pub color: Option<String>,
    /// `None` for bags.
    pub size: Option<VariantKey>,
    pub quantity: u32,
}

/// Validates every intake line.
///
/// # Errors
///
/// Returns [`VariantError::BusinessRule`] with one `line N: ...` message per
/// problem, joined by newlines, if any line is invalid or there are no lines.
pub fn validate_intake(lines: &[IntakeLine]) -> Result<Vec<IntakeEntry>, VariantError> {
    if lines.is_empty() {
        return Err(VariantError::BusinessRule(
            "add at least one intake line".to_string(),
        ));
    }

    let mut errors = Vec::new();
    let mut entries = Vec::with_capacity(lines.len());

    for (idx, line) in lines.iter().enumerate() {
        match validate_line(line) {
            Ok(entry) => entries.push(entry),
            Err(reason) => errors.push(format!("line {}: {reason}", idx + 1)),
        }
    }

    if !errors.is_empty() {
        tracing::warn!(invalid = errors.len(), total = lines.len(), "intake rejected");
        return Err(VariantError::BusinessRule(errors.join("\n")));
    }

    tracing::info!(entries = entries.len(), "intake validated");
    Ok(entries)
}

fn validate_line(line: &IntakeLine) -> Result<IntakeEntry, &'static str> {
    let quantity = line
        .quantity
        .filter(|q| *q > 0)
        .and_then(|q| u32::try_from(q).ok())
        .ok_or("invalid quantity")?;

    let kind = line.kind.ok_or("select a product type")?;
    let product = non_blank(line.product.as_deref()).ok_or(match kind {
        ProductKind::Shoe => "select a shoe",
        ProductKind::Clothing => "select the garment",
        ProductKind::Bag => "select the bag",
    })?;

    let color = non_blank(line.color.as_deref());
    if kind == ProductKind::Clothing && color.is_none() {
        return Err("select the garment color");
    }

    let size = if kind.is_sized() {
        Some(normalize(non_blank(line.size.as_deref()).ok_or("enter a size")?))
    } else {
        None
    };

    Ok(IntakeEntry {
        kind,
        product: product.to_string(),
        color: color.map(str::to_string),
        size,
        quantity,
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
