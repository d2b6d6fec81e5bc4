//! Typed boundary for catalog rows coming back from the inventory API.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::VariantError;
use crate::key::{normalize, VariantKey, VariantMode};
use crate::matrix::VariantMatrix;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductKind {
    #[serde(rename = "zapato")]
    Shoe,
    #[serde(rename = "ropa")]
    Clothing,
    #[serde(rename = "bolso")]
    Bag,
}

impl ProductKind {
    /// Bags are stocked as a single unit with no size.
    #[must_use]
    pub fn is_sized(self) -> bool {
        !matches!(self, ProductKind::Bag)
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductKind::Shoe => write!(f, "shoe"),
            ProductKind::Clothing => write!(f, "clothing"),
            ProductKind::Bag => write!(f, "bag"),
        }
    }
}

/// Size label as the API sends it: text for clothing, a number for shoes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeLabel {
    Number(serde_json::Number),
    Text(String),
}

impl SizeLabel {
    #[must_use]
    pub fn to_key(&self) -> VariantKey {
        normalize(&self.to_string())
    }
}

impl fmt::Display for SizeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeLabel::Number(n) => write!(f, "{n}"),
            SizeLabel::Text(s) => f.write_str(s),
        }
    }
}

/// One persisted size row of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSize {
    #[serde(rename = "talla")]
    pub size: SizeLabel,
    #[serde(rename = "cantidad", default)]
    pub quantity: i64,
}

/// A catalog product together with its persisted sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(rename = "precio")]
    pub price: Decimal,
    #[serde(rename = "tallas", default)]
    pub sizes: Vec<PersistedSize>,
}

impl Product {
    /// Builds the baseline matrix an edit session starts from.
    ///
    /// # Errors
    ///
    /// Propagates [`VariantError::DuplicateKey`] and
    /// [`VariantError::InvalidQuantity`] from [`VariantMatrix::from_persisted`].
    pub fn baseline(&self) -> Result<VariantMatrix, VariantError> {
        VariantMatrix::from_persisted(
            self.sizes
                .iter()
                .map(|row| (row.size.to_string(), row.quantity)),
        )
    }

    /// Sizing mode inferred from the persisted rows.
    #[must_use]
    pub fn mode(&self) -> VariantMode {
        let keys: Vec<VariantKey> = self.sizes.iter().map(|row| row.size.to_key()).collect();
        crate::key::infer_mode(&keys)
    }

    /// Total units across all sizes, treating negative rows as 0.
    #[must_use]
    pub fn total_stock(&self) -> i64 {
        self.sizes.iter().map(|row| row.quantity.max(0)).sum()
    }

    /// Human label used to pick the product in the intake and return forms,
    /// e.g. `"Blusa Lino — Blanco — $85000"`.
    #[must_use]
    pub fn display_label(&self) -> String {
        match self.color.as_deref().filter(|c| !c.is_empty()) {
            Some(color) => format!("{} — {color} — ${}", self.name, self.price),
            None => format!("{} — ${}", self.name, self.price),
        }
    }
}
