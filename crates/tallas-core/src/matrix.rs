//! Editable quantity-per-size state for one product during one edit session.
//!
//! A matrix is built from the product's persisted sizes, edited in place, and
//! handed to [`crate::reconcile::diff`] together with the untouched baseline
//! when the user saves. It never talks to the network.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::VariantError;
use crate::key::{discover_cups, infer_mode, merged_cups, normalize, BaseSize, VariantKey, VariantMode};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantMatrix {
    quantities: BTreeMap<VariantKey, i64>,
    /// Keys exposed by the current sizing mode. `None` until a mode is
    /// chosen, in which case every entry is visible.
    visible: Option<BTreeSet<VariantKey>>,
}

impl VariantMatrix {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a matrix from persisted `(label, quantity)` rows.
    ///
    /// Labels are normalized first, so `"m cup 36"` and `"M__COPA_36"` are the
    /// same size.
    ///
    /// # Errors
    ///
    /// Returns [`VariantError::DuplicateKey`] when two rows normalize to the
    /// same key and [`VariantError::InvalidQuantity`] for negative quantities.
    pub fn from_persisted<I, L>(entries: I) -> Result<Self, VariantError>
    where
        I: IntoIterator<Item = (L, i64)>,
        L: AsRef<str>,
    {
        let mut quantities = BTreeMap::new();
        for (label, quantity) in entries {
            let key = normalize(label.as_ref());
            if quantity < 0 {
                return Err(VariantError::invalid_quantity(key.as_str(), quantity));
            }
            if quantities.contains_key(&key) {
                tracing::warn!(key = %key, "persisted sizes contain a duplicate key");
                return Err(VariantError::DuplicateKey { key });
            }
            quantities.insert(key, quantity);
        }

        Ok(Self {
            quantities,
            visible: None,
        })
    }

    /// Quantity for `key`, 0 when there is no entry.
    #[must_use]
    pub fn get(&self, key: &VariantKey) -> i64 {
        self.quantities.get(key).copied().unwrap_or(0)
    }

    /// `true` when the matrix holds an entry for `key`, even a zero one.
    #[must_use]
    pub fn contains(&self, key: &VariantKey) -> bool {
        self.quantities.contains_key(key)
    }

    /// Sets the quantity for `key`. Zero is kept as an explicit "no stock"
    /// entry rather than removing the key.
    ///
    /// # Errors
    ///
    /// Returns [`VariantError::InvalidQuantity`] if `quantity` is negative and
    /// [`VariantError::HiddenSize`] if a mode is active that does not offer
    /// `key`.
    pub fn set(&mut self, key: VariantKey, quantity: i64) -> Result<(), VariantError> {
        if quantity < 0 {
            return Err(VariantError::invalid_quantity(key.as_str(), quantity));
        }
        if !self.is_visible(&key) {
            tracing::warn!(key = %key, "edit for a size outside the selected mode");
            return Err(VariantError::HiddenSize { key });
        }
        self.quantities.insert(key, quantity);
        Ok(())
    }

    /// Sets the quantity for `key` from raw form input. Blank input means 0.
    ///
    /// # Errors
    ///
    /// Returns [`VariantError::InvalidQuantity`] for non-integer or negative
    /// input and [`VariantError::HiddenSize`] as [`VariantMatrix::set`] does.
    pub fn set_input(&mut self, key: VariantKey, raw: &str) -> Result<(), VariantError> {
        let quantity = parse_quantity(&key, raw)?;
        self.set(key, quantity)
    }

    /// Direct access to the stored quantities, bypassing validation.
    ///
    /// Anything written here is re-checked by [`crate::reconcile::diff`].
    pub fn quantities_mut(&mut self) -> &mut BTreeMap<VariantKey, i64> {
        &mut self.quantities
    }

    /// Sizing mode implied by every key the matrix holds.
    #[must_use]
    pub fn mode(&self) -> VariantMode {
        infer_mode(self.quantities.keys())
    }

    /// Cups to offer for this product: `defaults` merged with the cups already
    /// present on its keys.
    #[must_use]
    pub fn cups(&self, defaults: &[u32]) -> Vec<u32> {
        merged_cups(defaults, &discover_cups(self.quantities.keys()))
    }

    /// Full cross product of keys a mode exposes inputs for.
    #[must_use]
    pub fn keys_for_mode(
        mode: VariantMode,
        base_sizes: &[BaseSize],
        cup_sizes: &[u32],
    ) -> BTreeSet<VariantKey> {
        match mode {
            VariantMode::BaseSizeOnly => base_sizes
                .iter()
                .map(|size| VariantKey::from_parts(Some(*size), None))
                .collect(),
            VariantMode::UniqueOnly => BTreeSet::from([VariantKey::from_parts(None, None)]),
            VariantMode::UniqueWithCup => cup_sizes
                .iter()
                .map(|cup| VariantKey::from_parts(None, Some(*cup)))
                .collect(),
            VariantMode::BaseSizeWithCup => base_sizes
                .iter()
                .flat_map(|size| {
                    cup_sizes
                        .iter()
                        .map(move |cup| VariantKey::from_parts(Some(*size), Some(*cup)))
                })
                .collect(),
        }
    }

    /// Switches the visible key set to `mode`. Entries outside the new set are
    /// kept but become orphaned: hidden and left out of reconciliation.
    pub fn switch_mode(
        &mut self,
        mode: VariantMode,
        base_sizes: &[BaseSize],
        cup_sizes: &[u32],
    ) -> &BTreeSet<VariantKey> {
        let keys = Self::keys_for_mode(mode, base_sizes, cup_sizes);
        tracing::debug!(%mode, keys = keys.len(), "switching sizing mode");
        self.visible.insert(keys)
    }

    /// Keys exposed by the current mode, if one was chosen.
    #[must_use]
    pub fn visible_keys(&self) -> Option<&BTreeSet<VariantKey>> {
        self.visible.as_ref()
    }

    #[must_use]
    pub fn is_visible(&self, key: &VariantKey) -> bool {
        self.visible.as_ref().is_none_or(|keys| keys.contains(key))
    }

    /// Visible entries in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&VariantKey, i64)> + '_ {
        self.quantities
            .iter()
            .filter(|(key, _)| self.is_visible(key))
            .map(|(key, quantity)| (key, *quantity))
    }

    /// Entries hidden by the current mode.
    pub fn orphaned(&self) -> impl Iterator<Item = (&VariantKey, i64)> + '_ {
        self.quantities
            .iter()
            .filter(|(key, _)| !self.is_visible(key))
            .map(|(key, quantity)| (key, *quantity))
    }

    /// Sum of the visible quantities.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.entries().map(|(_, quantity)| quantity).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Re-checks every stored quantity, including orphaned ones.
    pub(crate) fn validate(&self) -> Result<(), VariantError> {
        match self.quantities.iter().find(|(_, quantity)| **quantity < 0) {
            Some((key, quantity)) => Err(VariantError::invalid_quantity(key.as_str(), quantity)),
            None => Ok(()),
        }
    }
}

/// Parses a quantity typed into a size input. Blank means 0.
///
/// # Errors
///
/// Returns [`VariantError::InvalidQuantity`] unless the input is a
/// non-negative integer.
pub fn parse_quantity(key: &VariantKey, raw: &str) -> Result<i64, VariantError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    match trimmed.parse::<i64>() {
        Ok(quantity) if quantity >= 0 => Ok(quantity),
        _ => Err(VariantError::invalid_quantity(key.as_str(), trimmed)),
    }
}
