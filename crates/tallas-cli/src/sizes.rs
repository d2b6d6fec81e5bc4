//! Size key, reconciliation and intake command handlers.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;
use tallas_core::{
    diff, infer_mode, merged_cups, normalize, validate_intake, AppConfig, IntakeLine, Product,
    VariantKey, VariantMatrix, VariantMode,
};

/// A product as loaded plus the edits made in the size form.
#[derive(Debug, Deserialize)]
pub(crate) struct SizeEdit {
    pub(crate) product: Product,
    /// Raw form input keyed by size label. Blank or `null` means 0.
    #[serde(default)]
    pub(crate) quantities: BTreeMap<String, serde_json::Value>,
    /// Sizing mode picked in the form; the inferred one is kept when absent.
    #[serde(default)]
    pub(crate) mode: Option<String>,
}

impl SizeEdit {
    /// Builds the baseline matrix and the edited matrix.
    pub(crate) fn matrices(
        &self,
        config: &AppConfig,
    ) -> anyhow::Result<(VariantMatrix, VariantMatrix)> {
        let baseline = self.product.baseline()?;
        let mut desired = baseline.clone();

        if let Some(raw) = self.mode.as_deref() {
            let mode: VariantMode = raw.parse()?;
            let cups = baseline.cups(&config.default_cups);
            if mode.uses_cups() && cups.is_empty() {
                anyhow::bail!(
                    "mode {mode} needs at least one cup size; set TALLAS_DEFAULT_CUPS"
                );
            }
            desired.switch_mode(mode, &config.base_sizes, &cups);
        }

        for (label, value) in &self.quantities {
            desired.set_input(normalize(label), &raw_input(value))?;
        }

        let orphaned = desired.orphaned().count();
        if orphaned > 0 {
            tracing::warn!(
                product = %self.product.name,
                orphaned,
                "sizes outside the selected mode are left untouched"
            );
        }

        Ok((baseline, desired))
    }
}

pub(crate) fn raw_input(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub(crate) fn run_normalize(labels: &[String]) -> anyhow::Result<()> {
    for label in labels {
        println!("{label:<24}{}", normalize(label));
    }
    Ok(())
}

pub(crate) fn run_mode(labels: &[String]) -> anyhow::Result<()> {
    let keys: Vec<VariantKey> = labels.iter().map(|label| normalize(label)).collect();
    println!("{}", infer_mode(&keys));
    Ok(())
}

/// Prints the keys `mode` exposes, using the configured base sizes and the
/// default cups merged with `extra_cups`.
pub(crate) fn run_inputs(
    config: &AppConfig,
    mode: VariantMode,
    extra_cups: &[u32],
) -> anyhow::Result<()> {
    let extra: BTreeSet<u32> = extra_cups.iter().copied().collect();
    let cups = merged_cups(&config.default_cups, &extra);
    if mode.uses_cups() && cups.is_empty() {
        anyhow::bail!("mode {mode} needs at least one cup size; pass --cup or set TALLAS_DEFAULT_CUPS");
    }

    let keys = VariantMatrix::keys_for_mode(mode, &config.base_sizes, &cups);
    println!("{mode} ({} inputs)", keys.len());
    for key in &keys {
        println!("  {key}");
    }
    Ok(())
}

/// Prints the create/update operations needed to persist an edited product.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the persisted sizes are
/// inconsistent, or an edited quantity is invalid.
pub(crate) fn run_diff(config: &AppConfig, path: &Path) -> anyhow::Result<()> {
    let edit: SizeEdit = crate::read_json(path)?;
    let (baseline, desired) = edit.matrices(config)?;
    let operations = diff(&baseline, &desired)?;

    if operations.is_empty() {
        tracing::info!(product = %edit.product.name, "no size changes");
    }
    println!("{}", serde_json::to_string_pretty(&operations)?);
    Ok(())
}

/// Validates every intake line and prints the accepted entries.
///
/// # Errors
///
/// Returns an error listing every invalid line.
pub(crate) fn run_intake(path: &Path) -> anyhow::Result<()> {
    let lines: Vec<IntakeLine> = crate::read_json(path)?;
    let entries = validate_intake(&lines)?;
    let units: u64 = entries.iter().map(|entry| u64::from(entry.quantity)).sum();
    tracing::info!(lines = entries.len(), units, "intake validated");
    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}
