//! Sequential application of reconciliation operations.
//!
//! The actual writes belong to whatever talks to the inventory API; this
//! module only fixes the policy: one awaited call per operation, in order,
//! stopping at the first failure. Nothing is retried or rolled back.

use std::fmt::Display;
use std::future::Future;

use thiserror::Error;

use crate::key::VariantKey;
use crate::reconcile::ReconciliationOperation;

/// Remote side of size persistence, e.g. `POST /tallas` and
/// `PATCH /tallas/{talla}/{id}` for one product.
pub trait VariantWriter {
    type Error: Display;

    fn create(
        &mut self,
        key: &VariantKey,
        quantity: u32,
    ) -> impl Future<Output = Result<(), Self::Error>>;

    fn update(
        &mut self,
        key: &VariantKey,
        quantity: u32,
    ) -> impl Future<Output = Result<(), Self::Error>>;
}

#[derive(Debug, Error)]
#[error("could not save sizes: {operation} failed after {applied} of {total} operations: {reason}")]
pub struct ApplyError {
    pub operation: ReconciliationOperation,
    /// Operations that completed before the failure.
    pub applied: usize,
    pub total: usize,
    pub reason: String,
}

/// Applies `operations` one at a time and returns how many were applied.
///
/// # Errors
///
/// Returns [`ApplyError`] at the first failing operation. Operations before
/// it stay applied.
pub async fn apply_operations<W>(
    writer: &mut W,
    operations: &[ReconciliationOperation],
) -> Result<usize, ApplyError>
where
    W: VariantWriter,
{
    let total = operations.len();

    for (applied, operation) in operations.iter().enumerate() {
        let result = match operation {
            ReconciliationOperation::Create { key, quantity } => writer.create(key, *quantity).await,
            ReconciliationOperation::Update { key, quantity } => writer.update(key, *quantity).await,
        };

        if let Err(e) = result {
            tracing::warn!(%operation, applied, total, error = %e, "size write failed");
            return Err(ApplyError {
                operation: operation.clone(),
                applied,
                total,
                reason: e.to_string(),
            });
        }
        tracing::debug!(%operation, "size write applied");
    }

    tracing::info!(total, "size writes applied");
    Ok(total)
}
