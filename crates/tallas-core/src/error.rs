use thiserror::Error;

use crate::key::VariantKey;

/// Failures raised by the variant model and the workflows built on it.
///
/// All of these abort the current save attempt only; the caller's in-memory
/// matrix is left untouched so the user can fix the input and resubmit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariantError {
    #[error("invalid quantity \"{quantity}\" for size {key}: must be a non-negative integer")]
    InvalidQuantity { key: String, quantity: String },

    #[error("duplicate size {key} in persisted variants")]
    DuplicateKey { key: VariantKey },

    #[error("{0}")]
    BusinessRule(String),

    #[error("unknown sizing mode: {0}")]
    UnknownMode(String),

    #[error("unknown base size: {0}")]
    UnknownSize(String),

    #[error("size {key} is not offered by the selected sizing mode")]
    HiddenSize { key: VariantKey },
}

impl VariantError {
    pub(crate) fn invalid_quantity(key: impl Into<String>, quantity: impl ToString) -> Self {
        VariantError::InvalidQuantity {
            key: key.into(),
            quantity: quantity.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
