//! Variation engine errors
//!
//! `VariationError` is what every engine operation returns. It converts
//! into [`AppError`] at the HTTP boundary so handlers can use `?`.

use shared::StoreError;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariationError {
    /// Item has no tier structure to edit
    #[error("Product has no tier variations")]
    NoTierVariation,

    #[error("No options selected for deletion")]
    EmptySelection,

    /// Selection names a tier or option the item does not have
    #[error("Option {option_index} does not exist in tier {tier_index}")]
    InvalidSelection { tier_index: u32, option_index: u32 },

    /// Deleting the selection would leave a tier with zero options
    #[error("Cannot delete every option of tier \"{tier_name}\"; at least one option must remain")]
    EmptyTier { tier_index: u32, tier_name: String },

    /// Matching option already has a model at the requested position
    #[error("Model \"{label}\" already exists")]
    DuplicateOption { label: String, option_index: u32 },

    #[error("Tier {tier} does not exist (item has {tier_count})")]
    TierOutOfRange { tier: usize, tier_count: usize },

    /// Coordinates must give one option index per tier
    #[error("Expected {expected} coordinates, got {actual}")]
    InvalidCoordinates { expected: usize, actual: usize },

    #[error("Model name must not be empty")]
    InvalidLabel,

    #[error("Price must be greater than zero")]
    InvalidPrice,

    #[error("Stock must not be negative")]
    InvalidStock,

    /// Structure changed between the read the caller confirmed and now
    #[error("Variation structure changed since it was read")]
    StaleSnapshot { expected: String, actual: String },

    /// New index still not recognized after every attempt; `message` is
    /// the store's last error verbatim
    #[error("{message}")]
    TransientIndex { attempts: u32, message: String },

    /// Any other store failure, message verbatim
    #[error("{0}")]
    Upstream(String),
}

impl From<StoreError> for VariationError {
    fn from(e: StoreError) -> Self {
        // Only the create retry loop treats a tier index rejection as transient
        match e {
            StoreError::TierIndexNotReady(message) | StoreError::Upstream(message) => {
                Self::Upstream(message)
            }
        }
    }
}

impl From<VariationError> for AppError {
    fn from(e: VariationError) -> Self {
        let message = e.to_string();
        match e {
            VariationError::NoTierVariation => {
                AppError::with_message(ErrorCode::TierVariationMissing, message)
            }
            VariationError::EmptySelection => {
                AppError::with_message(ErrorCode::RequiredField, message)
                    .with_detail("field", "options_to_delete")
            }
            VariationError::InvalidSelection {
                tier_index,
                option_index,
            } => AppError::with_message(ErrorCode::VariationSelectionInvalid, message)
                .with_detail("tier_index", tier_index)
                .with_detail("option_index", option_index),
            VariationError::EmptyTier {
                tier_index,
                tier_name,
            } => AppError::with_message(ErrorCode::TierWouldBeEmpty, message)
                .with_detail("tier_index", tier_index)
                .with_detail("tier_name", tier_name),
            VariationError::DuplicateOption {
                label,
                option_index,
            } => AppError::with_message(ErrorCode::VariationOptionExists, message)
                .with_detail("model_name", label)
                .with_detail("option_index", option_index),
            VariationError::TierOutOfRange { tier, tier_count } => {
                AppError::with_message(ErrorCode::VariationSelectionInvalid, message)
                    .with_detail("tier", tier)
                    .with_detail("tier_count", tier_count)
            }
            VariationError::InvalidCoordinates { expected, actual } => {
                AppError::with_message(ErrorCode::VariationSelectionInvalid, message)
                    .with_detail("expected", expected)
                    .with_detail("actual", actual)
            }
            VariationError::InvalidLabel => AppError::required("model_name"),
            VariationError::InvalidPrice => {
                AppError::with_message(ErrorCode::ProductInvalidPrice, message)
            }
            VariationError::InvalidStock => {
                AppError::with_message(ErrorCode::ModelInvalidStock, message)
            }
            VariationError::StaleSnapshot { expected, actual } => {
                AppError::with_message(ErrorCode::VariationSnapshotStale, message)
                    .with_detail("expected_version", expected)
                    .with_detail("current_version", actual)
            }
            VariationError::TransientIndex { attempts, message } => {
                AppError::with_message(ErrorCode::VariationIndexNotReady, message.clone())
                    .with_detail("attempts", attempts)
                    .with_detail("upstream_message", message)
            }
            VariationError::Upstream(message) => AppError::upstream(message),
        }
    }
}

pub type VariationResult<T> = Result<T, VariationError>;
