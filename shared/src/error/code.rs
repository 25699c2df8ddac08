//! Error codes

use std::fmt;

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Numeric error code, serialized as a bare number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    Success = 0,
    ValidationFailed = 2,
    RequiredField = 7,

    /// Marketplace rejected the shop access token
    TokenInvalid = 1004,

    ProductInvalidPrice = 6002,
    TierVariationMissing = 6101,
    /// Edit would leave a tier without options
    TierWouldBeEmpty = 6102,
    /// Option already has a model at the requested position
    VariationOptionExists = 6103,
    /// Selection or coordinates reference a missing tier or option
    VariationSelectionInvalid = 6104,
    /// New option index still unknown to the marketplace after retrying
    VariationIndexNotReady = 6105,
    /// Structure changed between read and write
    VariationSnapshotStale = 6106,
    ModelInvalidStock = 6201,

    InternalError = 9001,
    NetworkError = 9003,
    TimeoutError = 9004,
    ConfigError = 9005,
    /// Marketplace API reported an error
    UpstreamError = 9501,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 17] = [
        Self::Success,
        Self::ValidationFailed,
        Self::RequiredField,
        Self::TokenInvalid,
        Self::ProductInvalidPrice,
        Self::TierVariationMissing,
        Self::TierWouldBeEmpty,
        Self::VariationOptionExists,
        Self::VariationSelectionInvalid,
        Self::VariationIndexNotReady,
        Self::VariationSnapshotStale,
        Self::ModelInvalidStock,
        Self::InternalError,
        Self::NetworkError,
        Self::TimeoutError,
        Self::ConfigError,
        Self::UpstreamError,
    ];

    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default message when the caller supplies none
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Success => "OK",
            Self::ValidationFailed => "Validation failed",
            Self::RequiredField => "Required field is missing",
            Self::TokenInvalid => "Shop access token is invalid or expired",
            Self::ProductInvalidPrice => "Price must be greater than zero",
            Self::TierVariationMissing => "Product has no tier variations",
            Self::TierWouldBeEmpty => "At least one option must remain in every tier",
            Self::VariationOptionExists => "Model already exists",
            Self::VariationSelectionInvalid => "Selected option does not exist",
            Self::VariationIndexNotReady => "Marketplace has not applied the variation update yet",
            Self::VariationSnapshotStale => "Variation structure changed since it was read",
            Self::ModelInvalidStock => "Stock cannot be negative",
            Self::InternalError => "Internal server error",
            Self::NetworkError => "Could not reach the marketplace",
            Self::TimeoutError => "Marketplace request timed out",
            Self::ConfigError => "Server is misconfigured",
            Self::UpstreamError => "Marketplace API error",
        }
    }

    pub const fn category(&self) -> ErrorCategory {
        match self.code() {
            0..1000 => ErrorCategory::Request,
            1000..2000 => ErrorCategory::Shop,
            6000..7000 => ErrorCategory::Variation,
            _ => ErrorCategory::System,
        }
    }

    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,
            Self::TokenInvalid => StatusCode::UNAUTHORIZED,
            Self::VariationOptionExists | Self::VariationSnapshotStale => StatusCode::CONFLICT,
            Self::VariationIndexNotReady | Self::NetworkError | Self::TimeoutError => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::UpstreamError => StatusCode::BAD_GATEWAY,
            Self::InternalError | Self::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// The same request may succeed if sent again shortly
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::VariationIndexNotReady | Self::NetworkError | Self::TimeoutError
        )
    }
}

/// Coarse grouping by code range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Request,
    Shop,
    Variation,
    System,
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|c| c.code() == value)
            .ok_or(InvalidErrorCode(value))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
