//! Client error types

use shared::StoreError;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Marketplace rejected the call (`error` field set in the envelope)
    #[error("{error}: {message}")]
    Api { error: String, message: String },

    /// Envelope without the expected payload
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Non-success HTTP status without a decodable envelope
    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Request could not be signed
    #[error("Signing error: {0}")]
    Signing(String),
}

impl ClientError {
    /// The marketplace reports a not-yet-applied structural edit as a
    /// `tier_index` error on the model call.
    pub fn is_tier_index_error(&self) -> bool {
        match self {
            Self::Api { error, message } => {
                error.contains("tier_index") || message.contains("tier_index")
            }
            _ => false,
        }
    }

    /// Marketplace message, falling back to the error code when empty
    fn upstream_text(self) -> String {
        match self {
            Self::Api { error, message } if message.is_empty() => error,
            Self::Api { message, .. } => message,
            other => other.to_string(),
        }
    }

    /// Classification for `add_model` failures: only there does a
    /// `tier_index` rejection mean the structure edit has not landed yet
    pub fn into_create_error(self) -> StoreError {
        if self.is_tier_index_error() {
            StoreError::TierIndexNotReady(self.upstream_text())
        } else {
            StoreError::Upstream(self.upstream_text())
        }
    }
}

impl From<ClientError> for StoreError {
    fn from(e: ClientError) -> Self {
        StoreError::Upstream(e.upstream_text())
    }
}

impl From<ClientError> for AppError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Http(err) if err.is_timeout() => {
                AppError::with_message(ErrorCode::TimeoutError, err.to_string())
            }
            ClientError::Http(err) => AppError::with_message(ErrorCode::NetworkError, err.to_string()),
            ClientError::Api { error, message } if error.contains("error_auth") => {
                AppError::new(ErrorCode::TokenInvalid).with_detail("upstream_message", message)
            }
            ClientError::Api { error, message } => {
                let text = if message.is_empty() { error.clone() } else { message };
                AppError::upstream(text).with_detail("upstream_error", error)
            }
            ClientError::Signing(msg) => AppError::with_message(ErrorCode::ConfigError, msg),
            other => AppError::upstream(other.to_string()),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
