//! Error codes and the JSON error envelope of the seller API
//!
//! - [`ErrorCode`]: numeric code carried in every response
//! - [`AppError`]: code + message + optional structured details
//! - [`ApiResponse`]: `{ code, message, data, details }` envelope
//!
//! # Code ranges
//!
//! - 0xxx: request-level problems
//! - 1xxx: shop authorization
//! - 6xxx: product / tier variation rules
//! - 9xxx: server and marketplace failures
//!
//! ```
//! use shared::error::{ApiResponse, AppError, ErrorCode};
//!
//! let err = AppError::with_message(ErrorCode::VariationOptionExists, "Model \"XL\" already exists")
//!     .with_detail("option_index", 3);
//! assert_eq!(err.http_status().as_u16(), 409);
//!
//! let body: ApiResponse<()> = err.into();
//! assert_eq!(body.code, Some(6103));
//! ```

mod app_error;
mod code;
mod response;

pub use app_error::{AppError, AppResult};
pub use code::{ErrorCategory, ErrorCode, InvalidErrorCode};
pub use response::ApiResponse;
