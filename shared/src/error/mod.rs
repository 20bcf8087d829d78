//! Unified error system for the reservation board
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Response envelope used by the reservation service
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Reservation errors
//! - 7xxx: Table / floor errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::ReservationNotFound);
//! assert_eq!(err.message, "Reservation not found");
//!
//! let raw = r#"{"code":2,"message":"Invalid reservation","details":{"email":"must be a valid address"}}"#;
//! let response: ApiResponse<()> = serde_json::from_str(raw).unwrap();
//! let err = response.into_result().unwrap_err();
//! assert_eq!(err.code, ErrorCode::ValidationFailed);
//! ```

mod codes;
mod http;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
