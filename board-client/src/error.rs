//! Client error types

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failed (connect, timeout, TLS...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a structured error
    #[error("{0}")]
    Api(AppError),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Collapse into the error shape shown to users
    pub fn to_app_error(&self) -> AppError {
        match self {
            Self::Api(err) => err.clone(),
            Self::Http(e) if e.is_timeout() => {
                AppError::with_message(ErrorCode::TimeoutError, e.to_string())
            }
            Self::Http(e) => AppError::network(e.to_string()),
            Self::InvalidResponse(msg) => AppError::with_message(ErrorCode::InvalidFormat, msg),
            Self::Serialization(e) => AppError::with_message(ErrorCode::InvalidFormat, e.to_string()),
        }
    }
}

impl From<AppError> for ClientError {
    fn from(err: AppError) -> Self {
        Self::Api(err)
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Api(e) => e,
            other => other.to_app_error(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
