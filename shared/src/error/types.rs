//! Error types and API response structures

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the error shape the reservation service returns and the one the
/// board surfaces to the user:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details (field-level errors, context)
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details, keyed by field name
    pub details: Option<BTreeMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Flatten `details` into `(field, message)` pairs
    ///
    /// Array values yield one pair per element, nested objects are rendered
    /// as compact JSON, strings are used verbatim.
    pub fn field_errors(&self) -> Vec<(String, String)> {
        let Some(details) = &self.details else {
            return Vec::new();
        };

        let mut out = Vec::new();
        for (field, value) in details {
            match value {
                Value::Array(items) => {
                    for item in items {
                        out.push((field.clone(), value_text(item)));
                    }
                }
                other => out.push((field.clone(), value_text(other))),
            }
        }
        out
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a permission denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::NetworkError, msg)
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ConfigError, msg)
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Unified API response structure
///
/// The reservation service answers every call with this envelope:
/// - `code`: Error code (0 for success)
/// - `message`: Human-readable message
/// - `data`: Response payload (on success)
/// - `details`: Additional error details (on failure)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Error code (0 for success, non-zero for errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Additional error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    /// Whether the envelope reports success (missing code counts as success)
    pub fn is_success(&self) -> bool {
        match self.code {
            None => true,
            Some(c) => ErrorCode::try_from(c).is_ok_and(|code| code.is_success()),
        }
    }

    /// Split the envelope into data or a structured error
    ///
    /// Unknown numeric codes map to [`ErrorCode::Unknown`]; the original
    /// message and details are kept either way.
    pub fn into_result(self) -> Result<Option<T>, AppError> {
        if self.is_success() {
            return Ok(self.data);
        }

        let code = self
            .code
            .and_then(|c| ErrorCode::try_from(c).ok())
            .unwrap_or(ErrorCode::Unknown);
        let message = if self.message.is_empty() {
            code.message().to_string()
        } else {
            self.message
        };
        Err(AppError {
            code,
            message,
            details: self.details,
        })
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
