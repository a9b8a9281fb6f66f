//! Typed error handling for the payment service
//!
//! Every operation of the service returns a [`PaymentError`] on failure so
//! callers can match on the specific case instead of inspecting strings.
//!
//! # Error Categories
//!
//! - `Validation`: the payload failed a variant shape check (field missing,
//!   wrong type, out of range)
//! - `UnsupportedVariant`: the `type` value names no known payment variant
//! - `InvalidQuery`: a filter criterion could not be interpreted
//! - `NotFound`: the targeted payment does not exist
//! - `Storage`: the record store failed internally
//!
//! # Example
//!
//! ```rust,ignore
//! match service.get(&id).await {
//!     Ok(payment) => println!("Found: {:?}", payment),
//!     Err(PaymentError::NotFound { id }) => println!("Payment {} not found", id),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// Result alias used across the core
pub type Result<T> = std::result::Result<T, PaymentError>;

/// The error type for payment operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// A field of the payload failed validation
    Validation { field: String, message: String },

    /// The payment type is not one of the known variants
    UnsupportedVariant { variant: String },

    /// A query criterion is unknown or malformed
    InvalidQuery {
        field: String,
        value: String,
        message: String,
    },

    /// No payment exists with the given id
    NotFound { id: String },

    /// The record store failed (lock poisoned, backend unavailable)
    Storage { message: String },
}

impl PaymentError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PaymentError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn unsupported_variant(variant: impl Into<String>) -> Self {
        PaymentError::UnsupportedVariant {
            variant: variant.into(),
        }
    }

    pub fn invalid_query(
        field: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        PaymentError::InvalidQuery {
            field: field.into(),
            value: value.into(),
            message: message.into(),
        }
    }

    pub fn not_found(id: impl fmt::Display) -> Self {
        PaymentError::NotFound { id: id.to_string() }
    }

    pub fn storage(message: impl fmt::Display) -> Self {
        PaymentError::Storage {
            message: message.to_string(),
        }
    }

    /// The offending field, for errors that have one
    pub fn field(&self) -> Option<&str> {
        match self {
            PaymentError::Validation { field, .. } | PaymentError::InvalidQuery { field, .. } => {
                Some(field)
            }
            PaymentError::UnsupportedVariant { .. } => Some("type"),
            PaymentError::NotFound { .. } | PaymentError::Storage { .. } => None,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            PaymentError::Validation { .. }
            | PaymentError::UnsupportedVariant { .. }
            | PaymentError::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
            PaymentError::NotFound { .. } => StatusCode::NOT_FOUND,
            PaymentError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            PaymentError::Validation { .. } => "VALIDATION_ERROR",
            PaymentError::UnsupportedVariant { .. } => "UNSUPPORTED_VARIANT",
            PaymentError::InvalidQuery { .. } => "INVALID_QUERY",
            PaymentError::NotFound { .. } => "PAYMENT_NOT_FOUND",
            PaymentError::Storage { .. } => "STORAGE_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            PaymentError::Validation { field, .. } => Some(serde_json::json!({ "field": field })),
            PaymentError::UnsupportedVariant { variant } => {
                Some(serde_json::json!({ "field": "type", "value": variant }))
            }
            PaymentError::InvalidQuery { field, value, .. } => {
                Some(serde_json::json!({ "field": field, "value": value }))
            }
            PaymentError::NotFound { id } => Some(serde_json::json!({ "id": id })),
            PaymentError::Storage { .. } => None,
        }
    }
}

impl fmt::Display for PaymentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentError::Validation { field, message } => {
                write!(f, "Invalid payment: '{}' {}", field, message)
            }
            PaymentError::UnsupportedVariant { variant } => {
                write!(f, "Unsupported payment type: '{}'", variant)
            }
            PaymentError::InvalidQuery {
                field,
                value,
                message,
            } => {
                write!(f, "Invalid query '{}={}': {}", field, value, message)
            }
            PaymentError::NotFound { id } => {
                write!(f, "Payment with id '{}' was not found", id)
            }
            PaymentError::Storage { message } => write!(f, "Storage error: {}", message),
        }
    }
}

impl std::error::Error for PaymentError {}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Offending field, value or id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        } else {
            tracing::warn!(code = self.error_code(), "{}", self);
        }
        (status, Json(self.to_response())).into_response()
    }
}
