use std::collections::BTreeMap;

use poem::http::StatusCode;
use poem_openapi::{Object, payload::Json};
use serde_json::Value;

pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const CONFLICT: &str = "CONFLICT";
pub const BAD_REQUEST: &str = "BAD_REQUEST";
pub const INTERNAL: &str = "INTERNAL";
pub const TIMEOUT: &str = "TIMEOUT";

#[derive(Object, Debug, Clone, PartialEq)]
pub struct ErrorDetail {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable description
    pub message: String,
    /// Per-field violations, present for validation failures
    #[oai(skip_serializing_if_is_none)]
    pub details: Option<BTreeMap<String, String>>,
}

/// Failure envelope: `{ "success": false, "data": null, "error": { ... } }`
#[derive(Object, Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    pub success: bool,
    /// Always null on failure
    pub data: Option<Value>,
    pub error: ErrorDetail,
}

impl ErrorResponse {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: ErrorDetail {
                code: code.to_string(),
                message: message.into(),
                details: None,
            },
        }
    }

    pub fn with_details(mut self, details: BTreeMap<String, String>) -> Self {
        self.error.details = Some(details);
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(BAD_REQUEST, message)
    }

    pub fn internal() -> Self {
        Self::new(INTERNAL, "An unexpected error occurred")
    }
}

/// Message-only success envelope for operations without a payload.
#[derive(Object, Debug, Clone, PartialEq)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

pub trait IntoErrorResponse {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>);
}
