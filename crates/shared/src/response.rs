//! The response envelope returned by every boundary operation.
//!
//! All responses are `{"success": true, "data": ...}` or
//! `{"success": false, "error": {"code": ..., "message": ...}}`. The
//! `code` field is machine-readable and stable; `message` is for humans.

use serde::{Deserialize, Serialize};

/// Machine-readable error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Stable error code (e.g. `INVALID_TRANSITION`).
    pub code: String,
    /// Human-readable description.
    pub message: String,
}

/// Response envelope wrapping either data or an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Payload on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error body on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl<T> ApiResponse<T> {
    /// Wraps a successful payload.
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Wraps an error code and message.
    #[must_use]
    pub fn err(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}
