//! Shared response envelope for API handlers.
//!
//! Every success response carries the same `{status, message, data}`
//! envelope; use [`ApiResponse`] instead of ad-hoc `serde_json::json!`
//! to get compile-time type safety and consistent serialization.

use axum::http::StatusCode;
use serde::Serialize;

/// Standard `{status, message, data}` success envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// HTTP status code, mirrored into the body.
    pub status: u16,
    /// Human-readable outcome description.
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            data,
        }
    }
}
