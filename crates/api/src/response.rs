//! Shared response envelope types for API handlers.
//!
//! Every endpoint answers with the same shape: `{"success": true, "data":
//! ...}` for payloads, `{"success": true, "message": "..."}` for bare
//! confirmations. Use these instead of ad-hoc `serde_json::json!` calls to
//! get compile-time type safety and consistent serialization. The failure
//! counterpart (`success: false`) is produced by `AppError::into_response`.

use serde::Serialize;

/// Standard `{ "success": true, "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Confirmation envelope for operations with no entity payload.
#[derive(Debug, Serialize)]
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
