/// Success response envelope
///
/// Every successful handler wraps its payload in the same shape:
/// `{ "success": true, "message": "...", "data": ... }`. Message-only
/// responses omit the `data` field entirely.

use serde::Serialize;

/// Standard success envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Always true on success paths
    pub success: bool,

    /// Human-readable outcome message
    pub message: String,

    /// Response payload, omitted when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wraps a payload with an outcome message
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Message-only response, no `data` field in the JSON
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}
