//! Data Transfer Objects for API requests and responses.
//!
//! Request DTOs derive `Deserialize` and `Validate`; text fields default to
//! empty so a missing field surfaces as a 400 validation error rather than a
//! JSON rejection. Response DTOs never carry password or token hashes.
//!
//! Every successful body is wrapped in [`ApiResponse`]:
//!
//! ```json
//! { "message": "Product created successfully", "data": { "id": 7 } }
//! ```

pub mod auth;
pub mod health;
pub mod listing;
pub mod message;
pub mod seller;
pub mod user;

use serde::Serialize;

/// Success envelope shared by all endpoints.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Envelope with a message and no `data` field.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }
}

/// Maps blank strings to `None` after trimming.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
