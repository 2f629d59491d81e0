pub mod chat;
pub mod transcript;

use serde::Serialize;

/// Error payload shape shared by both endpoints: `{ "detail": "..." }`
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
