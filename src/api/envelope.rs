//! Uniform response wrapper.

use serde::Serialize;

/// Success code.
pub const CODE_OK: i32 = 0;

/// Failure code.
pub const CODE_FAILED: i32 = -1;

/// Envelope wraps every API response as `{ code, msg?, data? }`.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Success carrying `data` only.
    pub fn ok(data: T) -> Self {
        Self {
            code: CODE_OK,
            msg: None,
            data: Some(data),
        }
    }

    /// Success carrying a message and `data`.
    pub fn ok_with(msg: impl Into<String>, data: T) -> Self {
        Self {
            code: CODE_OK,
            msg: Some(msg.into()),
            data: Some(data),
        }
    }

    /// Success carrying a message only.
    pub fn message(msg: impl Into<String>) -> Self {
        Self {
            code: CODE_OK,
            msg: Some(msg.into()),
            data: None,
        }
    }

    /// Failure with a message.
    pub fn failure(msg: impl Into<String>) -> Self {
        Self {
            code: CODE_FAILED,
            msg: Some(msg.into()),
            data: None,
        }
    }
}
