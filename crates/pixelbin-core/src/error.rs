//! Errors returned by the platform API client.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::signature::SignError;
use crate::url_codec::UrlError;

const DEFAULT_MESSAGE: &str = "Something went wrong [sdk]";

/// Error payload returned by the platform, or synthesized by the SDK when the
/// response could not be understood.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiError {
    /// User-facing message.
    pub message: String,
    /// HTTP status of the response.
    pub status: u16,
    /// Unique error code.
    pub code: String,
    /// Short technical title.
    pub exception: String,
    /// Link to further diagnostics.
    pub info: String,
    #[serde(rename = "request_id", skip_serializing_if = "String::is_empty")]
    pub request_id: String,
    #[serde(rename = "stack_trace", skip_serializing_if = "String::is_empty")]
    pub stack_trace: String,
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    pub meta: serde_json::Map<String, serde_json::Value>,
}

impl Default for ApiError {
    fn default() -> Self {
        Self::new("")
    }
}

impl ApiError {
    /// New error with status 500; an empty message becomes a generic one.
    pub fn new(message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.is_empty() {
            message = DEFAULT_MESSAGE.to_string();
        }
        Self {
            message,
            status: 500,
            code: String::new(),
            exception: String::new(),
            info: String::new(),
            request_id: String::new(),
            stack_trace: String::new(),
            meta: serde_json::Map::new(),
        }
    }

    /// Sets the HTTP status; values outside 200..=600 are ignored.
    pub fn with_status(mut self, status: u16) -> Self {
        if (200..=600).contains(&status) {
            self.status = status;
        }
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

/// Any failure of an SDK call.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Api(ApiError),
    #[error("http transport: {0}")]
    Transport(#[from] curl::Error),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Sign(#[from] SignError),
    #[error(transparent)]
    Url(#[from] UrlError),
}

impl From<ApiError> for Error {
    fn from(e: ApiError) -> Self {
        Error::Api(e)
    }
}

impl Error {
    /// HTTP status when the platform answered with an error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(e) => Some(e.status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_gets_default() {
        let e = ApiError::new("");
        assert_eq!(e.message, DEFAULT_MESSAGE);
        assert_eq!(e.status, 500);
    }

    #[test]
    fn status_outside_range_is_ignored() {
        assert_eq!(ApiError::new("x").with_status(404).status, 404);
        assert_eq!(ApiError::new("x").with_status(199).status, 500);
        assert_eq!(ApiError::new("x").with_status(601).status, 500);
    }

    #[test]
    fn deserializes_partial_payload() {
        let e: ApiError = serde_json::from_str(
            r#"{"message":"File not found","status":404,"request_id":"abc","extra":1}"#,
        )
        .unwrap();
        assert_eq!(e.message, "File not found");
        assert_eq!(e.status, 404);
        assert_eq!(e.request_id, "abc");
        assert!(e.code.is_empty());
        assert_eq!(e.to_string(), "File not found");
    }

    #[test]
    fn error_status() {
        let e = Error::from(ApiError::new("nope").with_status(403));
        assert_eq!(e.status(), Some(403));
        assert_eq!(e.to_string(), "nope");
    }
}
