//! Shared error handling for the HTTP client.
//!
//! Non-2xx responses are converted into [`ApiError`], which preserves the
//! HTTP status and the server's message body so callers can distinguish
//! auth failures from server faults without string matching.

use std::fmt;

use crate::error::BantayError;

/// API error carrying the HTTP status and server message.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code, if the failure happened after a response arrived.
    pub status: Option<reqwest::StatusCode>,
    /// Server-provided message, or a synthesized one.
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn with_status(message: impl Into<String>, status: reqwest::StatusCode) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Build from a non-success response, extracting the server message.
    ///
    /// The backend reports errors as `{"message": "..."}`; a plain-text or
    /// empty body falls back to the raw text / status line.
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    format!("HTTP {status}")
                } else {
                    body.trim().to_string()
                }
            });

        Self::with_status(message, status)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<ApiError> for BantayError {
    fn from(err: ApiError) -> Self {
        // 401/403 surface as auth failures; they block the action rather
        // than produce a dismissible transport alert.
        if let Some(status) = err.status
            && (status == reqwest::StatusCode::UNAUTHORIZED
                || status == reqwest::StatusCode::FORBIDDEN)
        {
            return BantayError::Auth(err.message);
        }

        BantayError::Api {
            status: err.status.map(|s| s.as_u16()),
            message: err.message,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            status: err.status(),
            message: err.to_string(),
        }
    }
}
