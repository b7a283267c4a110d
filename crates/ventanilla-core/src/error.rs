//! Error taxonomy for the portal client.
//!
//! Every transport or protocol failure is re-expressed as one of the
//! variants below before it reaches a caller; no raw `reqwest::Error`
//! escapes this crate. Each variant renders a distinct, legible message
//! so invalid credentials are never confused with a server outage.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Request failed with status {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Login reported success but the response carried no token")]
    MissingToken,

    #[error("Invalid response body: {0}")]
    Parse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Fallback when a 401 arrives with no usable body
const DEFAULT_CREDENTIALS_MESSAGE: &str = "user or password is incorrect";

/// Fallback when a 5xx arrives with no usable body
const DEFAULT_SERVER_MESSAGE: &str = "the server reported an internal error";

/// Error bodies on this API are usually `{"mensaje": …}` but some
/// endpoints use the English field name.
#[derive(Debug, Deserialize)]
struct ServerMessage {
    mensaje: Option<String>,
    message: Option<String>,
}

impl Error {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    /// Pull a human-readable message out of an error body: a JSON
    /// `mensaje`/`message` field if present, otherwise the raw text.
    /// Returns `None` for an empty body.
    fn server_message(body: &str) -> Option<String> {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Ok(parsed) = serde_json::from_str::<ServerMessage>(trimmed) {
            if let Some(msg) = parsed.mensaje.or(parsed.message) {
                if !msg.is_empty() {
                    return Some(msg);
                }
            }
        }
        Some(Self::truncate_body(trimmed))
    }

    /// Classify a non-2xx response by status, carrying the best message
    /// the body offers.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = Self::server_message(body);
        match status.as_u16() {
            401 => Error::InvalidCredentials(
                message.unwrap_or_else(|| DEFAULT_CREDENTIALS_MESSAGE.to_string()),
            ),
            500..=599 => Error::ServerError(
                message.unwrap_or_else(|| DEFAULT_SERVER_MESSAGE.to_string()),
            ),
            _ => Error::Http {
                status: status.as_u16(),
                message: message.unwrap_or_else(|| {
                    status.canonical_reason().unwrap_or("unknown status").to_string()
                }),
            },
        }
    }

    /// Classify a transport-level failure. Timeouts get their own
    /// variant; everything else keeps the underlying message for
    /// diagnostics.
    pub fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Error::Timeout(timeout.as_secs())
        } else if err.is_connect() {
            Error::Network(format!("connection failed: {err}"))
        } else {
            Error::Network(err.to_string())
        }
    }
}
