//! Error types for the catalog client.
//!
//! # Design
//! `NotFound` keeps a dedicated variant so callers can tell a missing
//! resource from an unexpected status. Every other non-2xx response lands in
//! `HttpError` with the raw status and body. The host reports network
//! failures as `Transport`.

use thiserror::Error;

/// Errors produced while building or parsing catalog requests.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request never produced a response (DNS, connect, read failure).
    #[error("transport error: {0}")]
    Transport(String),

    /// Page and limit must both be at least 1.
    #[error("invalid page request: page {page}, limit {limit}")]
    InvalidPageRequest { page: u32, limit: u32 },
}

/// Human-readable message for an error, suitable for showing in the view.
///
/// Servers commonly answer failures with `{"message": "..."}`; when an
/// `HttpError` body has that shape the server's message wins.
pub fn error_message(err: &ApiError) -> String {
    if let ApiError::HttpError { body, .. } = err {
        if let Some(message) = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .as_ref()
            .and_then(|v| v.get("message"))
            .and_then(|m| m.as_str())
        {
            return message.to_string();
        }
    }
    err.to_string()
}
