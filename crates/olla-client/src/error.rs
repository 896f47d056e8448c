//! Error types for Ollama client operations.

use thiserror::Error;

/// Errors that can occur while talking to an Ollama server.
#[derive(Debug, Error)]
pub enum OllamaError {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server answered with a non-success status.
    #[error("{reason}")]
    Status { status: u16, reason: String },

    /// Server answered with a non-success status and an `error` body.
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    /// Response JSON had neither a `response` nor a `message.content` field.
    #[error("malformed reply: {0}")]
    MalformedReply(String),
}

impl OllamaError {
    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            OllamaError::Status { status, .. } | OllamaError::Server { status, .. } => {
                Some(*status)
            }
            OllamaError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
