//! Normalized view of one server response.

use serde_json::Value;
use tracing::warn;

use crate::error::OllamaError;

/// A reply from the server.
///
/// Both `/api/generate` and `/api/chat` responses are folded into the same
/// shape: the generated text, the total duration in nanoseconds, and the raw
/// JSON for anything else a caller might want.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub message: String,
    pub duration: u64,
    pub raw: Value,
}

impl Reply {
    /// Build a reply from a decoded response body.
    ///
    /// A `response` field marks a completion; otherwise the text is read from
    /// `message.content`. A missing `total_duration` is logged and stored as 0.
    pub fn from_value(raw: Value) -> Result<Self, OllamaError> {
        let message = match raw.get("response") {
            Some(response) => response.as_str(),
            None => raw
                .get("message")
                .and_then(|m| m.get("content"))
                .and_then(Value::as_str),
        }
        .ok_or_else(|| OllamaError::MalformedReply(raw.to_string()))?
        .to_string();

        let duration = match raw.get("total_duration").and_then(Value::as_u64) {
            Some(duration) => duration,
            None => {
                warn!("Reply did not contain a duration value: {}", raw);
                0
            }
        };

        Ok(Self {
            message,
            duration,
            raw,
        })
    }

    /// The message with surrounding whitespace removed, and optionally one
    /// trailing period.
    pub fn stripped(&self, remove_dot: bool) -> &str {
        let text = self.message.trim();
        if remove_dot {
            text.strip_suffix('.').unwrap_or(text)
        } else {
            text
        }
    }
}
