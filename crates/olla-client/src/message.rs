//! Conversation messages.

use base64::Engine;
use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Swap user and assistant. System stays as it is.
    pub fn flipped(self) -> Self {
        match self {
            Role::User => Role::Assistant,
            Role::Assistant => Role::User,
            Role::System => Role::System,
        }
    }
}

/// A message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            images: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Attach images. An empty slice leaves `images` unset.
    pub fn with_images(mut self, images: &[Image]) -> Self {
        self.images = encode_images(images);
        self
    }
}

/// An image attached to a request.
///
/// Raw bytes are base64-encoded on the way out; text is assumed to already be
/// base64 and is sent unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Image {
    Encoded(String),
    Bytes(Vec<u8>),
}

impl Image {
    pub fn encode(&self) -> String {
        match self {
            Image::Encoded(text) => text.clone(),
            Image::Bytes(bytes) => base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }
}

impl From<Vec<u8>> for Image {
    fn from(bytes: Vec<u8>) -> Self {
        Image::Bytes(bytes)
    }
}

impl From<&[u8]> for Image {
    fn from(bytes: &[u8]) -> Self {
        Image::Bytes(bytes.to_vec())
    }
}

impl From<String> for Image {
    fn from(text: String) -> Self {
        Image::Encoded(text)
    }
}

impl From<&str> for Image {
    fn from(text: &str) -> Self {
        Image::Encoded(text.to_string())
    }
}

pub(crate) fn encode_images(images: &[Image]) -> Option<Vec<String>> {
    if images.is_empty() {
        None
    } else {
        Some(images.iter().map(Image::encode).collect())
    }
}
