//! # Olla Client
//!
//! A small client for a local Ollama server.
//!
//! ```text
//! ┌──────────────┐  /api/generate  ┌─────────────────┐
//! │    Client    │ --------------> │                 │
//! │  (history)   │  /api/chat      │  Ollama server  │
//! └──────────────┘ --------------> │                 │
//!        │                         └─────────────────┘
//!        v                           ^  /api/tags
//! ┌──────────────┐                   |  /api/ps
//! │    Reply     │           list_models / search_models / unload_all
//! └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use olla_client::{Client, DEFAULT_TEMPERATURE};
//!
//! let mut client = Client::new("llama3.1");
//! let reply = client.chat("Hello!", &[], DEFAULT_TEMPERATURE).await?;
//! println!("{}", reply.stripped(false));
//! ```

mod api;
mod client;
mod config;
mod directory;
mod error;
mod message;
mod reply;

#[cfg(test)]
mod test_server;

pub use client::Client;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use directory::{best_match, list_models, search_models, unload_all};
pub use error::OllamaError;
pub use message::{Image, Message, Role};
pub use reply::Reply;

/// Default Ollama host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default Ollama port.
pub const DEFAULT_PORT: u16 = 11434;

/// Default model.
pub const DEFAULT_MODEL: &str = "llama3.1";

/// Default keep-alive for [`Client::load`].
pub const DEFAULT_KEEP_ALIVE: &str = "5m";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// System message placed ahead of every chat conversation.
pub const SYSTEM_PROMPT: &str = "Reply to the following message from the user.";
