//! Client configuration.

use crate::{DEFAULT_HOST, DEFAULT_MODEL, DEFAULT_PORT};

/// Connection target for a [`Client`](crate::Client).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server host name or address
    pub host: String,
    /// Server port (default: 11434)
    pub port: u16,
    /// Model name, optionally with a `:tag`
    pub model: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("OLLA_HOST")
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = lookup("OLLA_PORT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let model = lookup("OLLA_MODEL")
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Self { host, port, model }
    }

    /// Base URL of the server, e.g. `http://localhost:11434`.
    pub fn base_url(&self) -> String {
        base_url(&self.host, self.port)
    }

    /// Create a builder for configuration.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

pub(crate) fn base_url(host: &str, port: u16) -> String {
    format!("http://{}:{}", host, port)
}

/// Builder for client configuration.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}
