//! Ollama API client with conversation history.

use tracing::{debug, error};

use crate::api::{self, ChatRequest, GenerateRequest, KeepAlive, Options, PsResponse};
use crate::config::ClientConfig;
use crate::error::OllamaError;
use crate::message::{encode_images, Image, Message};
use crate::reply::Reply;
use crate::SYSTEM_PROMPT;

/// Client for one model on one Ollama server.
///
/// Owns the conversation used by [`Client::chat`]. One-shot calls
/// ([`Client::ask`], [`Client::complete`]) never touch it.
pub struct Client {
    http: reqwest::Client,
    config: ClientConfig,
    messages: Vec<Message>,
}

impl Client {
    /// Create a client for `model` on the default host and port.
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_config(ClientConfig::builder().model(model).build())
    }

    /// Create a client for `model` on a specific server.
    pub fn with_host(model: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self::with_config(
            ClientConfig::builder()
                .model(model)
                .host(host)
                .port(port)
                .build(),
        )
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            messages: Vec::new(),
        }
    }

    /// Get the model name.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn host(&self) -> &str {
        &self.config.host
    }

    pub fn port(&self) -> u16 {
        self.config.port
    }

    /// Get the base URL.
    pub fn base_url(&self) -> String {
        self.config.base_url()
    }

    /// The conversation so far, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Ask the server to load the model and keep it resident for
    /// `keep_alive` (e.g. `"5m"`). Optional; generation loads on demand.
    pub async fn load(&self, keep_alive: &str) -> Result<(), OllamaError> {
        let request = GenerateRequest {
            model: self.config.model.clone(),
            keep_alive: Some(KeepAlive::Duration(keep_alive.to_string())),
            ..Default::default()
        };
        api::post_ignore(&self.http, &self.url("/api/generate"), &request).await
    }

    /// Ask the server to unload the model now.
    pub async fn unload(&self) -> Result<(), OllamaError> {
        unload_model(&self.http, &self.base_url(), &self.config.model).await
    }

    /// Whether the server currently has this model loaded.
    ///
    /// Any failure counts as "not loaded".
    pub async fn is_loaded(&self) -> bool {
        match api::get_json::<PsResponse>(&self.http, &self.url("/api/ps")).await {
            Ok(ps) => ps.models.iter().any(|m| m.name == self.config.model),
            Err(e) => {
                error!("{}", e);
                false
            }
        }
    }

    /// One-shot completion. Does not read or write the conversation.
    pub async fn ask(
        &self,
        query: &str,
        images: &[Image],
        temperature: f32,
    ) -> Result<Reply, OllamaError> {
        let request = GenerateRequest {
            model: self.config.model.clone(),
            prompt: Some(query.to_string()),
            stream: Some(false),
            options: Some(Options { temperature }),
            images: encode_images(images),
            ..Default::default()
        };

        let value = api::post_json(&self.http, &self.url("/api/generate"), &request).await?;
        Reply::from_value(value)
    }

    /// Completion with the whole conversation as context.
    ///
    /// On success the query and the reply are appended to the conversation.
    /// On failure the conversation is left exactly as it was.
    pub async fn chat(
        &mut self,
        query: &str,
        images: &[Image],
        temperature: f32,
    ) -> Result<Reply, OllamaError> {
        let system = Message::system(SYSTEM_PROMPT);
        let user = Message::user(query).with_images(images);

        let mut messages = Vec::with_capacity(self.messages.len() + 2);
        messages.push(&system);
        messages.extend(self.messages.iter());
        messages.push(&user);

        let request = ChatRequest {
            model: &self.config.model,
            messages,
            stream: false,
            options: Options { temperature },
        };

        let value = api::post_json(&self.http, &self.url("/api/chat"), &request).await?;
        let reply = Reply::from_value(value)?;

        debug!("Chat depth {} -> {}", self.depth(), self.depth() + 2);
        self.push(Message::user(query));
        self.push(Message::assistant(reply.message.clone()));

        Ok(reply)
    }

    /// Fill in the text between `before` and `after`.
    ///
    /// Unlike [`Client::ask`], a failure carries the server's own error text.
    pub async fn complete(
        &self,
        before: &str,
        after: &str,
        temperature: f32,
    ) -> Result<Reply, OllamaError> {
        let request = GenerateRequest {
            model: self.config.model.clone(),
            prompt: Some(before.to_string()),
            suffix: Some(after.to_string()),
            stream: Some(false),
            options: Some(Options { temperature }),
            ..Default::default()
        };

        let value =
            api::post_json_server_error(&self.http, &self.url("/api/generate"), &request).await?;
        Reply::from_value(value)
    }

    /// Append a message to the end of the conversation.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Remove and return the last message, if any.
    pub fn pop(&mut self) -> Option<Message> {
        self.messages.pop()
    }

    /// Number of messages in the conversation.
    pub fn depth(&self) -> usize {
        self.messages.len()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Swap user and assistant on every message, so the model ends up
    /// answering its own words.
    pub fn flip(&mut self) {
        for message in &mut self.messages {
            message.role = message.role.flipped();
        }
    }
}

/// Send a `keep_alive: 0` hint for `model`.
pub(crate) async fn unload_model(
    http: &reqwest::Client,
    base_url: &str,
    model: &str,
) -> Result<(), OllamaError> {
    let request = GenerateRequest {
        model: model.to_string(),
        keep_alive: Some(KeepAlive::Seconds(0)),
        ..Default::default()
    };
    api::post_ignore(http, &format!("{}/api/generate", base_url), &request).await
}
