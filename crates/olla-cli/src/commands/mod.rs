//! CLI commands.

pub mod ask;
pub mod chat;
pub mod complete;
pub mod inspect;
pub mod models;
pub mod unload;

use olla_client::Client;
use tracing::warn;

/// Server targeted by every command.
pub(crate) struct Server {
    pub host: String,
    pub port: u16,
}

impl Server {
    pub(crate) fn client(&self, model: &str) -> Client {
        Client::with_host(model, self.host.clone(), self.port)
    }
}

/// Unload the client's model, logging rather than failing.
pub(crate) async fn unload(client: &Client) {
    if let Err(e) = client.unload().await {
        warn!("Failed to unload {}: {}", client.model(), e);
    }
}
