//! Unload command - free every model on the server.

use super::Server;

pub(crate) async fn run(server: &Server) -> miette::Result<()> {
    olla_client::unload_all(&server.host, server.port).await;
    Ok(())
}
