//! Models command - list what the server can run.

use super::Server;

pub(crate) async fn run(server: &Server) -> miette::Result<()> {
    let models = olla_client::list_models(&server.host, server.port).await;

    if models.is_empty() {
        println!("No models available.");
        return Ok(());
    }

    for model in models {
        println!("{}", model);
    }

    Ok(())
}
