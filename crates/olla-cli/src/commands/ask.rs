//! Ask command - one message, one reply.

use olla_client::DEFAULT_TEMPERATURE;

use super::Server;

pub(crate) async fn run(server: &Server, message: &str, model: &str) -> miette::Result<()> {
    let client = server.client(model);
    let reply = client.ask(message, &[], DEFAULT_TEMPERATURE).await;
    super::unload(&client).await;

    let reply = reply.map_err(|e| miette::miette!("Ask failed: {}", e))?;
    println!("{}", reply.message);

    Ok(())
}
