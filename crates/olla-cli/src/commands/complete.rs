//! Complete command - fill-in-the-middle demo.
//!
//! Many code models (Codestral, Codellama) do not accept a suffix out of the
//! box and will answer with an error here.

use olla_client::DEFAULT_TEMPERATURE;

use super::Server;

pub(crate) const DEFAULT_MODEL: &str = "deepseek-coder-v2:latest";

const BEFORE: &str = "# python 3 logging function\n# print and save the string to the specified file\ndef logToFile(filename, str):";
const AFTER: &str = "\tf.close()";

pub(crate) async fn run(server: &Server, model: &str) -> miette::Result<()> {
    let client = server.client(model);
    let reply = client.complete(BEFORE, AFTER, DEFAULT_TEMPERATURE).await;
    super::unload(&client).await;

    let reply = reply.map_err(|e| miette::miette!("{}", e))?;
    println!("{}", render(&reply.message));

    Ok(())
}

fn render(middle: &str) -> String {
    format!("{} {} {}", BEFORE, middle, AFTER)
}
