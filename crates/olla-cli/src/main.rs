//! Olla CLI - small command-line tools on top of a local Ollama server.

use clap::{Parser, Subcommand};
use olla_client::ClientConfig;
use std::path::PathBuf;

mod commands;

use commands::Server;

/// Olla - talk to a local Ollama server
#[derive(Parser)]
#[command(name = "olla")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (logs request payloads)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Server host (default: $OLLA_HOST or localhost)
    #[arg(long, global = true)]
    host: Option<String>,

    /// Server port (default: $OLLA_PORT or 11434)
    #[arg(long, global = true)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send one message, print the reply and exit
    Ask {
        /// Message to send
        message: String,
        /// Model to use (default: $OLLA_MODEL or llama3.1)
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Hold a conversation with a model
    Chat {
        /// Model name or part of one (default: $OLLA_MODEL or llama3.1)
        model: Option<String>,
    },

    /// Fill in the middle of a code snippet
    Complete {
        /// Model to use; it must support suffix completion
        #[arg(short, long, default_value = commands::complete::DEFAULT_MODEL)]
        model: String,
    },

    /// Ask a vision model about an image
    Inspect {
        /// Image file
        image: PathBuf,
        /// Question about the image
        #[arg(default_value = commands::inspect::DEFAULT_QUERY)]
        message: String,
        /// Model to use
        #[arg(short, long, default_value = commands::inspect::DEFAULT_MODEL)]
        model: String,
    },

    /// Unload every model the server has loaded
    Unload,

    /// List the models available on the server
    Models,
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "warn" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let ClientConfig {
        host,
        port,
        model: default_model,
    } = ClientConfig::from_env();
    let server = Server {
        host: cli.host.unwrap_or(host),
        port: cli.port.unwrap_or(port),
    };

    let command = cli.command;

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| miette::miette!("Failed to start async runtime: {}", e))?;

    runtime.block_on(async move {
        match command {
            Commands::Ask { message, model } => {
                commands::ask::run(&server, &message, &model.unwrap_or(default_model)).await
            }
            Commands::Chat { model } => {
                commands::chat::run(&server, &model.unwrap_or(default_model)).await
            }
            Commands::Complete { model } => commands::complete::run(&server, &model).await,
            Commands::Inspect {
                image,
                message,
                model,
            } => commands::inspect::run(&server, &image, &message, &model).await,
            Commands::Unload => commands::unload::run(&server).await,
            Commands::Models => commands::models::run(&server).await,
        }
    })
}
