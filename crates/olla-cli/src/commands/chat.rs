//! Chat command - interactive conversation with in-band `/commands`.

use olla_client::{Client, Message, OllamaError, Reply, DEFAULT_TEMPERATURE};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::Server;

/// What the user typed on one line.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Empty,
    Text(&'a str),
    Command(ChatCommand<'a>),
}

#[derive(Debug, PartialEq, Eq)]
enum ChatCommand<'a> {
    /// End the session.
    Quit,
    /// Forget the conversation.
    Clear,
    /// Swap who said what, then have the model answer its own last reply.
    Flip,
    /// Drop the last exchange and send the same user message again.
    Retry,
    /// Drop the last exchange.
    Undo,
    Unknown(&'a str),
}

/// What the loop should do after a command.
#[derive(Debug, PartialEq, Eq)]
enum Next {
    Prompt,
    Send(String),
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
struct Outcome {
    notice: Option<String>,
    next: Next,
}

impl Outcome {
    fn prompt(notice: impl Into<String>) -> Self {
        Self {
            notice: Some(notice.into()),
            next: Next::Prompt,
        }
    }
}

fn parse_input(line: &str) -> Input<'_> {
    if line.is_empty() {
        return Input::Empty;
    }

    let Some(cmd) = line.strip_prefix('/') else {
        return Input::Text(line);
    };

    Input::Command(match cmd {
        "quit" => ChatCommand::Quit,
        "clear" => ChatCommand::Clear,
        "flip" => ChatCommand::Flip,
        "retry" => ChatCommand::Retry,
        "undo" => ChatCommand::Undo,
        other => ChatCommand::Unknown(other),
    })
}

fn apply(client: &mut Client, command: ChatCommand<'_>) -> Outcome {
    match command {
        ChatCommand::Quit => Outcome {
            notice: None,
            next: Next::Quit,
        },
        ChatCommand::Clear => {
            client.clear();
            Outcome::prompt("= Context cleared...")
        }
        ChatCommand::Flip => match client.pop() {
            None => Outcome::prompt("= Cannot flip an empty chat..."),
            Some(last) => {
                client.flip();
                Outcome {
                    notice: Some("= Context flipped - LLM will now generate a reply...".into()),
                    next: Next::Send(last.content),
                }
            }
        },
        ChatCommand::Retry => {
            let Some(reply) = client.pop() else {
                return Outcome::prompt("= Cannot retry with an empty chat, ignoring command...");
            };
            match client.pop() {
                Some(query) => Outcome {
                    notice: None,
                    next: Next::Send(query.content),
                },
                None => {
                    client.push(reply);
                    Outcome::prompt("= Cannot retry with only one message, ignoring command...")
                }
            }
        }
        ChatCommand::Undo => {
            let Some(reply) = client.pop() else {
                return Outcome::prompt("= Cannot undo with an empty chat, ignoring command...");
            };
            if client.pop().is_none() {
                client.push(reply);
                return Outcome::prompt("= Cannot undo with only one message...\n= Stepped back");
            }
            Outcome::prompt("= Stepped back")
        }
        ChatCommand::Unknown(cmd) => Outcome::prompt(format!("= Unknown command '{}'", cmd)),
    }
}

pub(crate) async fn run(server: &Server, model: &str) -> miette::Result<()> {
    let Some(model_name) = olla_client::search_models(model, &server.host, server.port).await
    else {
        let models = olla_client::list_models(&server.host, server.port).await;
        eprintln!("No model named '{}' is available!", model);
        eprintln!("The available models are:\n\t{}", models.join("\n\t"));
        return Ok(());
    };

    let mut client = server.client(&model_name);
    let result = converse(&mut client).await;

    println!("\n= Ending chat...");
    if client.is_loaded().await {
        super::unload(&client).await;
    }

    result
}

async fn converse(client: &mut Client) -> miette::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{} >> ", client.depth() + 1);
        std::io::stdout()
            .flush()
            .map_err(|e| miette::miette!("Failed to write prompt: {}", e))?;

        let line = tokio::select! {
            line = lines.next_line() => line
                .map_err(|e| miette::miette!("Failed to read input: {}", e))?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            return Ok(());
        };

        let before = client.messages().to_vec();
        let query = match parse_input(&line) {
            Input::Empty => continue,
            Input::Text(text) => text.to_string(),
            Input::Command(command) => {
                let outcome = apply(client, command);
                if let Some(notice) = outcome.notice {
                    println!("{}", notice);
                }
                match outcome.next {
                    Next::Prompt => continue,
                    Next::Send(query) => query,
                    Next::Quit => return Ok(()),
                }
            }
        };

        let reply = tokio::select! {
            reply = send_turn(client, &query, before) => reply,
            _ = tokio::signal::ctrl_c() => return Ok(()),
        };

        match reply {
            Ok(reply) => println!("\n{} << {}\n", client.depth(), reply.message),
            Err(e) => eprintln!("= {}", e),
        }
    }
}

/// Send one turn. If it fails, the conversation goes back to `before`, which
/// also undoes whatever `/flip` or `/retry` removed or swapped.
async fn send_turn(
    client: &mut Client,
    query: &str,
    before: Vec<Message>,
) -> Result<Reply, OllamaError> {
    let result = client.chat(query, &[], DEFAULT_TEMPERATURE).await;
    if result.is_err() {
        client.clear();
        for message in before {
            client.push(message);
        }
    }
    result
}
