use std::sync::Arc;

use clap::{Parser, Subcommand};
use inquire::Text;

use crate::service::orchestrator::Orchestrator;
use crate::service::session::ChatSession;

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Send one message and print the assistant's reply
    Ask { message: String },
    /// Interactive chat session
    Chat,
}

pub async fn cli(orchestrator: Arc<Orchestrator>, session: Arc<ChatSession>) {
    // Fine to panic here
    let cli = Cli::parse();
    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Ask { message } => {
            let reply = orchestrator.handle_message(&session, &message).await;
            println!("{}", reply);
        }
        Commands::Chat => chat_loop(&orchestrator, &session).await,
    }
}

async fn chat_loop(orchestrator: &Orchestrator, session: &ChatSession) {
    println!("Chat with the calendar assistant. Type 'quit' to leave.");
    loop {
        let line = match Text::new("You:").prompt() {
            Ok(line) => line,
            Err(_) => break,
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
            break;
        }
        let reply = orchestrator.handle_message(session, trimmed).await;
        println!("Assistant: {}\n", reply);
    }
}
