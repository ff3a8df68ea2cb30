use clap::Subcommand;
use careerwise_core::api::ChatRequest;
use careerwise_core::storage::{keys, Message};
use careerwise_core::{ApiClient, ChatTranscriptStore, Config, KeyValueStore};
use serde_json::json;

use crate::common::{open_store, print_json, runtime, CliResult};

#[derive(Subcommand)]
pub enum ChatAction {
    /// Send a message to the career assistant
    Send {
        /// Message text
        message: String,
    },
    /// Show the conversation so far
    History {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Clear the conversation
    Clear,
}

pub fn run(action: ChatAction) -> CliResult {
    let store = open_store()?;
    match action {
        ChatAction::Send { message } => {
            let config = Config::load()?;
            let token = store.get(keys::TOKEN)?;
            let chat = ChatTranscriptStore::new(&store);
            chat.add_message(Message::user(message.as_str()))?;

            if !config.chat.remote_enabled {
                println!("remote chat is disabled; message saved locally");
                return Ok(());
            }

            let mut client = ApiClient::from_config(&config.api)?;
            if let Some(token) = token {
                client = client.with_token(token);
            }
            let conversation = chat.current_conversation()?;
            let reply = runtime()?.block_on(client.send_chat(&ChatRequest {
                message: &message,
                conversation_id: conversation.as_deref(),
            }))?;

            chat.add_message(Message::assistant(reply.message.as_str()).with_metadata(json!({
                "timestamp": reply.timestamp,
                "suggestions": reply.suggestions,
            })))?;
            chat.set_current_conversation(Some(reply.conversation_id))?;

            println!("{}", reply.message);
            if !reply.suggestions.is_empty() {
                println!();
                for suggestion in &reply.suggestions {
                    println!("  - {suggestion}");
                }
            }
        }
        ChatAction::History { json } => {
            let state = ChatTranscriptStore::new(&store).state()?;
            if json {
                return print_json(&state);
            }
            if state.messages.is_empty() {
                println!("No messages yet.");
            }
            for msg in &state.messages {
                println!(
                    "[{}] {}: {}",
                    msg.created_at.format("%Y-%m-%d %H:%M"),
                    msg.sender_type,
                    msg.content
                );
            }
        }
        ChatAction::Clear => {
            let chat = ChatTranscriptStore::new(&store);
            chat.clear_messages()?;
            chat.set_current_conversation(None)?;
            println!("chat cleared");
        }
    }
    Ok(())
}
