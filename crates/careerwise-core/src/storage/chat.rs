//! Persisted chat transcript.
//!
//! The whole transcript is stored as one JSON document under the
//! `chat-storage` key, so a restart resumes the same conversation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::kv::{keys, KeyValueStore};
use crate::error::StoreError;

/// Who sent a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenderType {
    User,
    Assistant,
}

impl std::fmt::Display for SenderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// One chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub sender_type: SenderType,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl Message {
    pub fn new(sender_type: SenderType, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            sender_type,
            created_at: Utc::now(),
            metadata: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(SenderType::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(SenderType::Assistant, content)
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Stored transcript plus the active backend conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatState {
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub current_conversation_id: Option<String>,
}

/// Append-mostly transcript persistence.
#[derive(Debug)]
pub struct ChatTranscriptStore<S> {
    store: S,
}

impl<S: KeyValueStore> ChatTranscriptStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn state(&self) -> Result<ChatState, StoreError> {
        Ok(self.store.get_json(keys::CHAT)?.unwrap_or_default())
    }

    fn save(&self, state: &ChatState) -> Result<(), StoreError> {
        self.store.set_json(keys::CHAT, state)
    }

    /// Append one message, preserving order.
    pub fn add_message(&self, message: Message) -> Result<(), StoreError> {
        let mut state = self.state()?;
        state.messages.push(message);
        self.save(&state)
    }

    /// Replace the transcript wholesale.
    pub fn set_messages(&self, messages: Vec<Message>) -> Result<(), StoreError> {
        let mut state = self.state()?;
        state.messages = messages;
        self.save(&state)
    }

    pub fn messages(&self) -> Result<Vec<Message>, StoreError> {
        Ok(self.state()?.messages)
    }

    pub fn set_current_conversation(&self, id: Option<String>) -> Result<(), StoreError> {
        let mut state = self.state()?;
        state.current_conversation_id = id;
        self.save(&state)
    }

    pub fn current_conversation(&self) -> Result<Option<String>, StoreError> {
        Ok(self.state()?.current_conversation_id)
    }

    /// Drop all messages. The active conversation id is kept.
    pub fn clear_messages(&self) -> Result<(), StoreError> {
        self.set_messages(Vec::new())
    }
}
