use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::api::ChatRequest;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One turn of a conversation as it travels over the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// A message shown in the chat widget. `text` grows while a reply streams in.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub text: String,
    pub role: Role,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            role,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered message list owned by the widget. Insertion order is display order.
#[derive(Clone, Debug, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    greeting_id: Option<Uuid>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a conversation with a local greeting that is displayed but never
    /// sent to the server.
    pub fn with_greeting(text: &str) -> Self {
        let greeting = ChatMessage::new(Role::Assistant, text);
        Self {
            greeting_id: Some(greeting.id),
            messages: vec![greeting],
        }
    }

    pub fn from_turns(turns: &[ChatTurn]) -> Self {
        Self {
            messages: turns
                .iter()
                .map(|t| ChatMessage::new(t.role, t.content.clone()))
                .collect(),
            greeting_id: None,
        }
    }

    pub fn push(&mut self, message: ChatMessage) -> Uuid {
        let id = message.id;
        self.messages.push(message);
        id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut ChatMessage> {
        self.messages.iter_mut().find(|m| m.id == id)
    }

    /// True while nothing but the greeting has been exchanged.
    pub fn only_greeting(&self) -> bool {
        self.messages.iter().all(|m| Some(m.id) == self.greeting_id)
    }

    pub fn to_turns(&self) -> Vec<ChatTurn> {
        self.messages
            .iter()
            .filter(|m| Some(m.id) != self.greeting_id)
            .map(|m| ChatTurn::new(m.role, m.text.clone()))
            .collect()
    }

    pub fn to_request(&self) -> ChatRequest {
        ChatRequest {
            messages: self.to_turns(),
        }
    }
}
