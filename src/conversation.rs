// src/conversation.rs

use chrono::{DateTime, Local};
use uuid::Uuid;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

/// Opaque message identity. Ids are minted once at creation and never
/// reused, which is what makes replace-by-id safe under overlapping
/// sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(Uuid);

impl MessageId {
    fn new() -> Self {
        MessageId(Uuid::new_v4())
    }
}

/// A single entry in the conversation.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub text: String,
    pub is_typing: bool,
    pub timestamp: DateTime<Local>,
}

impl Message {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Message {
            id: MessageId::new(),
            role,
            text: text.into(),
            is_typing: false,
            timestamp: Local::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Message::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Message::new(Role::Assistant, text)
    }

    pub fn system(text: impl Into<String>) -> Self {
        Message::new(Role::System, text)
    }

    /// Placeholder shown while a reply is pending. Carries no text;
    /// the view renders it as an animated indicator.
    pub fn typing_placeholder() -> Self {
        let mut message = Message::new(Role::Assistant, "");
        message.is_typing = true;
        message
    }
}

/// Ordered message store. The only mutations are append and
/// replace-in-place, so every message keeps its position for as long
/// as it lives.
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Swaps the message bearing `id` for `message`, keeping the slot.
    /// Returns false (and changes nothing) when no message has that id.
    pub fn replace(&mut self, id: MessageId, message: Message) -> bool {
        match self.position(id) {
            Some(idx) => {
                self.messages[idx] = message;
                true
            }
            None => false,
        }
    }

    pub fn position(&self, id: MessageId) -> Option<usize> {
        self.messages.iter().position(|m| m.id == id)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
