//! Append-only conversation log.

use std::sync::{Mutex, PoisonError};

use crate::models::message::{Message, MessageAuthor};

/// Ordered, append-only log of conversation messages.
///
/// Appends are synchronous and infallible so that a user message is visible
/// in the log before any asynchronous reply work begins.
#[derive(Debug, Default)]
pub struct ConversationLog {
    messages: Mutex<Vec<Message>>,
}

impl ConversationLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a freshly stamped message and return a copy of it.
    pub fn append(&self, author: MessageAuthor, content: impl Into<String>) -> Message {
        let message = Message::new(author, content);
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.clone());
        message
    }

    /// Snapshot of all messages in append order.
    #[must_use]
    pub fn all(&self) -> Vec<Message> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of messages currently in the log.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the log holds no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
