//! Conversation message model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author of a conversation message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageAuthor {
    /// The human operating the session.
    User,
    /// The assistant side of the conversation.
    Assistant,
}

/// A single entry in the ordered conversation log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// Unique message identifier, `msg:`-prefixed UUID.
    pub id: String,
    /// Who wrote this message.
    pub author: MessageAuthor,
    /// Message body; never empty.
    pub content: String,
    /// When the message was appended to the log.
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new message stamped with the current time.
    #[must_use]
    pub fn new(author: MessageAuthor, content: impl Into<String>) -> Self {
        Self {
            id: format!("msg:{}", Uuid::new_v4()),
            author,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}
