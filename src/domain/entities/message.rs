//! Direct message entity.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A message sent from one user to another.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub id: i64,
    pub sender_id: i64,
    pub recipient_id: i64,
    pub content: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Returns true if `user_id` is the sender or the recipient.
    pub fn involves(&self, user_id: i64) -> bool {
        self.sender_id == user_id || self.recipient_id == user_id
    }

    /// The other side of the message from `user_id`'s point of view.
    pub fn counterpart_of(&self, user_id: i64) -> i64 {
        if self.sender_id == user_id {
            self.recipient_id
        } else {
            self.sender_id
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub sender_id: i64,
    pub recipient_id: i64,
    pub content: String,
}

/// Public details of the other user in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Participant {
    pub id: i64,
    pub name: String,
    pub logo: Option<String>,
}

/// Latest message exchanged with one counterpart.
#[derive(Debug, Clone)]
pub struct ConversationSummary {
    pub last_message: Message,
    pub participant: Participant,
    /// Messages from the participant the viewer has not read yet.
    pub unread_count: i64,
}
