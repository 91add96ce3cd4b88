//! DTOs for direct messages.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entities::{ConversationSummary, Message, Participant};

/// `recipient_id` may arrive as a number or a numeric string.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub recipient_id: Option<Value>,
    #[serde(default)]
    pub content: String,
}

impl SendMessageRequest {
    /// Recipient id as a number, accepting numeric strings.
    pub fn recipient_id(&self) -> Option<i64> {
        match self.recipient_id.as_ref()? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// One row of the conversation overview.
#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub last_message: Message,
    pub participant: Participant,
    pub unread_count: i64,
}

impl From<ConversationSummary> for ConversationResponse {
    fn from(c: ConversationSummary) -> Self {
        Self {
            last_message: c.last_message,
            participant: c.participant,
            unread_count: c.unread_count,
        }
    }
}
