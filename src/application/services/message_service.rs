//! Direct messages between users.

use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{ConversationSummary, Message, NewMessage};
use crate::domain::repositories::{MessageRepository, UserRepository};
use crate::error::AppError;

/// Upper bound on message length, in characters.
pub const MAX_MESSAGE_CHARS: usize = 5000;

pub struct MessageService {
    messages: Arc<dyn MessageRepository>,
    users: Arc<dyn UserRepository>,
}

impl MessageService {
    pub fn new(messages: Arc<dyn MessageRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { messages, users }
    }

    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for empty or oversized content, a
    /// message to oneself, or an unknown recipient.
    pub async fn send(
        &self,
        sender_id: i64,
        recipient_id: i64,
        content: &str,
    ) -> Result<Message, AppError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::bad_request(
                "Message content is required",
                json!({ "field": "content" }),
            ));
        }
        if content.chars().count() > MAX_MESSAGE_CHARS {
            return Err(AppError::bad_request(
                "Message is too long",
                json!({ "field": "content", "max": MAX_MESSAGE_CHARS }),
            ));
        }
        if recipient_id == sender_id {
            return Err(AppError::bad_request(
                "Cannot send a message to yourself",
                json!({ "recipient_id": recipient_id }),
            ));
        }
        if self.users.find_by_id(recipient_id).await?.is_none() {
            return Err(AppError::bad_request(
                "Invalid recipient ID",
                json!({ "recipient_id": recipient_id }),
            ));
        }

        self.messages
            .create(NewMessage {
                sender_id,
                recipient_id,
                content: content.to_string(),
            })
            .await
    }

    pub async fn conversation(
        &self,
        user_id: i64,
        other_id: i64,
    ) -> Result<Vec<Message>, AppError> {
        self.messages.conversation(user_id, other_id).await
    }

    pub async fn conversations(&self, user_id: i64) -> Result<Vec<ConversationSummary>, AppError> {
        self.messages.conversations(user_id).await
    }

    /// Only the recipient may mark a message read.
    pub async fn mark_read(&self, user_id: i64, message_id: i64) -> Result<Message, AppError> {
        let message = self.require(message_id).await?;

        if message.recipient_id != user_id {
            return Err(forbidden());
        }

        self.messages.mark_read(message_id).await
    }

    /// Either participant may delete a message.
    pub async fn delete(&self, user_id: i64, message_id: i64) -> Result<(), AppError> {
        let message = self.require(message_id).await?;

        if !message.involves(user_id) {
            return Err(forbidden());
        }

        self.messages.delete(message_id).await?;
        Ok(())
    }

    async fn require(&self, message_id: i64) -> Result<Message, AppError> {
        self.messages
            .find_by_id(message_id)
            .await?
            .ok_or_else(|| AppError::not_found("Message not found", json!({ "id": message_id })))
    }
}

fn forbidden() -> AppError {
    AppError::forbidden("You are not authorized to perform this action", json!({}))
}
