//! Repository trait for direct messages.

use crate::domain::entities::{ConversationSummary, Message, NewMessage};
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn create(&self, new_message: NewMessage) -> Result<Message, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Message>, AppError>;

    /// Every message exchanged between `user_a` and `user_b`, oldest first.
    async fn conversation(&self, user_a: i64, user_b: i64) -> Result<Vec<Message>, AppError>;

    /// One summary per counterpart of `user_id`, most recent conversation first.
    async fn conversations(&self, user_id: i64) -> Result<Vec<ConversationSummary>, AppError>;

    /// Sets the read flag and returns the updated message.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the message does not exist.
    async fn mark_read(&self, id: i64) -> Result<Message, AppError>;

    /// Deletes a message. Returns `false` if it did not exist.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
