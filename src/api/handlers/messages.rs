//! Handlers for direct messages.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde_json::json;

use crate::api::dto::ApiResponse;
use crate::api::dto::message::{ConversationResponse, SendMessageRequest};
use crate::api::extract::{ApiJson, ApiPath};
use crate::domain::entities::{AuthUser, Message};
use crate::error::AppError;
use crate::state::AppState;

/// Sends a message from the caller.
///
/// # Endpoint
///
/// `POST /api/v1/messages/send`
///
/// # Errors
///
/// Returns 400 if the recipient is missing, unknown or the caller, or the
/// content is empty or longer than 5000 characters.
pub async fn send_message_handler(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiJson(payload): ApiJson<SendMessageRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Message>>), AppError> {
    let recipient_id = payload.recipient_id().ok_or_else(|| {
        AppError::bad_request("Invalid recipient ID", json!({ "field": "recipient_id" }))
    })?;

    let message = state
        .message_service
        .send(caller.id, recipient_id, &payload.content)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Message sent successfully", message)),
    ))
}

/// `GET /api/v1/messages/conversation/{user_id}`, oldest first.
pub async fn conversation_handler(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<Json<ApiResponse<Vec<Message>>>, AppError> {
    let messages = state
        .message_service
        .conversation(caller.id, user_id)
        .await?;

    Ok(Json(ApiResponse::new(
        "Conversation retrieved successfully",
        messages,
    )))
}

/// Latest message per counterpart, newest first.
///
/// `GET /api/v1/messages/get/conversations`
pub async fn conversations_handler(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<ApiResponse<Vec<ConversationResponse>>>, AppError> {
    let conversations = state.message_service.conversations(caller.id).await?;

    Ok(Json(ApiResponse::new(
        "Conversations retrieved successfully",
        conversations.into_iter().map(Into::into).collect(),
    )))
}

/// `PATCH /api/v1/messages/read/{message_id}`, recipient only.
pub async fn mark_read_handler(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(message_id): ApiPath<i64>,
) -> Result<Json<ApiResponse<Message>>, AppError> {
    let message = state
        .message_service
        .mark_read(caller.id, message_id)
        .await?;

    Ok(Json(ApiResponse::new("Message marked as read", message)))
}

/// `DELETE /api/v1/messages/delete/{message_id}`, sender or recipient.
pub async fn delete_message_handler(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(message_id): ApiPath<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state
        .message_service
        .delete(caller.id, message_id)
        .await?;

    Ok(Json(ApiResponse::message("Message deleted successfully")))
}
