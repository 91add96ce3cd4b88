//! Handlers for the current user's account.

use axum::{
    Json,
    extract::{Multipart, State},
};
use validator::Validate;

use crate::api::dto::ApiResponse;
use crate::api::dto::user::{ChangePasswordRequest, UserProfile};
use crate::api::extract::ApiJson;
use crate::api::multipart::{MAX_LOGO_BYTES, MultipartForm};
use crate::domain::entities::{AuthUser, UserPatch};
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/v1/users/get/profile`
pub async fn get_profile_handler(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<ApiResponse<UserProfile>>, AppError> {
    let user = state.user_service.get_profile(caller.id).await?;

    Ok(Json(ApiResponse::new(
        "User profile retrieved successfully",
        user.into(),
    )))
}

/// Updates profile fields from a multipart form.
///
/// # Endpoint
///
/// `PUT /api/v1/users/profile/update`
///
/// Text parts: `name`, `email`, `phone`, `address`. File part: `logo`
/// (jpeg, png or webp, at most 2 MiB).
///
/// # Errors
///
/// Returns 400 for a rejected file type or a malformed email, 409 if the
/// email is taken and 413 for an oversized logo.
pub async fn update_profile_handler(
    State(state): State<AppState>,
    caller: AuthUser,
    multipart: Multipart,
) -> Result<Json<ApiResponse<UserProfile>>, AppError> {
    let mut form = MultipartForm::read(multipart, "logo", MAX_LOGO_BYTES).await?;

    let patch = UserPatch {
        name: form.text("name"),
        email: form.text("email"),
        phone: form.text("phone"),
        address: form.text("address"),
        logo: None,
    };

    let user = state
        .user_service
        .update_profile(caller.id, patch, form.take_image())
        .await?;

    Ok(Json(ApiResponse::new(
        "User profile updated successfully",
        user.into(),
    )))
}

/// `DELETE /api/v1/users/profile/delete`
pub async fn delete_profile_handler(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.user_service.delete_profile(caller.id).await?;

    Ok(Json(ApiResponse::message(
        "User profile deleted successfully",
    )))
}

/// `PUT /api/v1/users/change-password`
pub async fn change_password_handler(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiJson(payload): ApiJson<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    payload.validate()?;

    state
        .user_service
        .change_password(caller.id, &payload.current_password, &payload.new_password)
        .await?;

    Ok(Json(ApiResponse::message("Password changed successfully")))
}
