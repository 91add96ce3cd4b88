//! Handlers for registration, login and password recovery.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use validator::Validate;

use crate::api::dto::ApiResponse;
use crate::api::dto::auth::{
    EmailRequest, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
    ResetPasswordRequest,
};
use crate::api::extract::{ApiJson, ApiPath};
use crate::domain::entities::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Name of the cookie mirroring the bearer token for browser clients.
pub const AUTH_COOKIE: &str = "Authorization";

fn auth_cookie(token: &str, max_age_secs: i64) -> String {
    format!(
        "{AUTH_COOKIE}=Bearer%20{token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}"
    )
}

fn cleared_auth_cookie() -> String {
    format!("{AUTH_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Registers a user, and a store for `role: "seller"`.
///
/// # Endpoint
///
/// `POST /api/v1/auth/register`
///
/// # Errors
///
/// Returns 400 for missing or invalid fields.
/// Returns 409 if the email is already registered.
pub async fn register_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RegisterResponse>>), AppError> {
    payload.validate()?;

    let registered = state.auth_service.register(payload.into()).await?;

    let who = registered
        .seller
        .as_ref()
        .map(|s| s.store_name.as_str())
        .unwrap_or(registered.user.name.as_str());
    let message =
        format!("{who} registered successfully! Please check your email to verify your account.");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(message, RegisterResponse::from(&registered))),
    ))
}

/// `GET /api/v1/auth/verify-email/{token}`
pub async fn verify_email_handler(
    State(state): State<AppState>,
    ApiPath(token): ApiPath<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.auth_service.verify_email(&token).await?;

    Ok(Json(ApiResponse::message(
        "Email verified successfully, Welcome to Tradelink!",
    )))
}

/// `POST /api/v1/auth/resend-verification`
pub async fn resend_verification_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<EmailRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    payload.validate()?;
    state.auth_service.resend_verification(&payload.email).await?;

    Ok(Json(ApiResponse::message(
        "Verification email resent successfully",
    )))
}

/// Exchanges credentials for a bearer token.
///
/// The token is returned in the body and also set as an HttpOnly
/// `Authorization` cookie that lives as long as the token.
///
/// # Endpoint
///
/// `POST /api/v1/auth/login`
///
/// # Errors
///
/// Returns 400 for missing fields or bad credentials.
/// Returns 403 if the email has not been verified.
pub async fn login_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let outcome = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    let body = LoginResponse::from(&outcome);
    let cookie = auth_cookie(&body.token, body.expires_in);

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(ApiResponse::new("Login successful", body)),
    ))
}

/// Clears the auth cookie. Tokens are stateless, so an issued token stays
/// valid until it expires.
///
/// `POST /api/v1/auth/logout`
pub async fn logout_handler(caller: AuthUser) -> impl IntoResponse {
    tracing::info!(user_id = caller.id, "User logged out");

    (
        [(header::SET_COOKIE, cleared_auth_cookie())],
        Json(ApiResponse::message("Logout successful")),
    )
}

/// `POST /api/v1/auth/forgot-password`
pub async fn forgot_password_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<EmailRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    payload.validate()?;
    state.auth_service.forgot_password(&payload.email).await?;

    Ok(Json(ApiResponse::message(
        "Email sent with password reset instructions",
    )))
}

/// `POST /api/v1/auth/reset-password`
pub async fn reset_password_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ResetPasswordRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    payload.validate()?;
    state
        .auth_service
        .reset_password(&payload.token, &payload.new_password)
        .await?;

    Ok(Json(ApiResponse::message("Password reset successful")))
}
