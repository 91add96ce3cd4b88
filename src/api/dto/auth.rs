//! DTOs for registration, login and password recovery.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::auth_service::{LoginOutcome, Registered, Registration};
use crate::domain::entities::{Location, Role};

/// Request body for `POST /api/v1/auth/register`.
///
/// `store_name`, `description` and `location` are only read when `role` is
/// `"seller"`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[serde(default)]
    #[validate(email(message = "A valid email is required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,

    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: Option<String>,
    pub store_name: Option<String>,
    pub description: Option<String>,
    pub location: Option<Location>,
}

impl From<RegisterRequest> for Registration {
    fn from(r: RegisterRequest) -> Self {
        Registration {
            name: r.name,
            email: r.email,
            password: r.password,
            phone: super::non_blank(r.phone),
            address: super::non_blank(r.address),
            role: r.role,
            store_name: r.store_name,
            description: super::non_blank(r.description),
            location: r.location,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<i64>,
}

impl From<&Registered> for RegisterResponse {
    fn from(r: &Registered) -> Self {
        Self {
            user_id: r.user.id,
            seller_id: r.seller.as_ref().map(|s| s.id),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user_id: i64,
    pub seller_id: Option<i64>,
    pub role: Role,
    pub name: String,
}

impl From<&LoginOutcome> for LoginResponse {
    fn from(o: &LoginOutcome) -> Self {
        Self {
            token: o.token.token.clone(),
            expires_in: o.token.expires_in.num_seconds(),
            user_id: o.user.id,
            seller_id: o.seller_id,
            role: o.user.role,
            name: o.user.name.clone(),
        }
    }
}

/// Body for endpoints that only take an email address.
#[derive(Debug, Deserialize, Validate)]
pub struct EmailRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,

    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub new_password: String,
}
