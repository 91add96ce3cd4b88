//! bcrypt password hashing.
//!
//! Hashing runs on the blocking pool so a slow cost factor does not stall the
//! async workers.

use crate::error::AppError;
use serde_json::json;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Hashes a password with the given bcrypt cost.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if hashing fails or the blocking task panics.
pub async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Password hashing task failed");
            AppError::internal("Internal server error", json!({}))
        })?
        .map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed");
            AppError::internal("Internal server error", json!({}))
        })
}

/// Checks a password against a stored bcrypt hash.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the stored hash is malformed.
pub async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Password verification task failed");
            AppError::internal("Internal server error", json!({}))
        })?
        .map_err(|e| {
            tracing::error!(error = %e, "Stored password hash is invalid");
            AppError::internal("Internal server error", json!({}))
        })
}

/// Rejects passwords shorter than [`MIN_PASSWORD_LEN`].
pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::bad_request(
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
            json!({ "min_length": MIN_PASSWORD_LEN }),
        ));
    }
    Ok(())
}
