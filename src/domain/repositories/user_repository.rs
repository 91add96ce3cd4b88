//! Repository trait for user accounts.

use crate::domain::entities::{NewUser, Role, User, UserPatch};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for user accounts and their one-time tokens.
///
/// Token columns only ever hold SHA-256 hashes; raw tokens are mailed to the
/// user and never stored.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Looks up a user by normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Finds the user holding the given verification token hash.
    ///
    /// Expiry is not checked here; see [`User::verification_valid_at`].
    async fn find_by_verification_hash(&self, token_hash: &str)
    -> Result<Option<User>, AppError>;

    /// Finds the user holding the given password-reset token hash.
    ///
    /// Expiry is not checked here; see [`User::reset_valid_at`].
    async fn find_by_reset_hash(&self, token_hash: &str) -> Result<Option<User>, AppError>;

    /// Marks the user verified and clears the verification token.
    async fn mark_verified(&self, id: i64) -> Result<(), AppError>;

    /// Replaces the verification token.
    async fn set_verification_token(
        &self,
        id: i64,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError>;

    /// Stores a password-reset token.
    async fn set_reset_token(
        &self,
        id: i64,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError>;

    /// Replaces the password hash and clears any reset token.
    async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), AppError>;

    /// Applies a partial profile update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Conflict`] if the new email is taken.
    async fn update_profile(&self, id: i64, patch: UserPatch) -> Result<User, AppError>;

    async fn set_role(&self, id: i64, role: Role) -> Result<(), AppError>;

    /// Deletes a user. Returns `false` if no such user existed.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Lists users, newest first.
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, AppError>;

    async fn count(&self) -> Result<i64, AppError>;
}
