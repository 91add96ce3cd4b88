//! Repository trait for seller profiles.

use crate::domain::entities::{NewSeller, Seller, SellerPatch, SellerProfile, SellerSearch};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for store profiles.
///
/// Each user owns at most one seller profile; lookups by `user_id` therefore
/// return a single record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SellerRepository: Send + Sync {
    /// Creates a seller profile.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the user already owns a profile.
    async fn create(&self, new_seller: NewSeller) -> Result<Seller, AppError>;

    /// Finds a seller with its owner's public details.
    async fn find_by_id(&self, id: i64) -> Result<Option<SellerProfile>, AppError>;

    async fn find_by_user_id(&self, user_id: i64) -> Result<Option<Seller>, AppError>;

    /// Updates the profile owned by `user_id`. Returns `None` if the user has
    /// no seller profile.
    async fn update_by_user(
        &self,
        user_id: i64,
        patch: SellerPatch,
    ) -> Result<Option<Seller>, AppError>;

    /// Deletes the profile owned by `user_id`. Returns `false` if none existed.
    async fn delete_by_user(&self, user_id: i64) -> Result<bool, AppError>;

    /// All sellers, newest first.
    async fn list(&self) -> Result<Vec<SellerProfile>, AppError>;

    async fn search(&self, search: SellerSearch) -> Result<Vec<SellerProfile>, AppError>;
}
