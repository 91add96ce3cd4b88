//! Repository trait for product and service listings.

use crate::domain::entities::{Listing, ListingFilter, ListingKind, ListingPatch, NewListing};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for listings.
///
/// Every operation is scoped by [`ListingKind`]; a product id never resolves
/// to a service and vice versa.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingRepository: Send + Sync {
    async fn create(&self, new_listing: NewListing) -> Result<Listing, AppError>;

    async fn find_by_id(&self, kind: ListingKind, id: i64) -> Result<Option<Listing>, AppError>;

    /// Catalogue listing, newest first.
    async fn list(&self, kind: ListingKind, filter: ListingFilter)
    -> Result<Vec<Listing>, AppError>;

    async fn list_by_seller(
        &self,
        kind: ListingKind,
        seller_id: i64,
    ) -> Result<Vec<Listing>, AppError>;

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the listing does not exist.
    async fn update(
        &self,
        kind: ListingKind,
        id: i64,
        patch: ListingPatch,
    ) -> Result<Listing, AppError>;

    /// Deletes a listing. Returns `false` if it did not exist.
    async fn delete(&self, kind: ListingKind, id: i64) -> Result<bool, AppError>;
}
