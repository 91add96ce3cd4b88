//! Products and services offered by sellers.
//!
//! Both kinds share the same rules; a [`ListingService`] is constructed once
//! per [`ListingKind`] and scopes every repository call to it.

use rust_decimal::Decimal;
use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{
    AuthUser, Listing, ListingFilter, ListingKind, ListingPatch, NewListing, Role,
};
use crate::domain::repositories::{ListingRepository, SellerRepository};
use crate::error::AppError;
use crate::infrastructure::media::{ImageUpload, MediaStore};

/// Smallest price the `NUMERIC(12, 2)` price columns cannot store.
const PRICE_CEILING: Decimal = Decimal::from_parts(1_410_065_408, 2, 0, false, 0);

/// Decimal places kept by the price columns.
const PRICE_SCALE: u32 = 2;

/// Fields submitted when creating a listing.
#[derive(Debug, Clone)]
pub struct ListingDraft {
    pub name: String,
    pub price: Decimal,
    pub category: Option<String>,
    pub quantity: Option<i32>,
    pub description: Option<String>,
}

pub struct ListingService {
    kind: ListingKind,
    listings: Arc<dyn ListingRepository>,
    sellers: Arc<dyn SellerRepository>,
    media: Arc<dyn MediaStore>,
}

impl ListingService {
    pub fn new(
        kind: ListingKind,
        listings: Arc<dyn ListingRepository>,
        sellers: Arc<dyn SellerRepository>,
        media: Arc<dyn MediaStore>,
    ) -> Self {
        Self {
            kind,
            listings,
            sellers,
            media,
        }
    }

    pub fn kind(&self) -> ListingKind {
        self.kind
    }

    /// Creates a listing owned by the caller's seller profile.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] if the caller has no store and is not a
    /// seller, [`AppError::NotFound`] if a seller has no store yet and
    /// [`AppError::Validation`] for invalid fields.
    pub async fn create(
        &self,
        caller: AuthUser,
        draft: ListingDraft,
        image: Option<ImageUpload>,
    ) -> Result<Listing, AppError> {
        let name = draft.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::bad_request(
                "Name is required",
                json!({ "field": "name" }),
            ));
        }
        self.check_price(draft.price)?;
        self.check_category(draft.category.as_deref())?;
        check_quantity(draft.quantity)?;

        // Owning a store grants listing rights; the role claim can be stale
        // after a promotion through the profile upsert.
        let Some(seller) = self.sellers.find_by_user_id(caller.id).await? else {
            return Err(if caller.role == Role::Seller {
                AppError::not_found("Seller profile not found", json!({}))
            } else {
                AppError::forbidden(
                    format!("Only sellers can create {}s", self.kind),
                    json!({ "role": caller.role }),
                )
            });
        };

        let image_url = match image {
            Some(image) => Some(self.media.upload(image, self.kind.media_folder()).await?),
            None => None,
        };

        let listing = self
            .listings
            .create(NewListing {
                kind: self.kind,
                seller_id: seller.id,
                name,
                price: draft.price,
                category: draft.category,
                quantity: draft.quantity,
                description: draft.description,
                image_url,
            })
            .await?;

        tracing::info!(
            kind = %self.kind,
            id = listing.id,
            seller_id = seller.id,
            "Listing created"
        );

        Ok(listing)
    }

    pub async fn get(&self, id: i64) -> Result<Listing, AppError> {
        self.listings
            .find_by_id(self.kind, id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    format!("{} not found", self.kind.label()),
                    json!({ "id": id }),
                )
            })
    }

    pub async fn list_by_seller(&self, seller_id: i64) -> Result<Vec<Listing>, AppError> {
        self.listings.list_by_seller(self.kind, seller_id).await
    }

    /// Filtered catalogue, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an unknown category or an
    /// inverted price range.
    pub async fn list(&self, filter: ListingFilter) -> Result<Vec<Listing>, AppError> {
        self.check_category(filter.category.as_deref())?;

        if let (Some(min), Some(max)) = (filter.min_price, filter.max_price)
            && min > max
        {
            return Err(AppError::bad_request(
                "min_price cannot be greater than max_price",
                json!({ "min_price": min, "max_price": max }),
            ));
        }

        self.listings.list(self.kind, filter).await
    }

    /// Partially updates a listing, optionally replacing its image.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the listing does not exist and
    /// [`AppError::Forbidden`] if the caller neither owns it nor is an admin.
    pub async fn update(
        &self,
        caller: AuthUser,
        id: i64,
        mut patch: ListingPatch,
        image: Option<ImageUpload>,
    ) -> Result<Listing, AppError> {
        let listing = self.get(id).await?;
        self.authorize(caller, &listing).await?;

        if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(AppError::bad_request(
                "Name cannot be empty",
                json!({ "field": "name" }),
            ));
        }
        if let Some(price) = patch.price {
            self.check_price(price)?;
        }
        self.check_category(patch.category.as_deref())?;
        check_quantity(patch.quantity)?;

        if let Some(image) = image {
            patch.image_url = Some(self.media.upload(image, self.kind.media_folder()).await?);
        }

        self.listings.update(self.kind, id, patch).await
    }

    pub async fn delete(&self, caller: AuthUser, id: i64) -> Result<(), AppError> {
        let listing = self.get(id).await?;
        self.authorize(caller, &listing).await?;

        self.listings.delete(self.kind, id).await?;
        tracing::info!(kind = %self.kind, id, user_id = caller.id, "Listing deleted");

        Ok(())
    }

    /// Allows admins and the seller that owns the listing.
    async fn authorize(&self, caller: AuthUser, listing: &Listing) -> Result<(), AppError> {
        if caller.is_admin() {
            return Ok(());
        }

        let owns = self
            .sellers
            .find_by_user_id(caller.id)
            .await?
            .is_some_and(|seller| seller.id == listing.seller_id);

        if !owns {
            return Err(AppError::forbidden(
                format!("You are not authorized to modify this {}", self.kind),
                json!({ "id": listing.id }),
            ));
        }

        Ok(())
    }

    fn check_price(&self, price: Decimal) -> Result<(), AppError> {
        if price < Decimal::ZERO {
            return Err(AppError::bad_request(
                "Price cannot be negative",
                json!({ "field": "price" }),
            ));
        }
        if price >= PRICE_CEILING {
            return Err(AppError::bad_request(
                "Price is too large",
                json!({ "field": "price", "max": "9999999999.99" }),
            ));
        }
        if price.normalize().scale() > PRICE_SCALE {
            return Err(AppError::bad_request(
                "Price can have at most 2 decimal places",
                json!({ "field": "price" }),
            ));
        }
        Ok(())
    }

    fn check_category(&self, category: Option<&str>) -> Result<(), AppError> {
        match category {
            Some(c) if !self.kind.is_valid_category(c) => Err(AppError::bad_request(
                format!("Invalid {} category", self.kind),
                json!({ "category": c, "allowed": self.kind.categories() }),
            )),
            _ => Ok(()),
        }
    }
}

fn check_quantity(quantity: Option<i32>) -> Result<(), AppError> {
    if quantity.is_some_and(|q| q < 0) {
        return Err(AppError::bad_request(
            "Quantity cannot be negative",
            json!({ "field": "quantity" }),
        ));
    }
    Ok(())
}
