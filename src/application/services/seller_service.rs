//! Store profiles: lookup, search and owner-side editing.

use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{
    Location, NewSeller, Role, Seller, SellerPatch, SellerProfile, SellerSearch,
};
use crate::domain::repositories::{SellerRepository, UserRepository};
use crate::error::AppError;
use crate::infrastructure::media::{ImageUpload, MediaStore, folders};

/// Store fields submitted through the full-profile form.
#[derive(Debug, Clone, Default)]
pub struct SellerDraft {
    pub store_name: Option<String>,
    pub description: Option<String>,
    pub location: Option<Location>,
    pub phone: Option<String>,
    pub business_category: Option<String>,
}

/// Result of [`SellerService::upsert_full_profile`].
#[derive(Debug, Clone)]
pub struct Upserted {
    pub seller: Seller,
    pub created: bool,
}

pub struct SellerService {
    sellers: Arc<dyn SellerRepository>,
    users: Arc<dyn UserRepository>,
    media: Arc<dyn MediaStore>,
}

fn not_found() -> AppError {
    AppError::not_found("Seller not found", json!({}))
}

impl SellerService {
    pub fn new(
        sellers: Arc<dyn SellerRepository>,
        users: Arc<dyn UserRepository>,
        media: Arc<dyn MediaStore>,
    ) -> Self {
        Self {
            sellers,
            users,
            media,
        }
    }

    /// Seller with the owner's public details.
    pub async fn get_profile(&self, seller_id: i64) -> Result<SellerProfile, AppError> {
        self.sellers
            .find_by_id(seller_id)
            .await?
            .ok_or_else(not_found)
    }

    /// Partially updates the caller's own seller profile.
    pub async fn update_profile(
        &self,
        user_id: i64,
        patch: SellerPatch,
    ) -> Result<Seller, AppError> {
        if patch.store_name.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(AppError::bad_request(
                "Store name cannot be empty",
                json!({ "field": "store_name" }),
            ));
        }

        self.sellers
            .update_by_user(user_id, patch)
            .await?
            .ok_or_else(not_found)
    }

    /// Creates the caller's seller profile, or updates it if one exists.
    ///
    /// Creating a profile promotes a plain `user` account to `seller`. The
    /// store email is taken from the account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when creating without a store name.
    pub async fn upsert_full_profile(
        &self,
        user_id: i64,
        draft: SellerDraft,
        logo: Option<ImageUpload>,
    ) -> Result<Upserted, AppError> {
        let store_name = draft
            .store_name
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let existing = self.sellers.find_by_user_id(user_id).await?;

        if existing.is_none() && store_name.is_none() {
            return Err(AppError::bad_request(
                "Store name is required",
                json!({ "field": "store_name" }),
            ));
        }

        let store_logo = match logo {
            Some(image) => Some(self.media.upload(image, folders::SELLERS).await?),
            None => None,
        };

        if existing.is_some() {
            let seller = self
                .sellers
                .update_by_user(
                    user_id,
                    SellerPatch {
                        store_name,
                        description: draft.description,
                        location: draft.location,
                        phone: draft.phone,
                        store_logo,
                        business_category: draft.business_category,
                    },
                )
                .await?
                .ok_or_else(not_found)?;

            return Ok(Upserted {
                seller,
                created: false,
            });
        }

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": user_id })))?;

        let seller = self
            .sellers
            .create(NewSeller {
                user_id,
                store_name: store_name.unwrap_or_default(),
                description: draft.description,
                location: draft.location.unwrap_or_default(),
                phone: draft.phone,
                email: user.email,
                store_logo,
                business_category: draft.business_category,
            })
            .await?;

        if user.role == Role::User {
            self.users.set_role(user_id, Role::Seller).await?;
        }

        tracing::info!(user_id, seller_id = seller.id, "Seller profile created");

        Ok(Upserted {
            seller,
            created: true,
        })
    }

    pub async fn delete_profile(&self, user_id: i64) -> Result<(), AppError> {
        if !self.sellers.delete_by_user(user_id).await? {
            return Err(not_found());
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when there are no sellers at all.
    pub async fn list_all(&self) -> Result<Vec<SellerProfile>, AppError> {
        let sellers = self.sellers.list().await?;
        if sellers.is_empty() {
            return Err(AppError::not_found("No sellers found", json!({})));
        }
        Ok(sellers)
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when nothing matches.
    pub async fn search(&self, search: SellerSearch) -> Result<Vec<SellerProfile>, AppError> {
        let sellers = self.sellers.search(search).await?;
        if sellers.is_empty() {
            return Err(AppError::not_found(
                "No sellers found matching criteria",
                json!({}),
            ));
        }
        Ok(sellers)
    }
}
