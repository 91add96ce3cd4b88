//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{
    AuthService, ListingService, MessageService, SellerService, UserService,
};
use crate::domain::entities::ListingKind;
use crate::domain::repositories::{
    ListingRepository, MessageRepository, SellerRepository, UserRepository,
};
use crate::infrastructure::mail::Mailer;
use crate::infrastructure::media::MediaStore;
use crate::utils::jwt::JwtKeys;

/// Repository implementations the services are built on.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub sellers: Arc<dyn SellerRepository>,
    pub listings: Arc<dyn ListingRepository>,
    pub messages: Arc<dyn MessageRepository>,
}

/// Settings consumed by the account services.
#[derive(Clone)]
pub struct AuthSettings {
    pub jwt: JwtKeys,
    pub bcrypt_cost: u32,
    /// Base URL used in emailed links, without trailing slash.
    pub public_url: String,
}

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub seller_service: Arc<SellerService>,
    pub product_service: Arc<ListingService>,
    pub service_service: Arc<ListingService>,
    pub message_service: Arc<MessageService>,
    pub mailer: Arc<dyn Mailer>,
    pub media: Arc<dyn MediaStore>,
}

impl AppState {
    /// Wires every service from the given repositories and integrations.
    pub fn new(
        repos: Repositories,
        mailer: Arc<dyn Mailer>,
        media: Arc<dyn MediaStore>,
        settings: AuthSettings,
    ) -> Self {
        let listings_for = |kind| {
            Arc::new(ListingService::new(
                kind,
                repos.listings.clone(),
                repos.sellers.clone(),
                media.clone(),
            ))
        };

        Self {
            auth_service: Arc::new(AuthService::new(
                repos.users.clone(),
                repos.sellers.clone(),
                mailer.clone(),
                settings.jwt,
                settings.bcrypt_cost,
                settings.public_url,
            )),
            user_service: Arc::new(UserService::new(
                repos.users.clone(),
                media.clone(),
                settings.bcrypt_cost,
            )),
            seller_service: Arc::new(SellerService::new(
                repos.sellers.clone(),
                repos.users.clone(),
                media.clone(),
            )),
            product_service: listings_for(ListingKind::Product),
            service_service: listings_for(ListingKind::Service),
            message_service: Arc::new(MessageService::new(
                repos.messages.clone(),
                repos.users.clone(),
            )),
            mailer,
            media,
        }
    }
}
