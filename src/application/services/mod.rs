//! Business logic services for the application layer.

pub mod auth_service;
pub mod listing_service;
pub mod message_service;
pub mod seller_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use listing_service::ListingService;
pub use message_service::MessageService;
pub use seller_service::SellerService;
pub use user_service::UserService;
