//! Application layer services implementing business logic.
//!
//! Services orchestrate repository calls, validation and authorization rules,
//! and the external integrations (mail, media). HTTP handlers call into them
//! and only shape the response.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Registration, verification, login, password reset
//! - [`services::user_service::UserService`] - Own profile and password
//! - [`services::seller_service::SellerService`] - Store profiles and search
//! - [`services::listing_service::ListingService`] - Products and services
//! - [`services::message_service::MessageService`] - Direct messages

pub mod services;
