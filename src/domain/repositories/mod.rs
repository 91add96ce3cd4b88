//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern and are
//! implemented by concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - Accounts, credentials and one-time tokens
//! - [`SellerRepository`] - Store profiles
//! - [`ListingRepository`] - Products and services
//! - [`MessageRepository`] - Direct messages

pub mod listing_repository;
pub mod message_repository;
pub mod seller_repository;
pub mod user_repository;

pub use listing_repository::ListingRepository;
pub use message_repository::MessageRepository;
pub use seller_repository::SellerRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use listing_repository::MockListingRepository;
#[cfg(test)]
pub use message_repository::MockMessageRepository;
#[cfg(test)]
pub use seller_repository::MockSellerRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
