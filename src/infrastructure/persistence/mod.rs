//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx. Queries
//! are checked at runtime and mapped through private `FromRow` row structs.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - Accounts and one-time token hashes
//! - [`PgSellerRepository`] - Store profiles joined with their owners
//! - [`PgListingRepository`] - Products and services
//! - [`PgMessageRepository`] - Direct messages and conversation summaries

pub mod pg_listing_repository;
pub mod pg_message_repository;
pub mod pg_seller_repository;
pub mod pg_user_repository;

pub use pg_listing_repository::PgListingRepository;
pub use pg_message_repository::PgMessageRepository;
pub use pg_seller_repository::PgSellerRepository;
pub use pg_user_repository::PgUserRepository;

/// Builds an `ILIKE` pattern matching `needle` anywhere, with wildcards escaped.
pub(crate) fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
