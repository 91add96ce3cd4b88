//! Core domain entities representing the marketplace data model.
//!
//! Entities are plain data structures. Creation and partial-update inputs
//! live next to them as separate structs:
//!
//! - [`User`] / [`NewUser`] / [`UserPatch`]
//! - [`Seller`] / [`NewSeller`] / [`SellerPatch`]
//! - [`Listing`] / [`NewListing`] / [`ListingPatch`] for products and services
//! - [`Message`] / [`NewMessage`]

pub mod listing;
pub mod message;
pub mod seller;
pub mod user;

pub use listing::{Listing, ListingFilter, ListingKind, ListingPatch, NewListing};
pub use message::{ConversationSummary, Message, NewMessage, Participant};
pub use seller::{
    Location, NewSeller, Seller, SellerOwner, SellerPatch, SellerProfile, SellerSearch,
};
pub use user::{AuthUser, NewUser, Role, User, UserPatch, normalize_email};
