//! Domain layer containing business entities and repository contracts.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Business rules live in [`crate::application::services`].
//!
//! - [`entities`] - Core marketplace data structures
//! - [`repositories`] - Data access trait definitions

pub mod entities;
pub mod repositories;
