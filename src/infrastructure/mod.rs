//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence, email and image hosting.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`mail`] - SMTP and logging mailers
//! - [`media`] - Cloudinary and disabled media stores

pub mod mail;
pub mod media;
pub mod persistence;
