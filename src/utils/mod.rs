//! Security helpers shared by the application services.
//!
//! - [`jwt`] - Access token signing and verification
//! - [`one_time_token`] - Email verification / password reset tokens
//! - [`password`] - bcrypt hashing and password rules

pub mod jwt;
pub mod one_time_token;
pub mod password;
