//! User account entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role carried in access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Seller,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Seller => "seller",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "seller" => Ok(Self::Seller),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// A registered account.
///
/// Holds the bcrypt password hash and the SHA-256 hashes of any outstanding
/// one-time tokens. None of these secrets are ever serialized to clients; see
/// [`crate::api::dto::user::UserProfile`] for the public shape.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub logo: Option<String>,
    pub role: Role,
    pub is_verified: bool,
    pub verification_token_hash: Option<String>,
    pub verification_expires_at: Option<DateTime<Utc>>,
    pub reset_token_hash: Option<String>,
    pub reset_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Returns true if the stored verification token is still usable at `now`.
    pub fn verification_valid_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.verification_expires_at, Some(exp) if exp > now)
    }

    /// Returns true if the stored reset token is still usable at `now`.
    pub fn reset_valid_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.reset_expires_at, Some(exp) if exp > now)
    }
}

/// Input data for creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: Role,
    pub verification_token_hash: String,
    pub verification_expires_at: DateTime<Utc>,
}

/// Partial profile update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub logo: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.logo.is_none()
    }
}

/// Normalizes an email address the way it is stored: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// The authenticated caller, taken from verified token claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn user() -> User {
        let now = Utc::now();
        User {
            id: 1,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "hash".to_string(),
            phone: None,
            address: None,
            logo: None,
            role: Role::User,
            is_verified: false,
            verification_token_hash: Some("abc".to_string()),
            verification_expires_at: Some(now + Duration::hours(1)),
            reset_token_hash: None,
            reset_expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_role_round_trip() {
        for role in [Role::User, Role::Seller, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_value(Role::Seller).unwrap(), "seller");
    }

    #[test]
    fn test_verification_expiry() {
        let u = user();
        let now = Utc::now();
        assert!(u.verification_valid_at(now));
        assert!(!u.verification_valid_at(now + Duration::hours(2)));
    }

    #[test]
    fn test_reset_without_token_is_invalid() {
        assert!(!user().reset_valid_at(Utc::now()));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(UserPatch::default().is_empty());
        let patch = UserPatch {
            phone: Some("123".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
