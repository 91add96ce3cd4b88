//! Registration, email verification, login and password recovery.

use chrono::Utc;
use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{
    Location, NewSeller, NewUser, Role, Seller, User, normalize_email,
};
use crate::domain::repositories::{SellerRepository, UserRepository};
use crate::error::AppError;
use crate::infrastructure::mail::{Mailer, templates};
use crate::utils::jwt::{Claims, IssuedToken, JwtKeys};
use crate::utils::one_time_token::{OneTimeToken, hash_token, reset_ttl, verification_ttl};
use crate::utils::password::{hash_password, validate_password, verify_password};

const DEFAULT_STORE_DESCRIPTION: &str = "No description provided";

/// Input for [`AuthService::register`].
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Only `"seller"` is honoured; anything else registers a plain user.
    pub role: Option<String>,
    pub store_name: Option<String>,
    pub description: Option<String>,
    pub location: Option<Location>,
}

#[derive(Debug, Clone)]
pub struct Registered {
    pub user: User,
    pub seller: Option<Seller>,
}

#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: IssuedToken,
    pub user: User,
    pub seller_id: Option<i64>,
}

/// Service for account lifecycle and bearer token issuance.
///
/// One-time tokens (verification, password reset) are 20 random bytes sent
/// to the user as hex; only their SHA-256 digest is persisted.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    sellers: Arc<dyn SellerRepository>,
    mailer: Arc<dyn Mailer>,
    jwt: JwtKeys,
    bcrypt_cost: u32,
    public_url: String,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sellers: Arc<dyn SellerRepository>,
        mailer: Arc<dyn Mailer>,
        jwt: JwtKeys,
        bcrypt_cost: u32,
        public_url: String,
    ) -> Self {
        Self {
            users,
            sellers,
            mailer,
            jwt,
            bcrypt_cost,
            public_url: public_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn jwt(&self) -> &JwtKeys {
        &self.jwt
    }

    /// Creates an unverified account and mails the verification link.
    ///
    /// A failed email does not fail the registration; the user can ask for a
    /// new link through [`Self::resend_verification`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for missing fields, a short password,
    /// or a seller registration without a store name.
    /// Returns [`AppError::Conflict`] if the email is already registered.
    pub async fn register(&self, input: Registration) -> Result<Registered, AppError> {
        let name = input.name.trim().to_string();
        let email = normalize_email(&input.email);

        if name.is_empty() || email.is_empty() || input.password.is_empty() {
            return Err(AppError::bad_request(
                "Email, password, and name are required",
                json!({}),
            ));
        }
        validate_password(&input.password)?;

        let role = match input.role.as_deref() {
            Some("seller") => Role::Seller,
            _ => Role::User,
        };

        let store_name = input
            .store_name
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        if role == Role::Seller && store_name.is_none() {
            return Err(AppError::bad_request(
                "Store name is required for seller",
                json!({ "field": "store_name" }),
            ));
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(
                "User already exists",
                json!({ "email": email }),
            ));
        }

        let password_hash = hash_password(input.password, self.bcrypt_cost).await?;
        let token = OneTimeToken::generate(Utc::now(), verification_ttl());

        let user = self
            .users
            .create(NewUser {
                name,
                email: email.clone(),
                password_hash,
                phone: input.phone.clone(),
                address: input.address,
                role,
                verification_token_hash: token.hash.clone(),
                verification_expires_at: token.expires_at,
            })
            .await?;

        let seller = match store_name {
            Some(store_name) if role == Role::Seller => {
                let created = self
                    .sellers
                    .create(NewSeller {
                        user_id: user.id,
                        store_name,
                        description: Some(
                            input
                                .description
                                .unwrap_or_else(|| DEFAULT_STORE_DESCRIPTION.to_string()),
                        ),
                        location: input.location.unwrap_or_default(),
                        phone: input.phone,
                        email,
                        store_logo: None,
                        business_category: None,
                    })
                    .await;

                match created {
                    Ok(seller) => Some(seller),
                    Err(e) => {
                        if let Err(cleanup) = self.users.delete(user.id).await {
                            tracing::error!(
                                user_id = user.id,
                                error = %cleanup,
                                "Failed to roll back user after seller creation error"
                            );
                        }
                        return Err(e);
                    }
                }
            }
            _ => None,
        };

        let link = self.verification_link(&token.raw);
        match templates::verification_email(&user.email, &user.name, &link) {
            Ok(email) => {
                if let Err(e) = self.mailer.send(email).await {
                    tracing::warn!(
                        user_id = user.id,
                        error = %e,
                        "Verification email not delivered"
                    );
                }
            }
            Err(e) => tracing::error!(error = %e, "Failed to render verification email"),
        }

        tracing::info!(user_id = user.id, role = %user.role, "User registered");

        Ok(Registered { user, seller })
    }

    /// Marks the account holding `raw_token` as verified.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the token is unknown, expired, or
    /// belongs to an already verified account.
    pub async fn verify_email(&self, raw_token: &str) -> Result<(), AppError> {
        let invalid =
            || AppError::bad_request("Invalid or expired verification token", json!({}));

        let user = self
            .users
            .find_by_verification_hash(&hash_token(raw_token))
            .await?
            .ok_or_else(invalid)?;

        if user.is_verified || !user.verification_valid_at(Utc::now()) {
            return Err(invalid());
        }

        self.users.mark_verified(user.id).await?;
        tracing::info!(user_id = user.id, "Email verified");

        Ok(())
    }

    /// Rotates the verification token and mails a fresh link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown email and
    /// [`AppError::Validation`] if the account is already verified.
    pub async fn resend_verification(&self, email: &str) -> Result<(), AppError> {
        let user = self.require_user_by_email(email).await?;

        if user.is_verified {
            return Err(AppError::bad_request("Email already verified", json!({})));
        }

        let token = OneTimeToken::generate(Utc::now(), verification_ttl());
        self.users
            .set_verification_token(user.id, &token.hash, token.expires_at)
            .await?;

        let email =
            templates::resend_verification_email(&user.email, &self.verification_link(&token.raw))?;
        self.mailer.send(email).await?;

        Ok(())
    }

    /// Checks credentials and issues a bearer token.
    ///
    /// The password is checked before the verification flag so an unverified
    /// account cannot be probed without its password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for bad credentials and
    /// [`AppError::Forbidden`] if the email is not verified yet.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AppError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AppError::bad_request(
                "Email and password are required",
                json!({}),
            ));
        }

        let invalid = || AppError::bad_request("Invalid email or password", json!({}));

        let user = self
            .users
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(password.to_string(), user.password_hash.clone()).await? {
            return Err(invalid());
        }

        if !user.is_verified {
            return Err(AppError::forbidden(
                "Please verify your email before logging in",
                json!({}),
            ));
        }

        let token = self.jwt.issue(user.id, user.role)?;
        let seller_id = self
            .sellers
            .find_by_user_id(user.id)
            .await?
            .map(|seller| seller.id);

        tracing::info!(user_id = user.id, "User logged in");

        Ok(LoginOutcome {
            token,
            user,
            seller_id,
        })
    }

    /// Stores a 15 minute reset token and mails the reset link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a blank email and
    /// [`AppError::NotFound`] for an unknown one.
    pub async fn forgot_password(&self, email: &str) -> Result<(), AppError> {
        if email.trim().is_empty() {
            return Err(AppError::bad_request("Email is required", json!({})));
        }

        let user = self.require_user_by_email(email).await?;

        let ttl = reset_ttl();
        let token = OneTimeToken::generate(Utc::now(), ttl);
        self.users
            .set_reset_token(user.id, &token.hash, token.expires_at)
            .await?;

        let link = format!("{}/reset-password?token={}", self.public_url, token.raw);
        let email = templates::password_reset_email(&user.email, &link, ttl.num_minutes())?;
        self.mailer.send(email).await?;

        tracing::info!(user_id = user.id, "Password reset requested");

        Ok(())
    }

    /// Replaces the password of the account holding a valid reset token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the token is unknown or expired,
    /// or the new password is too short.
    pub async fn reset_password(
        &self,
        raw_token: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        if raw_token.is_empty() || new_password.is_empty() {
            return Err(AppError::bad_request(
                "Token and new password are required",
                json!({}),
            ));
        }
        validate_password(new_password)?;

        let user = self
            .users
            .find_by_reset_hash(&hash_token(raw_token))
            .await?
            .filter(|u| u.reset_valid_at(Utc::now()))
            .ok_or_else(|| AppError::bad_request("Invalid or expired reset token", json!({})))?;

        let password_hash = hash_password(new_password.to_string(), self.bcrypt_cost).await?;
        self.users.update_password(user.id, &password_hash).await?;

        tracing::info!(user_id = user.id, "Password reset");

        Ok(())
    }

    /// Verifies a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is invalid or expired.
    pub fn authenticate(&self, token: &str) -> Result<Claims, AppError> {
        self.jwt.verify(token)
    }

    async fn require_user_by_email(&self, email: &str) -> Result<User, AppError> {
        self.users
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({})))
    }

    fn verification_link(&self, raw_token: &str) -> String {
        format!("{}/api/v1/auth/verify-email/{}", self.public_url, raw_token)
    }
}
