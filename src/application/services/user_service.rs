//! Profile management for the authenticated user.

use serde_json::json;
use std::sync::Arc;
use validator::ValidateEmail;

use crate::domain::entities::{User, UserPatch, normalize_email};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::infrastructure::media::{ImageUpload, MediaStore, folders};
use crate::utils::password::{hash_password, validate_password, verify_password};

pub struct UserService {
    users: Arc<dyn UserRepository>,
    media: Arc<dyn MediaStore>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        media: Arc<dyn MediaStore>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            users,
            media,
            bcrypt_cost,
        }
    }

    pub async fn get_profile(&self, user_id: i64) -> Result<User, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": user_id })))
    }

    /// Number of registered accounts. Also serves as the database probe for
    /// the health check.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.users.count().await
    }

    /// Applies the provided fields and, if given, uploads a new logo.
    ///
    /// Blank text fields are ignored. The email is normalized before the
    /// uniqueness check.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user no longer exists,
    /// [`AppError::Validation`] for a malformed email and
    /// [`AppError::Conflict`] if the new email belongs to another account.
    pub async fn update_profile(
        &self,
        user_id: i64,
        patch: UserPatch,
        logo: Option<ImageUpload>,
    ) -> Result<User, AppError> {
        let user = self.get_profile(user_id).await?;

        let non_blank = |v: Option<String>| {
            v.map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let mut patch = UserPatch {
            name: non_blank(patch.name),
            email: non_blank(patch.email).map(|e| normalize_email(&e)),
            phone: non_blank(patch.phone),
            address: non_blank(patch.address),
            logo: None,
        };

        if patch.email.as_deref() == Some(user.email.as_str()) {
            patch.email = None;
        }

        if let Some(email) = &patch.email
            && !email.validate_email()
        {
            return Err(AppError::bad_request(
                "A valid email is required",
                json!({ "field": "email" }),
            ));
        }

        if let Some(email) = &patch.email
            && let Some(other) = self.users.find_by_email(email).await?
            && other.id != user_id
        {
            return Err(AppError::conflict(
                "Email already in use",
                json!({ "email": email }),
            ));
        }

        if let Some(image) = logo {
            patch.logo = Some(self.media.upload(image, folders::USERS).await?);
        }

        if patch.is_empty() {
            return Ok(user);
        }

        self.users.update_profile(user_id, patch).await
    }

    /// Deletes the account; seller profile, listings and messages go with it.
    pub async fn delete_profile(&self, user_id: i64) -> Result<(), AppError> {
        if !self.users.delete(user_id).await? {
            return Err(AppError::not_found("User not found", json!({ "id": user_id })));
        }
        tracing::info!(user_id, "User deleted");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if either password is missing, the new
    /// one is too short, or the current one does not match.
    pub async fn change_password(
        &self,
        user_id: i64,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        if current_password.is_empty() || new_password.is_empty() {
            return Err(AppError::bad_request(
                "Current and new passwords are required",
                json!({}),
            ));
        }
        validate_password(new_password)?;

        let user = self.get_profile(user_id).await?;

        if !verify_password(current_password.to_string(), user.password_hash).await? {
            return Err(AppError::bad_request(
                "Current password is incorrect",
                json!({}),
            ));
        }

        let password_hash = hash_password(new_password.to_string(), self.bcrypt_cost).await?;
        self.users.update_password(user_id, &password_hash).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Role;
    use crate::domain::repositories::MockUserRepository;
    use crate::infrastructure::media::MockMediaStore;
    use bytes::Bytes;
    use chrono::Utc;

    fn user(id: i64, email: &str) -> User {
        let now = Utc::now();
        User {
            id,
            name: "Ada".to_string(),
            email: email.to_string(),
            password_hash: String::new(),
            phone: None,
            address: None,
            logo: None,
            role: Role::User,
            is_verified: true,
            verification_token_hash: None,
            verification_expires_at: None,
            reset_token_hash: None,
            reset_expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn png() -> ImageUpload {
        ImageUpload {
            file_name: "logo.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: Bytes::from_static(b"\x89PNG"),
        }
    }

    #[tokio::test]
    async fn test_update_profile_email_taken() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(user(id, "ada@example.com"))));
        users
            .expect_find_by_email()
            .withf(|e| e == "bob@example.com")
            .returning(|e| Ok(Some(user(2, e))));
        users.expect_update_profile().times(0);

        let svc = UserService::new(Arc::new(users), Arc::new(MockMediaStore::new()), 4);
        let err = svc
            .update_profile(
                1,
                UserPatch {
                    email: Some(" Bob@Example.com ".to_string()),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_update_profile_rejects_malformed_email() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(user(id, "ada@example.com"))));
        users.expect_find_by_email().times(0);
        users.expect_update_profile().times(0);

        let svc = UserService::new(Arc::new(users), Arc::new(MockMediaStore::new()), 4);
        let err = svc
            .update_profile(
                1,
                UserPatch {
                    email: Some("not-an-email".to_string()),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_update_profile_uploads_logo_to_user_folder() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(user(id, "ada@example.com"))));
        users
            .expect_update_profile()
            .withf(|id, p| {
                *id == 1
                    && p.logo.as_deref() == Some("https://cdn.example/logo.png")
                    && p.name.as_deref() == Some("Ada L.")
                    && p.phone.is_none()
            })
            .times(1)
            .returning(|id, p| {
                let mut u = user(id, "ada@example.com");
                u.logo = p.logo;
                Ok(u)
            });

        let mut media = MockMediaStore::new();
        media
            .expect_upload()
            .withf(|_, folder| folder == folders::USERS)
            .times(1)
            .returning(|_, _| Ok("https://cdn.example/logo.png".to_string()));

        let svc = UserService::new(Arc::new(users), Arc::new(media), 4);
        let updated = svc
            .update_profile(
                1,
                UserPatch {
                    name: Some("Ada L.".to_string()),
                    phone: Some("   ".to_string()),
                    ..Default::default()
                },
                Some(png()),
            )
            .await
            .unwrap();

        assert_eq!(updated.logo.as_deref(), Some("https://cdn.example/logo.png"));
    }

    #[tokio::test]
    async fn test_update_profile_same_email_is_noop() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(user(id, "ada@example.com"))));
        users.expect_find_by_email().times(0);
        users.expect_update_profile().times(0);

        let svc = UserService::new(Arc::new(users), Arc::new(MockMediaStore::new()), 4);
        let result = svc
            .update_profile(
                1,
                UserPatch {
                    email: Some("ADA@example.com".to_string()),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();

        assert_eq!(result.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_delete_missing_user() {
        let mut users = MockUserRepository::new();
        users.expect_delete().returning(|_| Ok(false));

        let svc = UserService::new(Arc::new(users), Arc::new(MockMediaStore::new()), 4);
        let err = svc.delete_profile(1).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_change_password_wrong_current() {
        let hash = hash_password("secret1".to_string(), 4).await.unwrap();
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(move |id| {
            let mut u = user(id, "ada@example.com");
            u.password_hash = hash.clone();
            Ok(Some(u))
        });
        users.expect_update_password().times(0);

        let svc = UserService::new(Arc::new(users), Arc::new(MockMediaStore::new()), 4);
        let err = svc
            .change_password(1, "not-it", "another1")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_change_password_rejects_short_password() {
        let svc = UserService::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockMediaStore::new()),
            4,
        );
        let err = svc.change_password(1, "secret1", "123").await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }
}
