//! PostgreSQL implementation of the user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewUser, Role, User, UserPatch};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

const USER_COLUMNS: &str = "id, name, email, password_hash, phone, address, logo, role, \
    is_verified, verification_token_hash, verification_expires_at, reset_token_hash, \
    reset_expires_at, created_at, updated_at";

#[derive(FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    password_hash: String,
    phone: Option<String>,
    address: Option<String>,
    logo: Option<String>,
    role: String,
    is_verified: bool,
    verification_token_hash: Option<String>,
    verification_expires_at: Option<DateTime<Utc>>,
    reset_token_hash: Option<String>,
    reset_expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(r: UserRow) -> Result<Self, Self::Error> {
        let role: Role = r.role.parse().map_err(|e: String| {
            tracing::error!(user_id = r.id, error = %e, "Corrupt role in users table");
            AppError::internal("Database error", json!({}))
        })?;

        Ok(User {
            id: r.id,
            name: r.name,
            email: r.email,
            password_hash: r.password_hash,
            phone: r.phone,
            address: r.address,
            logo: r.logo,
            role,
            is_verified: r.is_verified,
            verification_token_hash: r.verification_token_hash,
            verification_expires_at: r.verification_expires_at,
            reset_token_hash: r.reset_token_hash,
            reset_expires_at: r.reset_expires_at,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

/// PostgreSQL repository for user accounts.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = $1");
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(self.pool.as_ref())
            .await?
            .map(User::try_from)
            .transpose()
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let sql = format!(
            r#"
            INSERT INTO users (name, email, password_hash, phone, address, role,
                               verification_token_hash, verification_expires_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(&new_user.name)
            .bind(&new_user.email)
            .bind(&new_user.password_hash)
            .bind(&new_user.phone)
            .bind(&new_user.address)
            .bind(new_user.role.as_str())
            .bind(&new_user.verification_token_hash)
            .bind(new_user.verification_expires_at)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| match AppError::from(e) {
                AppError::Conflict { .. } => AppError::conflict(
                    "User already exists",
                    json!({ "email": new_user.email }),
                ),
                other => other,
            })?;

        row.try_into()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.find_one("email", email).await
    }

    async fn find_by_verification_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<User>, AppError> {
        self.find_one("verification_token_hash", token_hash).await
    }

    async fn find_by_reset_hash(&self, token_hash: &str) -> Result<Option<User>, AppError> {
        self.find_one("reset_token_hash", token_hash).await
    }

    async fn mark_verified(&self, id: i64) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE users SET
                is_verified = TRUE,
                verification_token_hash = NULL,
                verification_expires_at = NULL,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn set_verification_token(
        &self,
        id: i64,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE users SET
                verification_token_hash = $2,
                verification_expires_at = $3,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(token_hash)
        .bind(expires_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn set_reset_token(
        &self,
        id: i64,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE users SET
                reset_token_hash = $2,
                reset_expires_at = $3,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(token_hash)
        .bind(expires_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE users SET
                password_hash = $2,
                reset_token_hash = NULL,
                reset_expires_at = NULL,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn update_profile(&self, id: i64, patch: UserPatch) -> Result<User, AppError> {
        let sql = format!(
            r#"
            UPDATE users SET
                name       = COALESCE($2, name),
                email      = COALESCE($3, email),
                phone      = COALESCE($4, phone),
                address    = COALESCE($5, address),
                logo       = COALESCE($6, logo),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .bind(&patch.name)
            .bind(&patch.email)
            .bind(&patch.phone)
            .bind(&patch.address)
            .bind(&patch.logo)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(|e| match AppError::from(e) {
                AppError::Conflict { .. } => {
                    AppError::conflict("Email already in use", json!({ "email": patch.email }))
                }
                other => other,
            })?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": id })))?
            .try_into()
    }

    async fn set_role(&self, id: i64, role: Role) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET role = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(role.as_str())
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, AppError> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"
        );

        sqlx::query_as::<_, UserRow>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool.as_ref())
            .await?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
