//! PostgreSQL implementation of the seller repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{
    Location, NewSeller, Seller, SellerOwner, SellerPatch, SellerProfile, SellerSearch,
};
use crate::domain::repositories::SellerRepository;
use crate::error::AppError;

use super::like_pattern;

const SELLER_COLUMNS: &str = "s.id, s.user_id, s.store_name, s.description, s.city, s.state, \
    s.longitude, s.latitude, s.phone, s.email, s.store_logo, s.business_category, \
    s.created_at, s.updated_at";

const OWNER_COLUMNS: &str =
    "u.id AS owner_id, u.name AS owner_name, u.email AS owner_email, u.address AS owner_address";

#[derive(FromRow)]
struct SellerRow {
    id: i64,
    user_id: i64,
    store_name: String,
    description: Option<String>,
    city: Option<String>,
    state: Option<String>,
    longitude: Option<f64>,
    latitude: Option<f64>,
    phone: Option<String>,
    email: String,
    store_logo: Option<String>,
    business_category: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct SellerProfileRow {
    #[sqlx(flatten)]
    seller: SellerRow,
    owner_id: i64,
    owner_name: String,
    owner_email: String,
    owner_address: Option<String>,
}

impl From<SellerRow> for Seller {
    fn from(r: SellerRow) -> Self {
        let coordinates = match (r.longitude, r.latitude) {
            (Some(lng), Some(lat)) => Some([lng, lat]),
            _ => None,
        };

        Seller {
            id: r.id,
            user_id: r.user_id,
            store_name: r.store_name,
            description: r.description,
            location: Location {
                city: r.city,
                state: r.state,
                coordinates,
            },
            phone: r.phone,
            email: r.email,
            store_logo: r.store_logo,
            business_category: r.business_category,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

impl From<SellerProfileRow> for SellerProfile {
    fn from(r: SellerProfileRow) -> Self {
        SellerProfile {
            seller: r.seller.into(),
            owner: SellerOwner {
                id: r.owner_id,
                name: r.owner_name,
                email: r.owner_email,
                address: r.owner_address,
            },
        }
    }
}

/// Splits optional `[longitude, latitude]` into two nullable columns.
fn split_coordinates(location: Option<&Location>) -> (Option<f64>, Option<f64>) {
    match location.and_then(|l| l.coordinates) {
        Some([lng, lat]) => (Some(lng), Some(lat)),
        None => (None, None),
    }
}

/// PostgreSQL repository for seller profiles.
pub struct PgSellerRepository {
    pool: Arc<PgPool>,
}

impl PgSellerRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SellerRepository for PgSellerRepository {
    async fn create(&self, new_seller: NewSeller) -> Result<Seller, AppError> {
        let (longitude, latitude) = split_coordinates(Some(&new_seller.location));
        let sql = format!(
            r#"
            INSERT INTO sellers AS s (user_id, store_name, description, city, state,
                                      longitude, latitude, phone, email, store_logo,
                                      business_category)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {SELLER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, SellerRow>(&sql)
            .bind(new_seller.user_id)
            .bind(&new_seller.store_name)
            .bind(&new_seller.description)
            .bind(&new_seller.location.city)
            .bind(&new_seller.location.state)
            .bind(longitude)
            .bind(latitude)
            .bind(&new_seller.phone)
            .bind(&new_seller.email)
            .bind(&new_seller.store_logo)
            .bind(&new_seller.business_category)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| match AppError::from(e) {
                AppError::Conflict { .. } => AppError::conflict(
                    "Seller profile already exists",
                    json!({ "user_id": new_seller.user_id }),
                ),
                other => other,
            })?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<SellerProfile>, AppError> {
        let sql = format!(
            "SELECT {SELLER_COLUMNS}, {OWNER_COLUMNS} FROM sellers s \
             JOIN users u ON u.id = s.user_id WHERE s.id = $1"
        );

        let row = sqlx::query_as::<_, SellerProfileRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_user_id(&self, user_id: i64) -> Result<Option<Seller>, AppError> {
        let sql = format!("SELECT {SELLER_COLUMNS} FROM sellers s WHERE s.user_id = $1");

        let row = sqlx::query_as::<_, SellerRow>(&sql)
            .bind(user_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn update_by_user(
        &self,
        user_id: i64,
        patch: SellerPatch,
    ) -> Result<Option<Seller>, AppError> {
        let (longitude, latitude) = split_coordinates(patch.location.as_ref());
        let (city, state) = match &patch.location {
            Some(l) => (l.city.clone(), l.state.clone()),
            None => (None, None),
        };

        let sql = format!(
            r#"
            UPDATE sellers AS s SET
                store_name        = COALESCE($2, s.store_name),
                description       = COALESCE($3, s.description),
                city              = COALESCE($4, s.city),
                state             = COALESCE($5, s.state),
                longitude         = COALESCE($6, s.longitude),
                latitude          = COALESCE($7, s.latitude),
                phone             = COALESCE($8, s.phone),
                store_logo        = COALESCE($9, s.store_logo),
                business_category = COALESCE($10, s.business_category),
                updated_at        = NOW()
            WHERE s.user_id = $1
            RETURNING {SELLER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, SellerRow>(&sql)
            .bind(user_id)
            .bind(&patch.store_name)
            .bind(&patch.description)
            .bind(city)
            .bind(state)
            .bind(longitude)
            .bind(latitude)
            .bind(&patch.phone)
            .bind(&patch.store_logo)
            .bind(&patch.business_category)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn delete_by_user(&self, user_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM sellers WHERE user_id = $1")
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<SellerProfile>, AppError> {
        let sql = format!(
            "SELECT {SELLER_COLUMNS}, {OWNER_COLUMNS} FROM sellers s \
             JOIN users u ON u.id = s.user_id ORDER BY s.created_at DESC, s.id DESC"
        );

        let rows = sqlx::query_as::<_, SellerProfileRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn search(&self, search: SellerSearch) -> Result<Vec<SellerProfile>, AppError> {
        let sql = format!(
            r#"
            SELECT {SELLER_COLUMNS}, {OWNER_COLUMNS}
            FROM sellers s
            JOIN users u ON u.id = s.user_id
            WHERE ($1::TEXT IS NULL OR s.store_name ILIKE $1)
              AND ($2::TEXT IS NULL OR s.city ILIKE $2 OR s.state ILIKE $2)
              AND ($3::TEXT IS NULL OR s.business_category ILIKE $3)
            ORDER BY s.created_at DESC, s.id DESC
            "#
        );

        let rows = sqlx::query_as::<_, SellerProfileRow>(&sql)
            .bind(search.query.as_deref().map(like_pattern))
            .bind(search.location.as_deref().map(like_pattern))
            .bind(search.category.as_deref().map(like_pattern))
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
