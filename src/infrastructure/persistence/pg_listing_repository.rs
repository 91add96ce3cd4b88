//! PostgreSQL implementation of the listing repository.
//!
//! Products and services live in two tables with identical columns. The table
//! name is taken from [`ListingKind::table`], never from request input.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Listing, ListingFilter, ListingKind, ListingPatch, NewListing};
use crate::domain::repositories::ListingRepository;
use crate::error::AppError;

use super::like_pattern;

const LISTING_COLUMNS: &str = "id, seller_id, name, price, category, quantity, description, \
    image_url, created_at, updated_at";

#[derive(FromRow)]
struct ListingRow {
    id: i64,
    seller_id: i64,
    name: String,
    price: Decimal,
    category: Option<String>,
    quantity: Option<i32>,
    description: Option<String>,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ListingRow {
    fn into_listing(self, kind: ListingKind) -> Listing {
        Listing {
            id: self.id,
            kind,
            seller_id: self.seller_id,
            name: self.name,
            price: self.price,
            category: self.category,
            quantity: self.quantity,
            description: self.description,
            image_url: self.image_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// PostgreSQL repository for products and services.
pub struct PgListingRepository {
    pool: Arc<PgPool>,
}

impl PgListingRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingRepository for PgListingRepository {
    async fn create(&self, new_listing: NewListing) -> Result<Listing, AppError> {
        let kind = new_listing.kind;
        let sql = format!(
            r#"
            INSERT INTO {table} (seller_id, name, price, category, quantity, description, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {LISTING_COLUMNS}
            "#,
            table = kind.table()
        );

        let row = sqlx::query_as::<_, ListingRow>(&sql)
            .bind(new_listing.seller_id)
            .bind(&new_listing.name)
            .bind(new_listing.price)
            .bind(&new_listing.category)
            .bind(new_listing.quantity)
            .bind(&new_listing.description)
            .bind(&new_listing.image_url)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into_listing(kind))
    }

    async fn find_by_id(&self, kind: ListingKind, id: i64) -> Result<Option<Listing>, AppError> {
        let sql = format!(
            "SELECT {LISTING_COLUMNS} FROM {table} WHERE id = $1",
            table = kind.table()
        );

        let row = sqlx::query_as::<_, ListingRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(|r| r.into_listing(kind)))
    }

    async fn list(
        &self,
        kind: ListingKind,
        filter: ListingFilter,
    ) -> Result<Vec<Listing>, AppError> {
        let sql = format!(
            r#"
            SELECT {LISTING_COLUMNS}
            FROM {table}
            WHERE ($1::TEXT IS NULL OR category = $1)
              AND ($2::TEXT IS NULL OR name ILIKE $2)
              AND ($3::NUMERIC IS NULL OR price >= $3)
              AND ($4::NUMERIC IS NULL OR price <= $4)
            ORDER BY created_at DESC, id DESC
            "#,
            table = kind.table()
        );

        let rows = sqlx::query_as::<_, ListingRow>(&sql)
            .bind(&filter.category)
            .bind(filter.search.as_deref().map(like_pattern))
            .bind(filter.min_price)
            .bind(filter.max_price)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(|r| r.into_listing(kind)).collect())
    }

    async fn list_by_seller(
        &self,
        kind: ListingKind,
        seller_id: i64,
    ) -> Result<Vec<Listing>, AppError> {
        let sql = format!(
            "SELECT {LISTING_COLUMNS} FROM {table} WHERE seller_id = $1 \
             ORDER BY created_at DESC, id DESC",
            table = kind.table()
        );

        let rows = sqlx::query_as::<_, ListingRow>(&sql)
            .bind(seller_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(|r| r.into_listing(kind)).collect())
    }

    async fn update(
        &self,
        kind: ListingKind,
        id: i64,
        patch: ListingPatch,
    ) -> Result<Listing, AppError> {
        let sql = format!(
            r#"
            UPDATE {table} SET
                name        = COALESCE($2, name),
                price       = COALESCE($3, price),
                category    = COALESCE($4, category),
                quantity    = COALESCE($5, quantity),
                description = COALESCE($6, description),
                image_url   = COALESCE($7, image_url),
                updated_at  = NOW()
            WHERE id = $1
            RETURNING {LISTING_COLUMNS}
            "#,
            table = kind.table()
        );

        let row = sqlx::query_as::<_, ListingRow>(&sql)
            .bind(id)
            .bind(&patch.name)
            .bind(patch.price)
            .bind(&patch.category)
            .bind(patch.quantity)
            .bind(&patch.description)
            .bind(&patch.image_url)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("{} not found", kind.label()), json!({ "id": id }))
            })?;

        Ok(row.into_listing(kind))
    }

    async fn delete(&self, kind: ListingKind, id: i64) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {table} WHERE id = $1", table = kind.table());

        let result = sqlx::query(&sql)
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
