//! DTOs shared by the product and service endpoints.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

use crate::domain::entities::{Listing, ListingFilter, ListingKind, ListingPatch};

use super::non_blank;

#[derive(Debug, Serialize)]
pub struct ListingResponse {
    pub id: i64,
    pub kind: ListingKind,
    pub seller_id: i64,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: Option<String>,
    pub quantity: Option<i32>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Listing> for ListingResponse {
    fn from(l: Listing) -> Self {
        Self {
            id: l.id,
            kind: l.kind,
            seller_id: l.seller_id,
            name: l.name,
            price: l.price,
            category: l.category,
            quantity: l.quantity,
            description: l.description,
            image_url: l.image_url,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

/// Query string for the public catalogue.
///
/// `GET /api/v1/products?category=Home%20%26%20Kitchen&search=pot&min_price=10`
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub min_price: Option<Decimal>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub max_price: Option<Decimal>,
}

impl From<ListingQuery> for ListingFilter {
    fn from(q: ListingQuery) -> Self {
        ListingFilter {
            category: non_blank(q.category),
            search: non_blank(q.search),
            min_price: q.min_price,
            max_price: q.max_price,
        }
    }
}

/// JSON partial update. Prices are accepted as numbers or numeric strings.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateListingRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: Option<i32>,
    pub description: Option<String>,
}

impl From<UpdateListingRequest> for ListingPatch {
    fn from(r: UpdateListingRequest) -> Self {
        ListingPatch {
            name: r.name.map(|n| n.trim().to_string()),
            price: r.price,
            category: non_blank(r.category),
            quantity: r.quantity,
            description: non_blank(r.description),
            image_url: None,
        }
    }
}
