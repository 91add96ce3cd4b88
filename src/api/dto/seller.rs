//! DTOs for store profiles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{
    Location, Seller, SellerOwner, SellerPatch, SellerProfile, SellerSearch,
};

use super::non_blank;

#[derive(Debug, Serialize)]
pub struct SellerResponse {
    pub id: i64,
    pub user_id: i64,
    pub store_name: String,
    pub description: Option<String>,
    pub location: Location,
    pub phone: Option<String>,
    pub email: String,
    pub store_logo: Option<String>,
    pub business_category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Seller> for SellerResponse {
    fn from(s: Seller) -> Self {
        Self {
            id: s.id,
            user_id: s.user_id,
            store_name: s.store_name,
            description: s.description,
            location: s.location,
            phone: s.phone,
            email: s.email,
            store_logo: s.store_logo,
            business_category: s.business_category,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

/// Seller with its owner's public details.
#[derive(Debug, Serialize)]
pub struct SellerWithOwner {
    #[serde(flatten)]
    pub seller: SellerResponse,
    pub owner: SellerOwner,
}

impl From<SellerProfile> for SellerWithOwner {
    fn from(p: SellerProfile) -> Self {
        Self {
            seller: p.seller.into(),
            owner: p.owner,
        }
    }
}

/// Owner summary embedded in [`CombinedSellerProfile`].
#[derive(Debug, Serialize)]
pub struct OwnerSummary {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
}

/// Storefront view: seller fields plus a trimmed `user` object.
#[derive(Debug, Serialize)]
pub struct CombinedSellerProfile {
    pub id: i64,
    pub store_name: String,
    pub description: Option<String>,
    pub store_logo: Option<String>,
    pub business_category: Option<String>,
    pub location: Location,
    pub phone: Option<String>,
    pub email: String,
    pub user: OwnerSummary,
}

impl From<SellerProfile> for CombinedSellerProfile {
    fn from(p: SellerProfile) -> Self {
        let SellerProfile { seller, owner } = p;
        Self {
            id: seller.id,
            store_name: seller.store_name,
            description: seller.description,
            store_logo: seller.store_logo,
            business_category: seller.business_category,
            location: seller.location,
            phone: seller.phone,
            email: seller.email,
            user: OwnerSummary {
                id: owner.id,
                name: owner.name,
                address: owner.address,
            },
        }
    }
}

/// JSON body for `PUT /api/v1/sellers/edit/profile`. Absent fields are kept.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateSellerRequest {
    #[validate(length(min = 1, max = 120, message = "Store name must be 1-120 characters"))]
    pub store_name: Option<String>,
    pub description: Option<String>,
    pub location: Option<Location>,
    pub phone: Option<String>,
    pub business_category: Option<String>,
}

impl From<UpdateSellerRequest> for SellerPatch {
    fn from(r: UpdateSellerRequest) -> Self {
        SellerPatch {
            store_name: r.store_name.map(|s| s.trim().to_string()),
            description: non_blank(r.description),
            location: r.location,
            phone: non_blank(r.phone),
            store_logo: None,
            business_category: non_blank(r.business_category),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
}

impl From<SearchParams> for SellerSearch {
    fn from(p: SearchParams) -> Self {
        SellerSearch {
            query: non_blank(p.query),
            location: non_blank(p.location),
            category: non_blank(p.category),
        }
    }
}
