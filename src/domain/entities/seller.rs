//! Seller (store) profile entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a store is located. Every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: Option<String>,
    pub state: Option<String>,
    /// `[longitude, latitude]`
    pub coordinates: Option<[f64; 2]>,
}

/// Store profile owned by exactly one user.
#[derive(Debug, Clone)]
pub struct Seller {
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

/// Public details of the user that owns a store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SellerOwner {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: Option<String>,
}

/// A seller joined with its owning user.
#[derive(Debug, Clone)]
pub struct SellerProfile {
    pub seller: Seller,
    pub owner: SellerOwner,
}

/// Input data for creating a seller profile.
#[derive(Debug, Clone)]
pub struct NewSeller {
    pub user_id: i64,
    pub store_name: String,
    pub description: Option<String>,
    pub location: Location,
    pub phone: Option<String>,
    pub email: String,
    pub store_logo: Option<String>,
    pub business_category: Option<String>,
}

/// Partial seller update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct SellerPatch {
    pub store_name: Option<String>,
    pub description: Option<String>,
    pub location: Option<Location>,
    pub phone: Option<String>,
    pub store_logo: Option<String>,
    pub business_category: Option<String>,
}

/// Filters for seller search. Each present filter is a case-insensitive
/// substring match; all present filters must match.
#[derive(Debug, Clone, Default)]
pub struct SellerSearch {
    pub query: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
}

impl SellerSearch {
    /// In-process evaluation of the filter, mirroring the SQL used by the
    /// Postgres repository.
    pub fn matches(&self, seller: &Seller) -> bool {
        fn contains(haystack: Option<&str>, needle: &str) -> bool {
            haystack
                .map(|h| h.to_lowercase().contains(&needle.to_lowercase()))
                .unwrap_or(false)
        }

        if let Some(q) = &self.query
            && !contains(Some(&seller.store_name), q)
        {
            return false;
        }

        if let Some(loc) = &self.location
            && !contains(seller.location.city.as_deref(), loc)
            && !contains(seller.location.state.as_deref(), loc)
        {
            return false;
        }

        if let Some(cat) = &self.category
            && !contains(seller.business_category.as_deref(), cat)
        {
            return false;
        }

        true
    }
}
