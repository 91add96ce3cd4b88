//! Product and service listings.
//!
//! Products and services share one shape and differ only in their category
//! vocabulary, storage table, and upload folder, all of which hang off
//! [`ListingKind`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

const PRODUCT_CATEGORIES: &[&str] = &[
    "Groceries & Essentials",
    "Fresh & Perishables",
    "Fashion & Clothing",
    "Home & Kitchen",
    "Building Materials & Hardware",
    "Electronics & Gadgets",
    "Automobile & Parts",
    "Health & Beauty",
    "Toys, Baby & Kids",
    "Sports & Fitness",
    "Books, Stationery & Office",
];

const SERVICE_CATEGORIES: &[&str] = &[
    "Hair Stylist",
    "Fashion Designer",
    "Caterer",
    "Plumber",
    "Mechanic",
    "Photographer",
    "Electrician",
    "Makeup Artist",
    "Barber",
    "Cleaner",
    "Car Wash",
    "Other",
];

/// Which kind of listing a record is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Product,
    Service,
}

impl ListingKind {
    /// Allowed category names.
    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            Self::Product => PRODUCT_CATEGORIES,
            Self::Service => SERVICE_CATEGORIES,
        }
    }

    pub fn is_valid_category(&self, category: &str) -> bool {
        self.categories().contains(&category)
    }

    /// Table holding this kind of listing.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Product => "products",
            Self::Service => "services",
        }
    }

    /// Media folder uploaded images are stored under.
    pub fn media_folder(&self) -> &'static str {
        match self {
            Self::Product => "tradelink/products",
            Self::Service => "services",
        }
    }

    /// Multipart field carrying the listing image.
    pub fn image_field(&self) -> &'static str {
        match self {
            Self::Product => "product_img",
            Self::Service => "service_img",
        }
    }

    /// Capitalized noun used in user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Product => "Product",
            Self::Service => "Service",
        }
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Product => f.write_str("product"),
            Self::Service => f.write_str("service"),
        }
    }
}

/// A product or service offered by a seller.
#[derive(Debug, Clone)]
pub struct Listing {
    pub id: i64,
    pub kind: ListingKind,
    pub seller_id: i64,
    pub name: String,
    pub price: Decimal,
    pub category: Option<String>,
    pub quantity: Option<i32>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating a listing.
#[derive(Debug, Clone)]
pub struct NewListing {
    pub kind: ListingKind,
    pub seller_id: i64,
    pub name: String,
    pub price: Decimal,
    pub category: Option<String>,
    pub quantity: Option<i32>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Partial listing update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ListingPatch {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub quantity: Option<i32>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Public catalogue filters.
#[derive(Debug, Clone, Default)]
pub struct ListingFilter {
    pub category: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl ListingFilter {
    /// In-process evaluation of the filter, mirroring the SQL used by the
    /// Postgres repository.
    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(cat) = &self.category
            && listing.category.as_deref() != Some(cat.as_str())
        {
            return false;
        }
        if let Some(search) = &self.search
            && !listing
                .name
                .to_lowercase()
                .contains(&search.to_lowercase())
        {
            return false;
        }
        if let Some(min) = self.min_price
            && listing.price < min
        {
            return false;
        }
        if let Some(max) = self.max_price
            && listing.price > max
        {
            return false;
        }
        true
    }
}
