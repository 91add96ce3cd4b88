//! Handlers for product endpoints.

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use validator::Validate;

use super::listings::{self, ListingJson, ListingsJson};
use crate::api::dto::ApiResponse;
use crate::api::dto::listing::{ListingQuery, UpdateListingRequest};
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::domain::entities::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a product for the caller's store.
///
/// # Endpoint
///
/// `POST /api/v1/products/create` (multipart)
///
/// Text parts: `name` and `price` (required), `category`, `quantity`,
/// `description`. File part: `product_img` (at most 5 MiB).
///
/// # Errors
///
/// Returns 403 if the caller is not a seller.
/// Returns 404 if the seller has no store profile yet.
pub async fn create_product_handler(
    State(state): State<AppState>,
    caller: AuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, ListingJson), AppError> {
    listings::create(&state.product_service, caller, multipart).await
}

/// Partially updates a product from a JSON body. Owner or admin only.
///
/// `PUT /api/v1/products/{product_id}`
pub async fn update_product_handler(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateListingRequest>,
) -> Result<ListingJson, AppError> {
    payload.validate()?;
    listings::update(&state.product_service, caller, id, payload.into(), None).await
}

/// `DELETE /api/v1/products/{product_id}`
pub async fn delete_product_handler(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    listings::delete(&state.product_service, caller, id).await
}

/// `GET /api/v1/products/{product_id}`
pub async fn get_product_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<ListingJson, AppError> {
    listings::get(&state.product_service, id).await
}

/// Public catalogue, newest first.
///
/// `GET /api/v1/products?category=&search=&min_price=&max_price=`
pub async fn list_products_handler(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListingQuery>,
) -> Result<ListingsJson, AppError> {
    listings::list(&state.product_service, query).await
}

/// `GET /api/v1/products/seller/{seller_id}`
pub async fn seller_products_handler(
    State(state): State<AppState>,
    ApiPath(seller_id): ApiPath<i64>,
) -> Result<ListingsJson, AppError> {
    listings::list_by_seller(&state.product_service, seller_id).await
}
