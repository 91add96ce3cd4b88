//! Handlers for service endpoints.
//!
//! Same rules as products; updates arrive as multipart so the image can be
//! replaced in the same request.

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};

use super::listings::{self, ListingJson, ListingsJson};
use crate::api::dto::ApiResponse;
use crate::api::dto::listing::ListingQuery;
use crate::api::extract::{ApiPath, ApiQuery};
use crate::domain::entities::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// `POST /api/v1/services/create` (multipart, image part `service_img`)
pub async fn create_service_handler(
    State(state): State<AppState>,
    caller: AuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, ListingJson), AppError> {
    listings::create(&state.service_service, caller, multipart).await
}

/// `PUT /api/v1/services/edit/{service_id}` (multipart)
pub async fn update_service_handler(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<i64>,
    multipart: Multipart,
) -> Result<ListingJson, AppError> {
    listings::update_from_form(&state.service_service, caller, id, multipart).await
}

/// `DELETE /api/v1/services/delete/{service_id}`
pub async fn delete_service_handler(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    listings::delete(&state.service_service, caller, id).await
}

/// `GET /api/v1/services/get/by/{service_id}`
pub async fn get_service_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<ListingJson, AppError> {
    listings::get(&state.service_service, id).await
}

/// `GET /api/v1/services/all?category=&search=&min_price=&max_price=`
pub async fn list_services_handler(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListingQuery>,
) -> Result<ListingsJson, AppError> {
    listings::list(&state.service_service, query).await
}

/// `GET /api/v1/services/seller/{seller_id}`
pub async fn seller_services_handler(
    State(state): State<AppState>,
    ApiPath(seller_id): ApiPath<i64>,
) -> Result<ListingsJson, AppError> {
    listings::list_by_seller(&state.service_service, seller_id).await
}
