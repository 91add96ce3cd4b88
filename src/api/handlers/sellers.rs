//! Handlers for store profiles.

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::ApiResponse;
use crate::api::dto::seller::{
    CombinedSellerProfile, SearchParams, SellerResponse, SellerWithOwner, UpdateSellerRequest,
};
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::api::multipart::{MAX_LOGO_BYTES, MultipartForm};
use crate::application::services::seller_service::SellerDraft;
use crate::domain::entities::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/v1/sellers/get/profile/{id}`
pub async fn get_seller_profile_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<SellerWithOwner>>, AppError> {
    let profile = state.seller_service.get_profile(id).await?;

    Ok(Json(ApiResponse::new(
        "Seller profile retrieved successfully",
        profile.into(),
    )))
}

/// Partially updates the caller's store from a JSON body.
///
/// `PUT /api/v1/sellers/edit/profile`
pub async fn update_seller_profile_handler(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiJson(payload): ApiJson<UpdateSellerRequest>,
) -> Result<Json<ApiResponse<SellerResponse>>, AppError> {
    payload.validate()?;

    let seller = state
        .seller_service
        .update_profile(caller.id, payload.into())
        .await?;

    Ok(Json(ApiResponse::new(
        "Seller profile updated successfully",
        seller.into(),
    )))
}

/// Creates or updates the caller's store from a multipart form.
///
/// # Endpoint
///
/// `PUT /api/v1/sellers/profile`
///
/// Text parts: `store_name`, `description`, `phone`, `business_category`,
/// and either a JSON `location` part or `city`/`state`/`longitude`/`latitude`.
/// File part: `store_logo` (at most 2 MiB).
///
/// # Response Codes
///
/// - **201 Created**: a new store was created and the account promoted to seller
/// - **200 OK**: the existing store was updated
pub async fn upsert_seller_profile_handler(
    State(state): State<AppState>,
    caller: AuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<SellerResponse>>), AppError> {
    let mut form = MultipartForm::read(multipart, "store_logo", MAX_LOGO_BYTES).await?;

    let draft = SellerDraft {
        store_name: form.text("store_name"),
        description: form.text("description"),
        location: form.location()?,
        phone: form.text("phone"),
        business_category: form.text("business_category"),
    };

    let upserted = state
        .seller_service
        .upsert_full_profile(caller.id, draft, form.take_image())
        .await?;

    let (status, message) = if upserted.created {
        (StatusCode::CREATED, "Seller profile created successfully")
    } else {
        (StatusCode::OK, "Seller profile updated successfully")
    };

    Ok((
        status,
        Json(ApiResponse::new(message, upserted.seller.into())),
    ))
}

/// `DELETE /api/v1/sellers/delete/profile`
pub async fn delete_seller_profile_handler(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.seller_service.delete_profile(caller.id).await?;

    Ok(Json(ApiResponse::message(
        "Seller profile deleted successfully",
    )))
}

/// `GET /api/v1/sellers/get/all/sellers`
pub async fn list_sellers_handler(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<SellerWithOwner>>>, AppError> {
    let sellers = state.seller_service.list_all().await?;

    Ok(Json(ApiResponse::new(
        "Sellers retrieved successfully",
        sellers.into_iter().map(Into::into).collect(),
    )))
}

/// Searches stores by name, city or state, and business category.
///
/// `GET /api/v1/sellers/search?query=kitchen&location=lagos&category=food`
pub async fn search_sellers_handler(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> Result<Json<ApiResponse<Vec<SellerWithOwner>>>, AppError> {
    let sellers = state.seller_service.search(params.into()).await?;

    Ok(Json(ApiResponse::new(
        "Sellers retrieved successfully",
        sellers.into_iter().map(Into::into).collect(),
    )))
}

/// `GET /api/v1/sellers/{seller_id}`
pub async fn combined_seller_profile_handler(
    State(state): State<AppState>,
    ApiPath(seller_id): ApiPath<i64>,
) -> Result<Json<ApiResponse<CombinedSellerProfile>>, AppError> {
    let profile = state.seller_service.get_profile(seller_id).await?;

    Ok(Json(ApiResponse::new(
        "Seller profile retrieved successfully",
        profile.into(),
    )))
}
