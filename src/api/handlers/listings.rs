//! Request handling shared by the product and service endpoints.
//!
//! The public handlers in [`super::products`] and [`super::services`] pick
//! the [`ListingService`] for their kind and delegate here.

use axum::{Json, extract::Multipart, http::StatusCode};
use serde_json::json;

use crate::api::dto::ApiResponse;
use crate::api::dto::listing::{ListingQuery, ListingResponse};
use crate::api::multipart::{MAX_LISTING_IMAGE_BYTES, MultipartForm};
use crate::application::services::ListingService;
use crate::application::services::listing_service::ListingDraft;
use crate::domain::entities::{AuthUser, ListingPatch};
use crate::error::AppError;

pub type ListingJson = Json<ApiResponse<ListingResponse>>;
pub type ListingsJson = Json<ApiResponse<Vec<ListingResponse>>>;

async fn read_form(
    service: &ListingService,
    multipart: Multipart,
) -> Result<MultipartForm, AppError> {
    MultipartForm::read(multipart, service.kind().image_field(), MAX_LISTING_IMAGE_BYTES).await
}

pub(super) async fn create(
    service: &ListingService,
    caller: AuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, ListingJson), AppError> {
    let mut form = read_form(service, multipart).await?;

    let (Some(name), Some(price)) = (form.text("name"), form.decimal("price")?) else {
        return Err(AppError::bad_request(
            "Name and price are required",
            json!({ "fields": ["name", "price"] }),
        ));
    };

    let draft = ListingDraft {
        name,
        price,
        category: form.text("category"),
        quantity: form.integer("quantity")?,
        description: form.text("description"),
    };

    let listing = service.create(caller, draft, form.take_image()).await?;
    let message = format!("{} created successfully", service.kind().label());

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(message, listing.into())),
    ))
}

pub(super) async fn update(
    service: &ListingService,
    caller: AuthUser,
    id: i64,
    patch: ListingPatch,
    form: Option<MultipartForm>,
) -> Result<ListingJson, AppError> {
    let image = form.and_then(|mut f| f.take_image());
    let listing = service.update(caller, id, patch, image).await?;
    let message = format!("{} updated successfully", service.kind().label());

    Ok(Json(ApiResponse::new(message, listing.into())))
}

/// Partial update read from multipart text parts plus an optional image.
pub(super) async fn update_from_form(
    service: &ListingService,
    caller: AuthUser,
    id: i64,
    multipart: Multipart,
) -> Result<ListingJson, AppError> {
    let form = read_form(service, multipart).await?;

    let patch = ListingPatch {
        name: form.text("name"),
        price: form.decimal("price")?,
        category: form.text("category"),
        quantity: form.integer("quantity")?,
        description: form.text("description"),
        image_url: None,
    };

    update(service, caller, id, patch, Some(form)).await
}

pub(super) async fn delete(
    service: &ListingService,
    caller: AuthUser,
    id: i64,
) -> Result<Json<ApiResponse<()>>, AppError> {
    service.delete(caller, id).await?;

    Ok(Json(ApiResponse::message(format!(
        "{} deleted successfully",
        service.kind().label()
    ))))
}

pub(super) async fn get(service: &ListingService, id: i64) -> Result<ListingJson, AppError> {
    let listing = service.get(id).await?;

    Ok(Json(ApiResponse::new(
        format!("{} retrieved successfully", service.kind().label()),
        listing.into(),
    )))
}

pub(super) async fn list(
    service: &ListingService,
    query: ListingQuery,
) -> Result<ListingsJson, AppError> {
    let listings = service.list(query.into()).await?;

    Ok(Json(ApiResponse::new(
        format!("{}s retrieved successfully", service.kind().label()),
        listings.into_iter().map(Into::into).collect(),
    )))
}

pub(super) async fn list_by_seller(
    service: &ListingService,
    seller_id: i64,
) -> Result<ListingsJson, AppError> {
    let listings = service.list_by_seller(seller_id).await?;

    Ok(Json(ApiResponse::new(
        format!("{}s retrieved successfully", service.kind().label()),
        listings.into_iter().map(Into::into).collect(),
    )))
}
