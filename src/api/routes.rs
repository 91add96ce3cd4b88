//! API route configuration for `/api/v1`.
//!
//! Authenticated routes carry [`crate::api::middleware::auth::layer`] as a
//! route layer, so public and protected methods can share a path (for
//! example `GET` and `PUT /products/{product_id}`).

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, patch, post, put},
};

use crate::api::handlers::{
    change_password_handler, combined_seller_profile_handler, conversation_handler,
    conversations_handler, create_product_handler, create_service_handler,
    delete_message_handler, delete_product_handler, delete_profile_handler,
    delete_seller_profile_handler, delete_service_handler, forgot_password_handler,
    get_product_handler, get_profile_handler, get_seller_profile_handler, get_service_handler,
    list_products_handler, list_sellers_handler, list_services_handler, login_handler,
    logout_handler, mark_read_handler, register_handler, resend_verification_handler,
    reset_password_handler, search_sellers_handler, seller_products_handler,
    seller_services_handler, send_message_handler, update_product_handler,
    update_profile_handler, update_seller_profile_handler, update_service_handler,
    upsert_seller_profile_handler, verify_email_handler,
};
use crate::api::middleware::auth;
use crate::api::middleware::rate_limit::RateLimitLayer;
use crate::state::AppState;

/// Request body ceiling; leaves room for a 5 MiB image plus form fields.
pub const BODY_LIMIT_BYTES: usize = 6 * 1024 * 1024;

/// All `/api/v1` routes.
///
/// `auth_limiter`, when given, is applied to every `/auth` route.
///
/// # Endpoints
///
/// - `/auth`     - register, verify-email, resend-verification, login, logout,
///   forgot/reset password
/// - `/users`    - own account (Bearer)
/// - `/sellers`  - store profiles (Bearer)
/// - `/products` - public catalogue; create/update/delete need Bearer
/// - `/services` - public catalogue; create/edit/delete need Bearer
/// - `/messages` - direct messages (Bearer)
pub fn v1_routes(state: AppState, auth_limiter: Option<RateLimitLayer>) -> Router<AppState> {
    let mut auth_router = auth_routes().merge(
        Router::new()
            .route("/logout", post(logout_handler))
            .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer)),
    );
    if let Some(limiter) = auth_limiter {
        auth_router = auth_router.layer(limiter);
    }

    let products = public_product_routes().merge(
        protected_product_routes()
            .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer)),
    );

    let services = public_service_routes().merge(
        protected_service_routes()
            .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer)),
    );

    Router::new()
        .nest("/auth", auth_router)
        .nest(
            "/users",
            user_routes().route_layer(middleware::from_fn_with_state(state.clone(), auth::layer)),
        )
        .nest(
            "/sellers",
            seller_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer)),
        )
        .nest("/products", products)
        .nest("/services", services)
        .nest(
            "/messages",
            message_routes().route_layer(middleware::from_fn_with_state(state, auth::layer)),
        )
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_handler))
        .route("/verify-email/{token}", get(verify_email_handler))
        .route("/resend-verification", post(resend_verification_handler))
        .route("/login", post(login_handler))
        .route("/forgot-password", post(forgot_password_handler))
        .route("/reset-password", post(reset_password_handler))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/get/profile", get(get_profile_handler))
        .route("/profile/update", put(update_profile_handler))
        .route("/profile/delete", delete(delete_profile_handler))
        .route("/change-password", put(change_password_handler))
}

fn seller_routes() -> Router<AppState> {
    Router::new()
        .route("/get/profile/{id}", get(get_seller_profile_handler))
        .route("/edit/profile", put(update_seller_profile_handler))
        .route("/profile", put(upsert_seller_profile_handler))
        .route("/delete/profile", delete(delete_seller_profile_handler))
        .route("/get/all/sellers", get(list_sellers_handler))
        .route("/search", get(search_sellers_handler))
        .route("/{seller_id}", get(combined_seller_profile_handler))
}

fn public_product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products_handler))
        .route("/seller/{seller_id}", get(seller_products_handler))
        .route("/{product_id}", get(get_product_handler))
}

fn protected_product_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_product_handler))
        .route(
            "/{product_id}",
            put(update_product_handler).delete(delete_product_handler),
        )
}

fn public_service_routes() -> Router<AppState> {
    Router::new()
        .route("/all", get(list_services_handler))
        .route("/seller/{seller_id}", get(seller_services_handler))
        .route("/get/by/{service_id}", get(get_service_handler))
}

fn protected_service_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_service_handler))
        .route("/edit/{service_id}", put(update_service_handler))
        .route("/delete/{service_id}", delete(delete_service_handler))
}

fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/send", post(send_message_handler))
        .route("/conversation/{user_id}", get(conversation_handler))
        .route("/get/conversations", get(conversations_handler))
        .route("/read/{message_id}", patch(mark_read_handler))
        .route("/delete/{message_id}", delete(delete_message_handler))
}
