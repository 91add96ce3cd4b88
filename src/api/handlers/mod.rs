//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod health;
mod listings;
pub mod messages;
pub mod products;
pub mod sellers;
pub mod services;
pub mod users;

pub use auth::{
    forgot_password_handler, login_handler, logout_handler, register_handler,
    resend_verification_handler, reset_password_handler, verify_email_handler,
};
pub use health::{health_handler, root_handler};
pub use messages::{
    conversation_handler, conversations_handler, delete_message_handler, mark_read_handler,
    send_message_handler,
};
pub use products::{
    create_product_handler, delete_product_handler, get_product_handler, list_products_handler,
    seller_products_handler, update_product_handler,
};
pub use sellers::{
    combined_seller_profile_handler, delete_seller_profile_handler, get_seller_profile_handler,
    list_sellers_handler, search_sellers_handler, update_seller_profile_handler,
    upsert_seller_profile_handler,
};
pub use services::{
    create_service_handler, delete_service_handler, get_service_handler, list_services_handler,
    seller_services_handler, update_service_handler,
};
pub use users::{
    change_password_handler, delete_profile_handler, get_profile_handler, update_profile_handler,
};
