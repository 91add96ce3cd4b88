mod common;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use serde_json::{Value, json};
use tradelink::domain::entities::Role;

#[tokio::test]
async fn test_get_seller_profile_with_owner() {
    let app = common::create_test_app();
    let (user, seller) = app
        .create_seller("Bola", "bola@example.com", "Bola's Kitchen")
        .await;

    let response = app
        .server
        .get(&format!("/api/v1/sellers/get/profile/{}", seller.id))
        .authorization_bearer(app.token_for(&user))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["data"]["store_name"], "Bola's Kitchen");
    assert_eq!(body["data"]["owner"]["email"], "bola@example.com");
    assert_eq!(body["data"]["location"]["city"], "Lagos");
}

#[tokio::test]
async fn test_get_missing_seller() {
    let app = common::create_test_app();
    let user = app
        .create_user("Ada", "ada@example.com", Role::User, true)
        .await;

    let response = app
        .server
        .get("/api/v1/sellers/get/profile/999")
        .authorization_bearer(app.token_for(&user))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], "Seller not found");
}

#[tokio::test]
async fn test_edit_profile_merges_location() {
    let app = common::create_test_app();
    let (user, _) = app
        .create_seller("Bola", "bola@example.com", "Bola's Kitchen")
        .await;

    let response = app
        .server
        .put("/api/v1/sellers/edit/profile")
        .authorization_bearer(app.token_for(&user))
        .json(&json!({
            "description": "Home-cooked meals",
            "location": { "city": "Ikeja" }
        }))
        .await;

    response.assert_status_ok();
    let data = &response.json::<Value>()["data"];
    assert_eq!(data["store_name"], "Bola's Kitchen");
    assert_eq!(data["description"], "Home-cooked meals");
    assert_eq!(data["location"]["city"], "Ikeja");
    assert_eq!(data["location"]["state"], "Lagos State");
}

#[tokio::test]
async fn test_edit_profile_rejects_blank_store_name() {
    let app = common::create_test_app();
    let (user, _) = app
        .create_seller("Bola", "bola@example.com", "Bola's Kitchen")
        .await;

    app.server
        .put("/api/v1/sellers/edit/profile")
        .authorization_bearer(app.token_for(&user))
        .json(&json!({ "store_name": "" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_edit_profile_without_store() {
    let app = common::create_test_app();
    let user = app
        .create_user("Ada", "ada@example.com", Role::User, true)
        .await;

    app.server
        .put("/api/v1/sellers/edit/profile")
        .authorization_bearer(app.token_for(&user))
        .json(&json!({ "description": "Anything" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upsert_creates_store_and_promotes_user() {
    let app = common::create_test_app();
    let user = app
        .create_user("Ada", "ada@example.com", Role::User, true)
        .await;

    let form = MultipartForm::new()
        .add_text("store_name", "Ada Fabrics")
        .add_text("city", "Kano")
        .add_text("longitude", "8.52")
        .add_text("latitude", "12.0")
        .add_part(
            "store_logo",
            Part::bytes(b"RIFF....WEBP".to_vec())
                .file_name("logo.webp")
                .mime_type("image/webp"),
        );

    let response = app
        .server
        .put("/api/v1/sellers/profile")
        .authorization_bearer(app.token_for(&user))
        .multipart(form)
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["message"], "Seller profile created successfully");
    assert_eq!(body["data"]["email"], "ada@example.com");
    assert_eq!(body["data"]["store_logo"], "https://cdn.test/tradelink/logos/logo.webp");
    assert_eq!(body["data"]["location"]["coordinates"], json!([8.52, 12.0]));
    assert_eq!(app.db.user(user.id).unwrap().role, Role::Seller);

    // A second call updates the same store.
    let form = MultipartForm::new().add_text("business_category", "Fashion");
    let response = app
        .server
        .put("/api/v1/sellers/profile")
        .authorization_bearer(app.token_for(&user))
        .multipart(form)
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["message"], "Seller profile updated successfully");
    assert_eq!(body["data"]["store_name"], "Ada Fabrics");
    assert_eq!(body["data"]["business_category"], "Fashion");
}

#[tokio::test]
async fn test_upsert_requires_store_name_for_new_store() {
    let app = common::create_test_app();
    let user = app
        .create_user("Ada", "ada@example.com", Role::User, true)
        .await;

    let form = MultipartForm::new().add_text("description", "No name yet");

    app.server
        .put("/api/v1/sellers/profile")
        .authorization_bearer(app.token_for(&user))
        .multipart(form)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert!(app.db.seller_of(user.id).is_none());
}

#[tokio::test]
async fn test_delete_seller_profile() {
    let app = common::create_test_app();
    let (user, _) = app
        .create_seller("Bola", "bola@example.com", "Bola's Kitchen")
        .await;
    let token = app.token_for(&user);

    app.server
        .delete("/api/v1/sellers/delete/profile")
        .authorization_bearer(token.clone())
        .await
        .assert_status_ok();

    assert!(app.db.seller_of(user.id).is_none());
    assert!(app.db.user(user.id).is_some());

    app.server
        .delete("/api/v1/sellers/delete/profile")
        .authorization_bearer(token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_sellers() {
    let app = common::create_test_app();
    let user = app
        .create_user("Ada", "ada@example.com", Role::User, true)
        .await;
    let token = app.token_for(&user);

    app.server
        .get("/api/v1/sellers/get/all/sellers")
        .authorization_bearer(token.clone())
        .await
        .assert_status(StatusCode::NOT_FOUND);

    app.create_seller("Bola", "bola@example.com", "Bola's Kitchen")
        .await;
    app.create_seller("Chidi", "chidi@example.com", "Chidi Motors")
        .await;

    let response = app
        .server
        .get("/api/v1/sellers/get/all/sellers")
        .authorization_bearer(token)
        .await;

    response.assert_status_ok();
    let data = response.json::<Value>()["data"].clone();
    let names: Vec<&str> = data
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["store_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Chidi Motors", "Bola's Kitchen"]);
}

#[tokio::test]
async fn test_search_sellers() {
    let app = common::create_test_app();
    let user = app
        .create_user("Ada", "ada@example.com", Role::User, true)
        .await;
    app.create_seller("Bola", "bola@example.com", "Bola's Kitchen")
        .await;
    app.create_seller("Chidi", "chidi@example.com", "Chidi Motors")
        .await;

    let response = app
        .server
        .get("/api/v1/sellers/search")
        .add_query_param("query", "kitchen")
        .add_query_param("location", "lagos")
        .authorization_bearer(app.token_for(&user))
        .await;

    response.assert_status_ok();
    let data = response.json::<Value>()["data"].clone();
    assert_eq!(data.as_array().unwrap().len(), 1);
    assert_eq!(data[0]["store_name"], "Bola's Kitchen");

    app.server
        .get("/api/v1/sellers/search")
        .add_query_param("query", "bakery")
        .authorization_bearer(app.token_for(&user))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_combined_seller_profile() {
    let app = common::create_test_app();
    let (user, seller) = app
        .create_seller("Bola", "bola@example.com", "Bola's Kitchen")
        .await;

    let response = app
        .server
        .get(&format!("/api/v1/sellers/{}", seller.id))
        .authorization_bearer(app.token_for(&user))
        .await;

    response.assert_status_ok();
    let data = response.json::<Value>()["data"].clone();
    assert_eq!(data["id"], seller.id);
    assert_eq!(data["user"]["id"], user.id);
    assert_eq!(data["user"]["name"], "Bola");
    assert_eq!(data["user"]["address"], "12 Market Road");
    assert!(data["user"].get("email").is_none());
}
