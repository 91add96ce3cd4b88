#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, routing::get};
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::{Arc, Mutex};

use tradelink::api::handlers::{health_handler, root_handler};
use tradelink::api::routes::v1_routes;
use tradelink::domain::entities::{
    ConversationSummary, Listing, ListingFilter, ListingKind, ListingPatch, Location, Message,
    NewListing, NewMessage, NewSeller, NewUser, Participant, Role, Seller, SellerOwner,
    SellerPatch, SellerProfile, SellerSearch, User, UserPatch,
};
use tradelink::domain::repositories::{
    ListingRepository, MessageRepository, SellerRepository, UserRepository,
};
use tradelink::error::AppError;
use tradelink::infrastructure::mail::{MailError, Mailer, OutgoingEmail};
use tradelink::infrastructure::media::{ImageUpload, MediaError, MediaStore};
use tradelink::state::{AppState, AuthSettings, Repositories};
use tradelink::utils::jwt::JwtKeys;
use tradelink::utils::one_time_token::hash_token;
use tradelink::utils::password::hash_password;

pub const PASSWORD: &str = "secret123";
pub const PUBLIC_URL: &str = "http://tradelink.test";

// ── In-memory database ──────────────────────────────────────────────────────

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: Vec<User>,
    sellers: Vec<Seller>,
    listings: Vec<Listing>,
    messages: Vec<Message>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn profile(&self, seller: &Seller) -> Option<SellerProfile> {
        let user = self.users.iter().find(|u| u.id == seller.user_id)?;
        Some(SellerProfile {
            seller: seller.clone(),
            owner: SellerOwner {
                id: user.id,
                name: user.name.clone(),
                email: user.email.clone(),
                address: user.address.clone(),
            },
        })
    }
}

/// Backs all four repository traits with shared tables, cascading deletes the
/// same way the foreign keys do.
#[derive(Default, Clone)]
pub struct MemoryDb {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self, id: i64) -> Option<User> {
        let t = self.tables.lock().unwrap();
        t.users.iter().find(|u| u.id == id).cloned()
    }

    pub fn seller_of(&self, user_id: i64) -> Option<Seller> {
        let t = self.tables.lock().unwrap();
        t.sellers.iter().find(|s| s.user_id == user_id).cloned()
    }

    pub fn listing_count(&self, kind: ListingKind) -> usize {
        let t = self.tables.lock().unwrap();
        t.listings.iter().filter(|l| l.kind == kind).count()
    }

    pub fn message_count(&self) -> usize {
        self.tables.lock().unwrap().messages.len()
    }

    /// Forces a reset token so tests can exercise expiry.
    pub fn set_reset(&self, user_id: i64, raw_token: &str, expires_at: DateTime<Utc>) {
        let mut t = self.tables.lock().unwrap();
        if let Some(u) = t.users.iter_mut().find(|u| u.id == user_id) {
            u.reset_token_hash = Some(hash_token(raw_token));
            u.reset_expires_at = Some(expires_at);
        }
    }
}

#[async_trait]
impl UserRepository for MemoryDb {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut t = self.tables.lock().unwrap();
        if t.users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::conflict("Resource already exists", json!({})));
        }
        let now = Utc::now();
        let user = User {
            id: t.next_id(),
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            phone: new_user.phone,
            address: new_user.address,
            logo: None,
            role: new_user.role,
            is_verified: false,
            verification_token_hash: Some(new_user.verification_token_hash),
            verification_expires_at: Some(new_user.verification_expires_at),
            reset_token_hash: None,
            reset_expires_at: None,
            created_at: now,
            updated_at: now,
        };
        t.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.user(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_verification_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<User>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.users
            .iter()
            .find(|u| u.verification_token_hash.as_deref() == Some(token_hash))
            .cloned())
    }

    async fn find_by_reset_hash(&self, token_hash: &str) -> Result<Option<User>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.users
            .iter()
            .find(|u| u.reset_token_hash.as_deref() == Some(token_hash))
            .cloned())
    }

    async fn mark_verified(&self, id: i64) -> Result<(), AppError> {
        let mut t = self.tables.lock().unwrap();
        if let Some(u) = t.users.iter_mut().find(|u| u.id == id) {
            u.is_verified = true;
            u.verification_token_hash = None;
            u.verification_expires_at = None;
        }
        Ok(())
    }

    async fn set_verification_token(
        &self,
        id: i64,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let mut t = self.tables.lock().unwrap();
        if let Some(u) = t.users.iter_mut().find(|u| u.id == id) {
            u.verification_token_hash = Some(token_hash.to_string());
            u.verification_expires_at = Some(expires_at);
        }
        Ok(())
    }

    async fn set_reset_token(
        &self,
        id: i64,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let mut t = self.tables.lock().unwrap();
        if let Some(u) = t.users.iter_mut().find(|u| u.id == id) {
            u.reset_token_hash = Some(token_hash.to_string());
            u.reset_expires_at = Some(expires_at);
        }
        Ok(())
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), AppError> {
        let mut t = self.tables.lock().unwrap();
        if let Some(u) = t.users.iter_mut().find(|u| u.id == id) {
            u.password_hash = password_hash.to_string();
            u.reset_token_hash = None;
            u.reset_expires_at = None;
        }
        Ok(())
    }

    async fn update_profile(&self, id: i64, patch: UserPatch) -> Result<User, AppError> {
        let mut t = self.tables.lock().unwrap();
        let user = t
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": id })))?;

        if let Some(v) = patch.name {
            user.name = v;
        }
        if let Some(v) = patch.email {
            user.email = v;
        }
        if patch.phone.is_some() {
            user.phone = patch.phone;
        }
        if patch.address.is_some() {
            user.address = patch.address;
        }
        if patch.logo.is_some() {
            user.logo = patch.logo;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn set_role(&self, id: i64, role: Role) -> Result<(), AppError> {
        let mut t = self.tables.lock().unwrap();
        if let Some(u) = t.users.iter_mut().find(|u| u.id == id) {
            u.role = role;
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut t = self.tables.lock().unwrap();
        let before = t.users.len();
        t.users.retain(|u| u.id != id);
        if t.users.len() == before {
            return Ok(false);
        }

        let seller_ids: Vec<i64> = t
            .sellers
            .iter()
            .filter(|s| s.user_id == id)
            .map(|s| s.id)
            .collect();
        t.sellers.retain(|s| s.user_id != id);
        t.listings.retain(|l| !seller_ids.contains(&l.seller_id));
        t.messages.retain(|m| !m.involves(id));
        Ok(true)
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.users
            .iter()
            .rev()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.tables.lock().unwrap().users.len() as i64)
    }
}

#[async_trait]
impl SellerRepository for MemoryDb {
    async fn create(&self, new_seller: NewSeller) -> Result<Seller, AppError> {
        let mut t = self.tables.lock().unwrap();
        if t.sellers.iter().any(|s| s.user_id == new_seller.user_id) {
            return Err(AppError::conflict("Resource already exists", json!({})));
        }
        let now = Utc::now();
        let seller = Seller {
            id: t.next_id(),
            user_id: new_seller.user_id,
            store_name: new_seller.store_name,
            description: new_seller.description,
            location: new_seller.location,
            phone: new_seller.phone,
            email: new_seller.email,
            store_logo: new_seller.store_logo,
            business_category: new_seller.business_category,
            created_at: now,
            updated_at: now,
        };
        t.sellers.push(seller.clone());
        Ok(seller)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<SellerProfile>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.sellers
            .iter()
            .find(|s| s.id == id)
            .and_then(|s| t.profile(s)))
    }

    async fn find_by_user_id(&self, user_id: i64) -> Result<Option<Seller>, AppError> {
        Ok(self.seller_of(user_id))
    }

    async fn update_by_user(
        &self,
        user_id: i64,
        patch: SellerPatch,
    ) -> Result<Option<Seller>, AppError> {
        let mut t = self.tables.lock().unwrap();
        let Some(seller) = t.sellers.iter_mut().find(|s| s.user_id == user_id) else {
            return Ok(None);
        };

        if let Some(v) = patch.store_name {
            seller.store_name = v;
        }
        if patch.description.is_some() {
            seller.description = patch.description;
        }
        if let Some(Location {
            city,
            state,
            coordinates,
        }) = patch.location
        {
            seller.location.city = city.or(seller.location.city.take());
            seller.location.state = state.or(seller.location.state.take());
            seller.location.coordinates = coordinates.or(seller.location.coordinates);
        }
        if patch.phone.is_some() {
            seller.phone = patch.phone;
        }
        if patch.store_logo.is_some() {
            seller.store_logo = patch.store_logo;
        }
        if patch.business_category.is_some() {
            seller.business_category = patch.business_category;
        }
        seller.updated_at = Utc::now();
        Ok(Some(seller.clone()))
    }

    async fn delete_by_user(&self, user_id: i64) -> Result<bool, AppError> {
        let mut t = self.tables.lock().unwrap();
        let Some(seller_id) = t.sellers.iter().find(|s| s.user_id == user_id).map(|s| s.id)
        else {
            return Ok(false);
        };
        t.sellers.retain(|s| s.id != seller_id);
        t.listings.retain(|l| l.seller_id != seller_id);
        Ok(true)
    }

    async fn list(&self) -> Result<Vec<SellerProfile>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.sellers.iter().rev().filter_map(|s| t.profile(s)).collect())
    }

    async fn search(&self, search: SellerSearch) -> Result<Vec<SellerProfile>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.sellers
            .iter()
            .rev()
            .filter(|s| search.matches(s))
            .filter_map(|s| t.profile(s))
            .collect())
    }
}

#[async_trait]
impl ListingRepository for MemoryDb {
    async fn create(&self, new_listing: NewListing) -> Result<Listing, AppError> {
        let mut t = self.tables.lock().unwrap();
        let now = Utc::now();
        let listing = Listing {
            id: t.next_id(),
            kind: new_listing.kind,
            seller_id: new_listing.seller_id,
            name: new_listing.name,
            price: new_listing.price,
            category: new_listing.category,
            quantity: new_listing.quantity,
            description: new_listing.description,
            image_url: new_listing.image_url,
            created_at: now,
            updated_at: now,
        };
        t.listings.push(listing.clone());
        Ok(listing)
    }

    async fn find_by_id(&self, kind: ListingKind, id: i64) -> Result<Option<Listing>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.listings
            .iter()
            .find(|l| l.kind == kind && l.id == id)
            .cloned())
    }

    async fn list(
        &self,
        kind: ListingKind,
        filter: ListingFilter,
    ) -> Result<Vec<Listing>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.listings
            .iter()
            .rev()
            .filter(|l| l.kind == kind && filter.matches(l))
            .cloned()
            .collect())
    }

    async fn list_by_seller(
        &self,
        kind: ListingKind,
        seller_id: i64,
    ) -> Result<Vec<Listing>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.listings
            .iter()
            .rev()
            .filter(|l| l.kind == kind && l.seller_id == seller_id)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        kind: ListingKind,
        id: i64,
        patch: ListingPatch,
    ) -> Result<Listing, AppError> {
        let mut t = self.tables.lock().unwrap();
        let listing = t
            .listings
            .iter_mut()
            .find(|l| l.kind == kind && l.id == id)
            .ok_or_else(|| AppError::not_found("Listing not found", json!({ "id": id })))?;

        if let Some(v) = patch.name {
            listing.name = v;
        }
        if let Some(v) = patch.price {
            listing.price = v;
        }
        if patch.category.is_some() {
            listing.category = patch.category;
        }
        if patch.quantity.is_some() {
            listing.quantity = patch.quantity;
        }
        if patch.description.is_some() {
            listing.description = patch.description;
        }
        if patch.image_url.is_some() {
            listing.image_url = patch.image_url;
        }
        listing.updated_at = Utc::now();
        Ok(listing.clone())
    }

    async fn delete(&self, kind: ListingKind, id: i64) -> Result<bool, AppError> {
        let mut t = self.tables.lock().unwrap();
        let before = t.listings.len();
        t.listings.retain(|l| !(l.kind == kind && l.id == id));
        Ok(t.listings.len() < before)
    }
}

#[async_trait]
impl MessageRepository for MemoryDb {
    async fn create(&self, new_message: NewMessage) -> Result<Message, AppError> {
        let mut t = self.tables.lock().unwrap();
        let message = Message {
            id: t.next_id(),
            sender_id: new_message.sender_id,
            recipient_id: new_message.recipient_id,
            content: new_message.content,
            read: false,
            created_at: Utc::now(),
        };
        t.messages.push(message.clone());
        Ok(message)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Message>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.messages.iter().find(|m| m.id == id).cloned())
    }

    async fn conversation(&self, user_a: i64, user_b: i64) -> Result<Vec<Message>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.messages
            .iter()
            .filter(|m| {
                (m.sender_id == user_a && m.recipient_id == user_b)
                    || (m.sender_id == user_b && m.recipient_id == user_a)
            })
            .cloned()
            .collect())
    }

    async fn conversations(&self, user_id: i64) -> Result<Vec<ConversationSummary>, AppError> {
        let t = self.tables.lock().unwrap();
        let mut seen = Vec::new();
        let mut out = Vec::new();

        for m in t.messages.iter().rev().filter(|m| m.involves(user_id)) {
            let other = m.counterpart_of(user_id);
            if seen.contains(&other) {
                continue;
            }
            seen.push(other);

            let Some(u) = t.users.iter().find(|u| u.id == other) else {
                continue;
            };
            let unread_count = t
                .messages
                .iter()
                .filter(|x| x.sender_id == other && x.recipient_id == user_id && !x.read)
                .count() as i64;

            out.push(ConversationSummary {
                last_message: m.clone(),
                participant: Participant {
                    id: u.id,
                    name: u.name.clone(),
                    logo: u.logo.clone(),
                },
                unread_count,
            });
        }

        Ok(out)
    }

    async fn mark_read(&self, id: i64) -> Result<Message, AppError> {
        let mut t = self.tables.lock().unwrap();
        let message = t
            .messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| AppError::not_found("Message not found", json!({ "id": id })))?;
        message.read = true;
        Ok(message.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut t = self.tables.lock().unwrap();
        let before = t.messages.len();
        t.messages.retain(|m| m.id != id);
        Ok(t.messages.len() < before)
    }
}

// ── Integrations ────────────────────────────────────────────────────────────

/// Keeps every email instead of sending it.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_to(&self, to: &str) -> Option<OutgoingEmail> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|e| e.to == to)
            .cloned()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(email);
        Ok(())
    }

    fn describe(&self) -> &'static str {
        "recording"
    }
}

/// Accepts every upload and returns a deterministic URL.
#[derive(Default)]
pub struct FakeMediaStore {
    uploads: Mutex<Vec<(String, String)>>,
}

impl FakeMediaStore {
    pub fn uploads(&self) -> Vec<(String, String)> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaStore for FakeMediaStore {
    async fn upload(&self, image: ImageUpload, folder: &str) -> Result<String, MediaError> {
        let url = format!("https://cdn.test/{folder}/{}", image.file_name);
        self.uploads
            .lock()
            .unwrap()
            .push((folder.to_string(), image.file_name));
        Ok(url)
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

// ── Test application ────────────────────────────────────────────────────────

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub db: MemoryDb,
    pub mailer: Arc<RecordingMailer>,
    pub media: Arc<FakeMediaStore>,
}

pub fn create_test_app() -> TestApp {
    let db = MemoryDb::new();
    let mailer = Arc::new(RecordingMailer::default());
    let media = Arc::new(FakeMediaStore::default());

    let repos = Repositories {
        users: Arc::new(db.clone()),
        sellers: Arc::new(db.clone()),
        listings: Arc::new(db.clone()),
        messages: Arc::new(db.clone()),
    };

    let settings = AuthSettings {
        jwt: JwtKeys::new(
            "test-signing-secret-that-is-long-enough",
            chrono::Duration::hours(8),
        ),
        bcrypt_cost: 4,
        public_url: PUBLIC_URL.to_string(),
    };

    let state = AppState::new(repos, mailer.clone(), media.clone(), settings);

    let app = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .nest("/api/v1", v1_routes(state.clone(), None))
        .with_state(state.clone());

    let server = TestServer::new(app).unwrap();

    TestApp {
        server,
        state,
        db,
        mailer,
        media,
    }
}

impl TestApp {
    /// Inserts a user with [`PASSWORD`] directly, bypassing the email round-trip.
    pub async fn create_user(&self, name: &str, email: &str, role: Role, verified: bool) -> User {
        let password_hash = hash_password(PASSWORD.to_string(), 4).await.unwrap();
        let user = UserRepository::create(
            &self.db,
            NewUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash,
                phone: None,
                address: Some("12 Market Road".to_string()),
                role,
                verification_token_hash: hash_token(&format!("seed-{email}")),
                verification_expires_at: Utc::now() + chrono::Duration::hours(24),
            },
        )
        .await
        .unwrap();

        if verified {
            self.db.mark_verified(user.id).await.unwrap();
        }
        self.db.user(user.id).unwrap()
    }

    /// Creates a verified seller account with a store.
    pub async fn create_seller(&self, name: &str, email: &str, store_name: &str) -> (User, Seller) {
        let user = self.create_user(name, email, Role::Seller, true).await;
        let seller = SellerRepository::create(
            &self.db,
            NewSeller {
                user_id: user.id,
                store_name: store_name.to_string(),
                description: None,
                location: Location {
                    city: Some("Lagos".to_string()),
                    state: Some("Lagos State".to_string()),
                    coordinates: None,
                },
                phone: None,
                email: user.email.clone(),
                store_logo: None,
                business_category: Some("Food".to_string()),
            },
        )
        .await
        .unwrap();
        (user, seller)
    }

    pub async fn create_listing(
        &self,
        kind: ListingKind,
        seller_id: i64,
        name: &str,
        price: rust_decimal::Decimal,
        category: Option<&str>,
    ) -> Listing {
        ListingRepository::create(
            &self.db,
            NewListing {
                kind,
                seller_id,
                name: name.to_string(),
                price,
                category: category.map(str::to_string),
                quantity: Some(5),
                description: None,
                image_url: None,
            },
        )
        .await
        .unwrap()
    }

    pub fn token_for(&self, user: &User) -> String {
        self.state
            .auth_service
            .jwt()
            .issue(user.id, user.role)
            .unwrap()
            .token
    }
}

/// Extracts the raw token from the last link in an email body.
pub fn token_from_link(body: &str, marker: &str) -> String {
    let start = body.find(marker).expect("link marker in email body") + marker.len();
    body[start..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect()
}
