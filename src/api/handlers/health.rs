//! Handlers for the service banner and health check.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// `GET /`
pub async fn root_handler() -> &'static str {
    "Welcome to TradeLink Backend server"
}

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Database reachable
/// - **503 Service Unavailable**: Database probe failed
///
/// Mail and media report which backend is configured; an unconfigured
/// integration is reported but does not degrade the service.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected, 42 users" },
///     "mail": { "status": "ok", "message": "smtp" },
///     "media": { "status": "ok", "message": "Uploads enabled" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;
    let healthy = db_check.is_ok();

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database: db_check,
            mail: CheckStatus::ok(state.mailer.describe()),
            media: check_media(&state),
        },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    match state.user_service.count().await {
        Ok(users) => CheckStatus::ok(format!("Connected, {users} users")),
        Err(e) => CheckStatus::error(format!("Database error: {e}")),
    }
}

fn check_media(state: &AppState) -> CheckStatus {
    if state.media.is_enabled() {
        CheckStatus::ok("Uploads enabled")
    } else {
        CheckStatus::ok("Uploads disabled")
    }
}
