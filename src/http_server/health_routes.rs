//! Health HTTP Routes
//!
//! `GET /` answers with a fixed greeting so the front-end (and uptime checks)
//! can tell the server is up. `GET /health` also round-trips to the database.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use tracing::warn;

use super::state::AppState;

/// Greeting served at `/`
pub const GREETING: &str = "Hello writeWave! This is your backend server.";

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
}

/// Health routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(greeting_handler))
        .route("/health", get(health_handler))
}

async fn greeting_handler() -> &'static str {
    GREETING
}

/// Health check handler
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let (status, database) = match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "up"),
        Err(e) => {
            warn!(error = %e, "database ping failed");
            (StatusCode::SERVICE_UNAVAILABLE, "down")
        }
    };

    let response = HealthResponse {
        status: if status.is_success() { "ok" } else { "degraded" },
        database,
        version: env!("CARGO_PKG_VERSION"),
    };

    (status, Json(response))
}
