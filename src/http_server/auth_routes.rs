//! Auth HTTP Routes
//!
//! - `POST /jwt` signs the posted identity and sets the `token` cookie
//! - `GET /logout` clears the cookie
//!
//! Neither route touches the database.

use axum::{
    extract::{Json, State},
    routing::{get, post},
    Router,
};
use axum_extra::extract::CookieJar;
use serde::Serialize;
use tracing::info;

use crate::auth::Identity;

use super::errors::ApiResult;
use super::state::AppState;

/// Auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/jwt", post(issue_token_handler))
        .route("/logout", get(logout_handler))
}

/// Acknowledgment for cookie changes
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}

/// Issue an identity token as an HTTP-only cookie
async fn issue_token_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(identity): Json<Identity>,
) -> ApiResult<(CookieJar, Json<SuccessResponse>)> {
    let token = state.tokens.issue(&identity)?;
    info!(email = %identity.email, "issued token");

    let jar = jar.add(state.cookies.session(token));
    Ok((jar, SuccessResponse::ok()))
}

/// Clear the token cookie
///
/// The token itself stays valid until it expires.
async fn logout_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<SuccessResponse>) {
    (jar.add(state.cookies.removal()), SuccessResponse::ok())
}
