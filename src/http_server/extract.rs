//! Request extractors.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use tracing::debug;

use crate::auth::{AuthError, Identity, TOKEN_COOKIE};

use super::errors::ApiError;
use super::state::AppState;

/// Identity verified from the `token` cookie
///
/// Rejects the request with 401 when the cookie is missing, empty, or does
/// not hold a valid unexpired token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(TOKEN_COOKIE)
            .map(|cookie| cookie.value())
            .filter(|value| !value.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let identity = state.tokens.verify(token).map_err(|e| {
            debug!(error = %e, "token rejected");
            e
        })?;

        Ok(Self(identity))
    }
}
