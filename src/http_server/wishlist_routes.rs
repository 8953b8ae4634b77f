//! Wishlist HTTP Routes
//!
//! `GET` and `DELETE` share the `/wishlist/:key` path: for reads the key is
//! the owner email, for deletes it is the item id.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use crate::auth::AuthError;
use crate::model::{fields, Collection, Document, DocumentId};
use crate::store::{DeleteOutcome, InsertOutcome};

use super::errors::ApiResult;
use super::extract::AuthenticatedUser;
use super::state::AppState;

/// Wishlist routes
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/wishlist", post(create_handler))
        .route(
            "/wishlist/:key",
            get(list_for_owner_handler).delete(delete_handler),
        )
}

async fn create_handler(
    State(state): State<AppState>,
    Json(item): Json<Document>,
) -> ApiResult<Json<InsertOutcome>> {
    let outcome = state.store.insert(Collection::Wishlist, item).await?;
    Ok(Json(outcome))
}

/// Items owned by `email`; only the owner may read them
async fn list_for_owner_handler(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(email): Path<String>,
) -> ApiResult<Json<Vec<Document>>> {
    if identity.email != email {
        return Err(AuthError::Forbidden.into());
    }

    let items = state
        .store
        .find_by_field(Collection::Wishlist, fields::OWNER_EMAIL, &email)
        .await?;
    Ok(Json(items))
}

/// Delete one item by id. Ownership is not checked.
async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteOutcome>> {
    let id: DocumentId = id.parse()?;
    let outcome = state.store.delete_by_id(Collection::Wishlist, &id).await?;
    Ok(Json(outcome))
}
