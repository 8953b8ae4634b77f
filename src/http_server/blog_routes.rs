//! Blog HTTP Routes
//!
//! Posts are stored exactly as posted. `PUT /blogs/:id` is an upsert: an id
//! that matches nothing creates a new post with that id.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::model::{fields, Collection, Document, DocumentId};
use crate::store::{InsertOutcome, SortBy, UpdateOutcome};

use super::errors::ApiResult;
use super::state::AppState;

/// Blog routes
pub fn blog_routes() -> Router<AppState> {
    Router::new()
        .route("/blogs", get(list_by_date_handler).post(create_handler))
        .route("/blogs/table", get(list_by_length_handler))
        .route("/blogs/:id", get(get_handler).put(upsert_handler))
}

/// All posts, newest first
async fn list_by_date_handler(State(state): State<AppState>) -> ApiResult<Json<Vec<Document>>> {
    let posts = state
        .store
        .find_all(Collection::Blogs, Some(SortBy::descending(fields::DATE)))
        .await?;
    Ok(Json(posts))
}

/// All posts, longest description first
async fn list_by_length_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Document>>> {
    let posts = state
        .store
        .find_all(
            Collection::Blogs,
            Some(SortBy::descending(fields::LONG_DES_COUNT)),
        )
        .await?;
    Ok(Json(posts))
}

/// One post, `null` when absent
async fn get_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Option<Document>>> {
    let id: DocumentId = id.parse()?;
    let post = state.store.find_by_id(Collection::Blogs, &id).await?;
    Ok(Json(post))
}

async fn create_handler(
    State(state): State<AppState>,
    Json(post): Json<Document>,
) -> ApiResult<Json<InsertOutcome>> {
    let outcome = state.store.insert(Collection::Blogs, post).await?;
    Ok(Json(outcome))
}

async fn upsert_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut post): Json<Document>,
) -> ApiResult<Json<UpdateOutcome>> {
    let id: DocumentId = id.parse()?;
    // The path decides the id
    post.remove(fields::ID);

    let outcome = state
        .store
        .upsert_fields(Collection::Blogs, &id, post)
        .await?;
    Ok(Json(outcome))
}
