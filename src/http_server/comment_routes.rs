//! Comment HTTP Routes

use axum::{extract::State, routing::post, Json, Router};

use crate::model::{Collection, Document};
use crate::store::InsertOutcome;

use super::errors::ApiResult;
use super::state::AppState;

/// Comment routes
pub fn comment_routes() -> Router<AppState> {
    Router::new().route("/comments", post(create_handler))
}

/// Store a comment as posted
async fn create_handler(
    State(state): State<AppState>,
    Json(comment): Json<Document>,
) -> ApiResult<Json<InsertOutcome>> {
    let outcome = state.store.insert(Collection::Comments, comment).await?;
    Ok(Json(outcome))
}
