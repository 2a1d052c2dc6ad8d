use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};

use marquee_core::{ListResult, ServiceError};

use crate::api::{AppState, blocking};
use crate::api::identity::resolve_user;
use crate::model::{Bookmark, CreateBookmark};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bookmarks", post(create_bookmark))
        .route("/bookmarks/{uid}", get(list_bookmarks))
        .route("/bookmarks/{uid}/{movie_id}", delete(delete_bookmark))
}

async fn create_bookmark(
    headers: HeaderMap,
    State(state): State<AppState>,
    Json(input): Json<CreateBookmark>,
) -> Result<(StatusCode, Json<Bookmark>), ServiceError> {
    let user_id = resolve_user(&state, &headers, &input.user_id)?;
    let service = state.service.clone();
    let bookmark = blocking(move || service.add_bookmark(&user_id, &input.movie_id)).await?;
    Ok((StatusCode::CREATED, Json(bookmark)))
}

async fn list_bookmarks(
    headers: HeaderMap,
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<ListResult<String>>, ServiceError> {
    let user_id = resolve_user(&state, &headers, &uid)?;
    Ok(Json(ListResult::new(state.service.bookmarks_for_user(&user_id)?)))
}

async fn delete_bookmark(
    headers: HeaderMap,
    State(state): State<AppState>,
    Path((uid, movie_id)): Path<(String, String)>,
) -> Result<StatusCode, ServiceError> {
    let user_id = resolve_user(&state, &headers, &uid)?;
    let service = state.service.clone();
    blocking(move || service.remove_bookmark(&user_id, &movie_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
