use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use marquee_core::ServiceError;

use crate::api::AppState;
use crate::model::Movie;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/movies/{mid}", get(get_movie))
        .route("/movies/external/{movie_id}", get(get_movie_by_external))
}

async fn get_movie(
    State(state): State<AppState>,
    Path(mid): Path<String>,
) -> Result<Json<Movie>, ServiceError> {
    Ok(Json(state.service.get_movie(&mid)?))
}

async fn get_movie_by_external(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<Json<Movie>, ServiceError> {
    state
        .service
        .movie_by_external(&movie_id)?
        .map(Json)
        .ok_or_else(|| ServiceError::not_found("movie", &movie_id))
}
