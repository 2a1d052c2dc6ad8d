use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::routing::{get, put};
use axum::{Json, Router};

use marquee_core::{LimitParams, ListResult, ServiceError};

use crate::api::{AppState, blocking};
use crate::api::identity::resolve_user;
use crate::model::{Movie, Reaction, ReactionEdge};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/movies/users/{uid}/likes/{movie_id}", put(toggle_like))
        .route("/movies/users/{uid}/dislikes/{movie_id}", put(toggle_dislike))
        .route("/movies/{mid}/likes", get(movie_likes))
        .route("/movies/{mid}/dislikes", get(movie_dislikes))
        .route("/users/{uid}/movies/likes", get(user_likes))
        .route("/users/{uid}/movies/dislikes", get(user_dislikes))
        .route("/likes/movies", get(top_liked))
        .route("/dislikes/movies", get(top_disliked))
}

async fn toggle(
    state: &AppState,
    headers: &HeaderMap,
    uid: &str,
    movie_id: String,
    reaction: Reaction,
) -> Result<Json<Movie>, ServiceError> {
    let user_id = resolve_user(state, headers, uid)?;
    let service = state.service.clone();
    let movie =
        blocking(move || service.toggle_reaction(&user_id, &movie_id, reaction)).await?;
    Ok(Json(movie))
}

async fn toggle_like(
    headers: HeaderMap,
    State(state): State<AppState>,
    Path((uid, movie_id)): Path<(String, String)>,
) -> Result<Json<Movie>, ServiceError> {
    toggle(&state, &headers, &uid, movie_id, Reaction::Like).await
}

async fn toggle_dislike(
    headers: HeaderMap,
    State(state): State<AppState>,
    Path((uid, movie_id)): Path<(String, String)>,
) -> Result<Json<Movie>, ServiceError> {
    toggle(&state, &headers, &uid, movie_id, Reaction::Dislike).await
}

async fn movie_likes(
    State(state): State<AppState>,
    Path(mid): Path<String>,
) -> Result<Json<ListResult<ReactionEdge>>, ServiceError> {
    let edges = state.service.reactions_for_movie(Reaction::Like, &mid)?;
    Ok(Json(ListResult::new(edges)))
}

async fn movie_dislikes(
    State(state): State<AppState>,
    Path(mid): Path<String>,
) -> Result<Json<ListResult<ReactionEdge>>, ServiceError> {
    let edges = state.service.reactions_for_movie(Reaction::Dislike, &mid)?;
    Ok(Json(ListResult::new(edges)))
}

fn user_movies(
    state: &AppState,
    headers: &HeaderMap,
    uid: &str,
    reaction: Reaction,
) -> Result<Json<ListResult<String>>, ServiceError> {
    let user_id = resolve_user(state, headers, uid)?;
    let ids = state
        .service
        .reactions_for_user(reaction, &user_id)?
        .into_iter()
        .map(|(_, movie)| movie.external_id)
        .collect();
    Ok(Json(ListResult::new(ids)))
}

async fn user_likes(
    headers: HeaderMap,
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<ListResult<String>>, ServiceError> {
    user_movies(&state, &headers, &uid, Reaction::Like)
}

async fn user_dislikes(
    headers: HeaderMap,
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<ListResult<String>>, ServiceError> {
    user_movies(&state, &headers, &uid, Reaction::Dislike)
}

async fn top_liked(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Result<Json<ListResult<Movie>>, ServiceError> {
    let movies = state.service.top_movies(Reaction::Like, params.limit)?;
    Ok(Json(ListResult::new(movies)))
}

async fn top_disliked(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Result<Json<ListResult<Movie>>, ServiceError> {
    let movies = state.service.top_movies(Reaction::Dislike, params.limit)?;
    Ok(Json(ListResult::new(movies)))
}
