mod bookmarks;
mod identity;
mod movies;
mod reactions;

use std::sync::Arc;

use axum::Router;

use marquee_core::{IdentityProvider, ServiceError};

use crate::service::ReactionService;

pub use identity::ME;

/// Shared handler state: the service plus the session resolver.
pub struct ApiState {
    pub service: Arc<ReactionService>,
    pub identity: Arc<dyn IdentityProvider>,
}

pub type AppState = Arc<ApiState>;

/// Build the reactions API router.
///
/// All routes are relative; the server nests them under `/api`.
pub fn build_router(service: Arc<ReactionService>, identity: Arc<dyn IdentityProvider>) -> Router {
    let state = Arc::new(ApiState { service, identity });
    Router::new()
        .merge(reactions::routes())
        .merge(movies::routes())
        .merge(bookmarks::routes())
        .with_state(state)
}

/// Run a store call on the blocking pool so writes that wait on the store
/// lock never stall the async workers.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T, ServiceError>
where
    F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ServiceError::Internal(format!("store task failed: {}", e)))?
}
