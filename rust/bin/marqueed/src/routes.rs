//! Route registration: module routes under `/api` plus system endpoints.

use std::time::Duration;

use axum::Router;
use axum::http::Method;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::response::IntoResponse;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};

/// Build the complete router.
pub fn build_router(module_routes: Vec<(&str, Router)>) -> Router {
    let mut api = Router::new();
    for (name, router) in module_routes {
        tracing::debug!("mounting module {} under /api", name);
        api = api.merge(router);
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
        .nest("/api", api)
        .layer(cors)
}

async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
    }))
}

async fn version() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "marqueed",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use marquee_core::{JwtService, Module};
    use marquee_kv::{KVStore, MemoryStore};
    use reactions::ReactionsModule;
    use reactions::service::{ReactionService, ReactionsConfig};
    use tower::ServiceExt;

    fn app() -> (Router, JwtService) {
        let kv: Arc<dyn KVStore> = Arc::new(MemoryStore::new());
        let jwt = JwtService::new("routes-test", 3600);
        let module = ReactionsModule::new(
            ReactionService::new(kv, ReactionsConfig::default()),
            Arc::new(jwt.clone()),
        );
        (build_router(vec![(module.name(), module.routes())]), jwt)
    }

    async fn send(router: &Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let resp = router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::json!(null));
        (status, json)
    }

    #[tokio::test]
    async fn health_and_version_are_public() {
        let (r, _) = app();
        let (s, body) = send(&r, Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(s, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (s, body) = send(&r, Request::get("/version").body(Body::empty()).unwrap()).await;
        assert_eq!(s, StatusCode::OK);
        assert_eq!(body["name"], "marqueed");
    }

    #[tokio::test]
    async fn module_routes_live_under_api() {
        let (r, jwt) = app();
        let token = jwt.issue("U1", "User One").unwrap();
        let req = Request::put("/api/movies/users/me/likes/tt0111161")
            .header("authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let (s, body) = send(&r, req).await;
        assert_eq!(s, StatusCode::OK);
        assert_eq!(body["stats"]["likes"], 1);

        let (s, _) = send(&r, Request::get("/likes/movies").body(Body::empty()).unwrap()).await;
        assert_eq!(s, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cors_preflight_is_answered() {
        let (r, _) = app();
        let req = Request::builder()
            .method("OPTIONS")
            .uri("/api/bookmarks")
            .header("origin", "http://localhost:3000")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();
        let resp = r.oneshot(req).await.unwrap();
        assert!(resp.headers().contains_key("access-control-allow-origin"));
    }
}
