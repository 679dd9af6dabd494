//! HTTP adapters - REST API implementations.

pub mod content;
pub mod middleware;

use axum::{middleware::from_fn_with_state, routing::get, Json, Router};
use serde_json::{json, Value};

pub use content::{content_routes, ContentHandlers};
pub use middleware::AuthState;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Full API surface: content routes under `/api` behind bearer
/// authentication, plus an unauthenticated `/health`.
pub fn api_router(handlers: ContentHandlers, validator: AuthState) -> Router {
    let api = content_routes(handlers)
        .layer(from_fn_with_state(validator, middleware::auth_middleware));

    Router::new()
        .nest("/api", api)
        .route("/health", get(health))
}
