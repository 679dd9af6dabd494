//! HTTP routes for content delivery and view analytics.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    deliver_content, detach_content, list_content, reconcile_views, record_view,
    session_inventory, session_view_report, top_content, view_stats, view_trends,
    ContentHandlers,
};

/// Creates the content router with all endpoints.
pub fn content_routes(handlers: ContentHandlers) -> Router {
    Router::new()
        .route("/sessions/:session_id/content", get(list_content))
        .route("/sessions/:session_id/inventory", get(session_inventory))
        .route("/sessions/:session_id/view-report", get(session_view_report))
        .route("/content/:content_ref/delivery", get(deliver_content))
        .route("/content/:content_ref/views", post(record_view))
        .route("/content/:content_ref/views/stats", get(view_stats))
        .route("/content/:content_ref/views/trends", get(view_trends))
        .route("/content/:content_ref/views/reconcile", post(reconcile_views))
        .route("/content/:content_ref/detach", post(detach_content))
        .route("/analytics/top-content", get(top_content))
        .with_state(handlers)
}
