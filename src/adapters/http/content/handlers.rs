//! HTTP handlers for content and view endpoints.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireAuth;
use crate::application::{
    ContentRegistry, DeliveryResolver, DetachContentCommand, DetachContentHandler,
    GetDeliveryHandler, GetDeliveryQuery, GetSessionViewReportHandler, GetSessionViewReportQuery,
    GetTopViewedHandler, GetTopViewedQuery, GetViewStatsHandler, GetViewStatsQuery,
    GetViewTrendsHandler, GetViewTrendsQuery, ListContentHandler, ListContentQuery,
    ReconcileViewsCommand, ReconcileViewsHandler, RecordViewCommand, RecordViewHandler, SummarizeSessionHandler, SummarizeSessionQuery,
    ViewSettings, ViewTracker, ViewerDirectory,
};
use crate::domain::content::{ContentError, ContentRef};
use crate::domain::delivery::{unsatisfied_content_range, ByteRangeSpec};
use crate::domain::foundation::SessionId;
use crate::domain::views::ViewClient;

use super::dto::{
    ContentItemResponse, ContentListResponse, DetachResponse, ErrorResponse, RecordViewResponse,
    TopContentQuery, TrendsQuery,
};
use super::streaming::delivery_response;

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ContentHandlers {
    list_handler: Arc<ListContentHandler>,
    delivery_handler: Arc<GetDeliveryHandler>,
    inventory_handler: Arc<SummarizeSessionHandler>,
    detach_handler: Arc<DetachContentHandler>,
    record_handler: Arc<RecordViewHandler>,
    stats_handler: Arc<GetViewStatsHandler>,
    reconcile_handler: Arc<ReconcileViewsHandler>,
    trends_handler: Arc<GetViewTrendsHandler>,
    report_handler: Arc<GetSessionViewReportHandler>,
    top_handler: Arc<GetTopViewedHandler>,
    chunk_size: usize,
}

const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

impl ContentHandlers {
    /// Wires every handler from the four application services.
    pub fn new(
        registry: ContentRegistry,
        viewers: ViewerDirectory,
        resolver: DeliveryResolver,
        tracker: ViewTracker,
        settings: ViewSettings,
    ) -> Self {
        Self {
            list_handler: Arc::new(ListContentHandler::new(registry.clone(), viewers.clone())),
            delivery_handler: Arc::new(GetDeliveryHandler::new(
                registry.clone(),
                viewers.clone(),
                resolver,
                tracker.clone(),
                settings,
            )),
            inventory_handler: Arc::new(SummarizeSessionHandler::new(
                registry.clone(),
                viewers.clone(),
            )),
            detach_handler: Arc::new(DetachContentHandler::new(registry.clone(), tracker.clone())),
            record_handler: Arc::new(RecordViewHandler::new(
                registry.clone(),
                viewers.clone(),
                tracker.clone(),
            )),
            stats_handler: Arc::new(GetViewStatsHandler::new(registry.clone(), tracker.clone())),
            reconcile_handler: Arc::new(ReconcileViewsHandler::new(
                registry.clone(),
                tracker.clone(),
            )),
            trends_handler: Arc::new(GetViewTrendsHandler::new(
                registry.clone(),
                tracker.clone(),
                settings,
            )),
            report_handler: Arc::new(GetSessionViewReportHandler::new(
                registry.clone(),
                viewers,
                tracker.clone(),
            )),
            top_handler: Arc::new(GetTopViewedHandler::new(registry, tracker, settings)),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Bytes per streamed body chunk.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Request helpers
// ════════════════════════════════════════════════════════════════════════════

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(message))).into_response()
}

fn parse_session(raw: &str) -> Result<SessionId, Response> {
    raw.parse::<SessionId>()
        .map_err(|_| bad_request("Invalid session ID"))
}

fn parse_content_ref(raw: &str) -> Result<ContentRef, Response> {
    raw.parse::<ContentRef>()
        .map_err(|_| bad_request("Invalid content ID"))
}

/// Client address from the first `X-Forwarded-For` hop, else the peer.
fn client_from(headers: &HeaderMap, peer: Option<SocketAddr>) -> ViewClient {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string);
    let address = forwarded.or_else(|| peer.map(|addr| addr.ip().to_string()));
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    ViewClient::new(address, user_agent)
}

fn range_from(headers: &HeaderMap) -> Option<ByteRangeSpec> {
    headers
        .get(header::RANGE)
        .and_then(|v| v.to_str().ok())
        .and_then(ByteRangeSpec::parse)
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/sessions/:session_id/content - List a session's content
pub async fn list_content(
    State(handlers): State<ContentHandlers>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .list_handler
        .handle(ListContentQuery { session_id, user })
        .await
    {
        Ok(items) => {
            let response = ContentListResponse {
                session_id: session_id.as_i64(),
                items: items.into_iter().map(ContentItemResponse::from).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_content_error(e),
    }
}

/// GET /api/sessions/:session_id/inventory - Staff inventory of a session
pub async fn session_inventory(
    State(handlers): State<ContentHandlers>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .inventory_handler
        .handle(SummarizeSessionQuery { session_id, user })
        .await
    {
        Ok(inventory) => (StatusCode::OK, Json(inventory)).into_response(),
        Err(e) => handle_content_error(e),
    }
}

/// GET /api/sessions/:session_id/view-report - Per-item counts for a session
pub async fn session_view_report(
    State(handlers): State<ContentHandlers>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .report_handler
        .handle(GetSessionViewReportQuery { session_id, user })
        .await
    {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => handle_content_error(e),
    }
}

/// GET /api/content/:content_ref/delivery - Stream, redirect or link card
pub async fn deliver_content(
    State(handlers): State<ContentHandlers>,
    RequireAuth(user): RequireAuth,
    Path(content_ref): Path<String>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
) -> Response {
    let reference = match parse_content_ref(&content_ref) {
        Ok(reference) => reference,
        Err(response) => return response,
    };

    let query = GetDeliveryQuery {
        reference,
        user,
        range: range_from(&headers),
        client: client_from(&headers, peer.map(|ConnectInfo(addr)| addr)),
    };

    match handlers.delivery_handler.handle(query).await {
        Ok(outcome) => delivery_response(outcome, handlers.chunk_size),
        Err(e) => handle_content_error(e),
    }
}

/// POST /api/content/:content_ref/views - Report a view explicitly
pub async fn record_view(
    State(handlers): State<ContentHandlers>,
    RequireAuth(user): RequireAuth,
    Path(content_ref): Path<String>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
) -> Response {
    let reference = match parse_content_ref(&content_ref) {
        Ok(reference) => reference,
        Err(response) => return response,
    };

    let cmd = RecordViewCommand {
        reference,
        user,
        client: client_from(&headers, peer.map(|ConnectInfo(addr)| addr)),
    };

    match handlers.record_handler.handle(cmd).await {
        Ok(result) => {
            let response = RecordViewResponse::from(result);
            let status = if response.recorded {
                StatusCode::CREATED
            } else {
                StatusCode::OK
            };
            (status, Json(response)).into_response()
        }
        Err(e) => handle_content_error(e),
    }
}

/// GET /api/content/:content_ref/views/stats - Total and distinct viewers
pub async fn view_stats(
    State(handlers): State<ContentHandlers>,
    RequireAuth(user): RequireAuth,
    Path(content_ref): Path<String>,
) -> Response {
    let reference = match parse_content_ref(&content_ref) {
        Ok(reference) => reference,
        Err(response) => return response,
    };

    match handlers
        .stats_handler
        .handle(GetViewStatsQuery { reference, user })
        .await
    {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => handle_content_error(e),
    }
}

/// POST /api/content/:content_ref/views/reconcile - Rebuild the counter from the log
pub async fn reconcile_views(
    State(handlers): State<ContentHandlers>,
    RequireAuth(user): RequireAuth,
    Path(content_ref): Path<String>,
) -> Response {
    let reference = match parse_content_ref(&content_ref) {
        Ok(reference) => reference,
        Err(response) => return response,
    };

    match handlers
        .reconcile_handler
        .handle(ReconcileViewsCommand { reference, user })
        .await
    {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => handle_content_error(e),
    }
}

/// GET /api/content/:content_ref/views/trends?days=N - Daily counts
pub async fn view_trends(
    State(handlers): State<ContentHandlers>,
    RequireAuth(user): RequireAuth,
    Path(content_ref): Path<String>,
    Query(params): Query<TrendsQuery>,
) -> Response {
    let reference = match parse_content_ref(&content_ref) {
        Ok(reference) => reference,
        Err(response) => return response,
    };

    let query = GetViewTrendsQuery {
        reference,
        user,
        days: params.days,
    };

    match handlers.trends_handler.handle(query).await {
        Ok(trend) => (StatusCode::OK, Json(trend)).into_response(),
        Err(e) => handle_content_error(e),
    }
}

/// POST /api/content/:content_ref/detach - Orphan the views of a deleted item
pub async fn detach_content(
    State(handlers): State<ContentHandlers>,
    RequireAuth(user): RequireAuth,
    Path(content_ref): Path<String>,
) -> Response {
    let reference = match parse_content_ref(&content_ref) {
        Ok(reference) => reference,
        Err(response) => return response,
    };

    let cmd = DetachContentCommand {
        content_item_id: reference.id,
        user,
    };

    match handlers.detach_handler.handle(cmd).await {
        Ok(result) => (StatusCode::OK, Json(DetachResponse::from(result))).into_response(),
        Err(e) => handle_content_error(e),
    }
}

/// GET /api/analytics/top-content?limit=N - Most viewed content
pub async fn top_content(
    State(handlers): State<ContentHandlers>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<TopContentQuery>,
) -> Response {
    let query = GetTopViewedQuery {
        user,
        limit: params.limit,
    };

    match handlers.top_handler.handle(query).await {
        Ok(top) => (StatusCode::OK, Json(top)).into_response(),
        Err(e) => handle_content_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn status_for(error: &ContentError) -> StatusCode {
    match error {
        ContentError::NotFound(_) | ContentError::StreamUnavailable(_) => StatusCode::NOT_FOUND,
        ContentError::NotEnrolled | ContentError::Unauthorized => StatusCode::FORBIDDEN,
        ContentError::InvalidLocator(_) | ContentError::Validation(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ContentError::RangeNotSatisfiable { .. } => StatusCode::RANGE_NOT_SATISFIABLE,
        ContentError::StillReferenced(_) => StatusCode::CONFLICT,
        ContentError::AmbiguousContentIdentifier(_) | ContentError::Infrastructure(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn handle_content_error(error: ContentError) -> Response {
    let status = status_for(&error);

    let message = match &error {
        ContentError::Infrastructure(detail) => {
            tracing::error!(error = %detail, "Request failed on infrastructure");
            "Internal server error".to_string()
        }
        other => other.to_string(),
    };

    let mut body = ErrorResponse::new(error.code(), message);
    if let ContentError::Validation(validation) = &error {
        body = body.with_details(serde_json::json!({ "reason": validation.to_string() }));
    }

    let mut response = (status, Json(body)).into_response();
    if let ContentError::RangeNotSatisfiable { size } = error {
        if let Ok(value) = HeaderValue::from_str(&unsatisfied_content_range(size)) {
            response.headers_mut().insert(header::CONTENT_RANGE, value);
        }
    }
    response
}
