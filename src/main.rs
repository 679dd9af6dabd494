//! Session content service entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use session_content::adapters::auth::{JwtConfig, JwtSessionValidator};
use session_content::adapters::http::{api_router, AuthState, ContentHandlers};
use session_content::adapters::postgres::{
    PostgresCourseDirectory, PostgresSessionContentStore, PostgresUploadedResourceStore,
    PostgresViewEventLog,
};
use session_content::adapters::storage::LocalContentStorage;
use session_content::application::{ContentRegistry, DeliveryResolver, ViewTracker, ViewerDirectory};
use session_content::config::{AppConfig, ServerConfig};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;
    if config.database.run_migrations {
        sqlx::migrate!().run(&pool).await?;
        tracing::info!("Migrations applied");
    }

    let registry = ContentRegistry::new(
        Arc::new(PostgresUploadedResourceStore::new(pool.clone())),
        Arc::new(PostgresSessionContentStore::new(pool.clone())),
    );
    let directory = Arc::new(PostgresCourseDirectory::new(pool.clone()));
    let viewers = ViewerDirectory::new(directory.clone(), directory);
    let resolver = DeliveryResolver::new(Arc::new(LocalContentStorage::new(
        &config.storage.root,
        config.storage.read_timeout(),
    )));
    let settings = config.views.to_settings();
    let tracker = ViewTracker::new(Arc::new(PostgresViewEventLog::new(pool)), settings.window);

    let handlers = ContentHandlers::new(registry, viewers, resolver, tracker, settings)
        .with_chunk_size(config.storage.chunk_size);

    let jwt = JwtConfig::new(
        config.auth.issuer.clone(),
        config.auth.audience.clone(),
        config.auth.jwt_secret.clone(),
    )
    .with_leeway(config.auth.leeway_secs);
    let validator: AuthState = Arc::new(JwtSessionValidator::new(jwt));

    let app = api_router(handlers, validator)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config.server))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// JSON logs in production, human-readable output elsewhere. `RUST_LOG`
/// overrides the configured filter.
fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .pretty()
            .init();
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if origins.is_empty() && !server.is_production() {
        return CorsLayer::permissive();
    }
    CorsLayer::new().allow_origin(AllowOrigin::list(origins))
}
