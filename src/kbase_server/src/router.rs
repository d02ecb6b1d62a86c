//! Shared application router builder, used by `main.rs` and the integration tests.

use axum::extract::DefaultBodyLimit;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::handlers::{articles, folders, health, upload};
use crate::state::AppState;

/// Build the full application [`Router`].
///
/// - `/health` liveness
/// - `/api/...` folders, articles, upload
/// - `/uploads/...` static files from the uploads directory
pub fn build_app_router(state: AppState) -> Router {
    let config = state.config.clone();

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes(&config))
        .nest_service("/uploads", ServeDir::new(&config.uploads_dir))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(build_cors_layer(&config))
        .with_state(state)
}

fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .route(
            "/folders",
            get(folders::list_folders).post(folders::create_folder),
        )
        .route("/folders/{id}", axum::routing::delete(folders::delete_folder))
        .route(
            "/articles",
            get(articles::list_articles).post(articles::create_article),
        )
        .route(
            "/articles/{id}",
            put(articles::update_article).delete(articles::delete_article),
        )
        .route(
            "/upload",
            post(upload::upload_file).layer(DefaultBodyLimit::max(config.max_upload_bytes)),
        )
}

/// CORS layer from configuration. With no configured origins any origin is
/// allowed; unparseable origins are skipped with a warning.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    if config.cors_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(origin) => Some(origin),
            Err(e) => {
                tracing::warn!(origin = %o, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}
