//! Router configuration for the HTTP API.
//!
//! Sets up the routes and middleware (CORS, compression, tracing, body limit).
//! A wrong verb on a known path answers 405 with a JSON body naming the
//! supported verb.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Upper bound on request bodies; sensor logs are uploaded whole.
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Permissive CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/health",
            get(handlers::health_check).fallback(handlers::get_only),
        )
        .route(
            "/data",
            post(handlers::ingest_data).fallback(handlers::post_only),
        )
        .route(
            "/aggregated",
            get(handlers::get_aggregated).fallback(handlers::get_only),
        )
        .route(
            "/processed",
            get(handlers::get_processed).fallback(handlers::get_only),
        )
        .route(
            "/anomalies",
            get(handlers::get_anomalies).fallback(handlers::get_only),
        )
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
