//! Route definitions for the API.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::SharedState;

/// Create the main API router
pub fn create_router(state: SharedState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    let api_routes = Router::new()
        .route("/files", post(handlers::files::upload).get(handlers::files::list))
        .route("/files/:id", delete(handlers::files::delete_file))
        .route("/files/:id/download", post(handlers::files::download))
        .route("/admin/files/:id", get(handlers::admin::fetch))
        .route("/admin/files/:id/download", post(handlers::admin::download))
        .route("/admins", post(handlers::admin::add_admin));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/api/v1", api_routes)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
