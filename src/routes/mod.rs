//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The editor and viewer load and save whole slide documents through
//! `/api/presentations/{id}` and upload media through `/api/media`. Uploaded
//! files are served back as static files under `/media`.

pub mod media;
pub mod presentations;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let media_dir = state.config.media_dir.clone();
    let media_limit = state.config.media_max_bytes;

    Router::new()
        .route(
            "/api/presentations/{id}",
            get(presentations::get_presentation).put(presentations::put_presentation),
        )
        .route("/api/media", post(media::upload_media).layer(DefaultBodyLimit::max(media_limit)))
        .route("/healthz", get(healthz))
        .nest_service("/media", ServeDir::new(media_dir))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}
