//! The HTTP surface of the gallery.
//!
//! A thin axum layer over the core: it validates request paths through
//! the virtual filesystem, renders folder views (HTML and JSON), and
//! streams original files or cached artifacts. All image responses
//! carry a shared cache-control policy and permissive CORS headers so
//! external viewers can consume the API directly.

use std::sync::Arc;

use axum::routing::get;
use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

mod handlers;
mod headers;
mod pages;
mod state;
mod urls;

pub use state::AppState;

/// Build the gallery router around shared state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/", get(handlers::index))
        .route("/fs", get(handlers::gallery_root))
        .route("/fs/", get(handlers::gallery_root))
        .route("/fs/*subpath", get(handlers::gallery_page))
        .route("/api/listing", get(handlers::listing_root))
        .route("/api/listing/", get(handlers::listing_root))
        .route("/api/listing/*subpath", get(handlers::listing_page))
        .route("/file/*subpath", get(handlers::serve_file))
        .route("/thumbnail/*subpath", get(handlers::serve_thumbnail))
        .route("/webp/*subpath", get(handlers::serve_webp))
        .layer(middleware::from_fn(headers::image_cache_control))
        .layer(TraceLayer::new_for_http())
        .layer(headers::cors_layer())
        .with_state(Arc::new(state))
}
