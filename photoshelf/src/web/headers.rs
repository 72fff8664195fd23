//! Cross-cutting response headers.

use axum::extract::Request;
use axum::http::{header, HeaderValue, Method};
use axum::middleware::Next;
use axum::response::Response;
use tower_http::cors::{Any, CorsLayer};

use crate::listing::is_image_name;

/// Cache policy for image responses.
pub(super) const IMAGE_CACHE_CONTROL: &str = "public, max-age=600";

/// Permissive CORS so external viewers can consume the API directly.
pub(super) fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Mark responses cacheable when the request path names an image file.
///
/// Keyed on the path's final segment rather than the route, so `/file`,
/// `/thumbnail`, and `/webp` responses all pick up the policy without
/// per-route wiring.
pub(super) async fn image_cache_control(request: Request, next: Next) -> Response {
    let cacheable = request
        .uri()
        .path()
        .rsplit('/')
        .next()
        .is_some_and(is_image_name);

    let mut response = next.run(request).await;
    if cacheable {
        response.headers_mut().insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static(IMAGE_CACHE_CONTROL),
        );
    }
    response
}
