//! Cross-origin policy.
//!
//! Two pieces work together: a gate middleware that rejects undeclared
//! origins before any handler runs, and a `CorsLayer` that emits the
//! response headers browsers need for the origins that pass.

use super::AppState;
use axum::Json;
use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Builds the CORS header layer for the configured allow-list.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
}

/// Rejects requests from undeclared origins before any handler runs.
///
/// Requests without an `Origin` header (same-origin or non-browser
/// clients) pass through untouched. The allow-list is static
/// configuration; nothing here holds state between requests.
pub async fn require_known_origin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(origin) = request.headers().get(header::ORIGIN).cloned() else {
        return next.run(request).await;
    };

    match origin.to_str() {
        Ok(origin) if state.origin_allowed(origin) => next.run(request).await,
        _ => {
            tracing::warn!(origin = ?origin, "rejected cross-origin request");
            (
                StatusCode::FORBIDDEN,
                Json(json!({ "message": "Not allowed by CORS" })),
            )
                .into_response()
        },
    }
}
