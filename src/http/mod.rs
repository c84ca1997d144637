//! HTTP surface.
//!
//! One handler per route, each translating HTTP input into a catalog
//! operation and a JSON response. The cross-origin gate and the CORS
//! header layer sit in front of every route.

mod cors;
mod handlers;

pub use cors::{cors_layer, require_known_origin};
pub use handlers::ApiError;

use crate::config::MarqueeConfig;
use crate::store::CatalogBackend;
use crate::{Error, Result};
use axum::http::{HeaderValue, header};
use axum::routing::get;
use axum::{Router, middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// The movie catalog.
    pub catalog: Arc<dyn CatalogBackend>,
    allowed_origins: Arc<[String]>,
}

impl AppState {
    /// Creates the state from a catalog and the origin allow-list.
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogBackend>, allowed_origins: Vec<String>) -> Self {
        Self {
            catalog,
            allowed_origins: allowed_origins.into(),
        }
    }

    fn origin_allowed(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|allowed| allowed == origin)
    }
}

/// Builds the application router.
///
/// Layers run outermost first: request tracing, then the origin gate,
/// then CORS header handling, then the route handlers.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.allowed_origins);

    Router::new()
        .route("/", get(handlers::greet))
        .route(
            "/movies",
            get(handlers::list_movies).post(handlers::create_movie),
        )
        .route(
            "/movies/{id}",
            get(handlers::get_movie)
                .patch(handlers::patch_movie)
                .delete(handlers::delete_movie),
        )
        .fallback(handlers::not_found)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(cors)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_known_origin,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the listener and serves the router until the process exits.
///
/// # Errors
///
/// Returns [`Error::OperationFailed`] when the listener cannot bind or
/// the server loop fails.
pub async fn serve(config: &MarqueeConfig, state: AppState) -> Result<()> {
    let app = router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::OperationFailed {
            operation: "bind".to_string(),
            cause: e.to_string(),
        })?;

    tracing::info!(port = config.port, "listening for movie catalog requests");

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::OperationFailed {
            operation: "serve".to_string(),
            cause: e.to_string(),
        })
}
