//! # Marquee
//!
//! A small HTTP service exposing CRUD operations over an in-memory
//! movie catalog.
//!
//! ## Features
//!
//! - JSON request/response API served by axum
//! - Strict request-body validation with field-level error reporting
//! - Allow-list cross-origin policy applied before any handler runs
//! - Catalog seeded from a JSON fixture at startup, held in memory only
//!
//! ## Example
//!
//! ```rust,ignore
//! use marquee::http::{self, AppState};
//! use marquee::store::InMemoryCatalog;
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(InMemoryCatalog::new());
//! let state = AppState::new(catalog, config.allowed_origins.clone());
//! http::serve(&config, state).await?;
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use thiserror::Error as ThisError;

// Module declarations
pub mod config;
pub mod http;
pub mod models;
pub mod observability;
pub mod store;
pub mod validate;

// Re-exports for convenience
pub use config::MarqueeConfig;
pub use models::{Genre, Movie, MovieDraft, MovieId, MoviePatch};
pub use store::{CatalogBackend, InMemoryCatalog};
pub use validate::{FieldError, ValidationErrors, validate_movie, validate_partial_movie};

/// Error type for marquee operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// Request-body validation failures are deliberately not represented here;
/// they are carried by [`validate::ValidationErrors`] and mapped to 4xx
/// responses by the HTTP layer.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Malformed configuration values (port, origins) |
/// | `OperationFailed` | Fixture I/O errors, poisoned catalog lock, bind/serve failures |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - A configured port or origin value cannot be parsed
    /// - A seed fixture path points at something unusable
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - Filesystem I/O errors occur while reading config or fixtures
    /// - The catalog lock is poisoned
    /// - The HTTP listener cannot bind or serve
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for marquee operations.
pub type Result<T> = std::result::Result<T, Error>;
