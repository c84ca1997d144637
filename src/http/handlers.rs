//! Request handlers, one per route.
//!
//! Handlers translate HTTP input into catalog operations. Side effects
//! are confined to the catalog; every request runs to a single terminal
//! response.

use super::AppState;
use crate::models::{Movie, MovieId};
use crate::validate::{ValidationErrors, validate_movie, validate_partial_movie};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::{Value, json};

/// Fallback body for unmatched routes.
const NOT_FOUND_BODY: &str = "Sorry cant find that!";
/// Opaque body for unhandled failures. Detail goes to the log only.
const FAILURE_BODY: &str = "Something broke!";

/// Error surface for request handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Create-body validation failure, surfaced as 422.
    UnprocessableEntity(ValidationErrors),
    /// Patch-body validation failure, surfaced as 400.
    BadRequest(ValidationErrors),
    /// Unknown movie id, surfaced as 404.
    NotFound,
    /// Unhandled internal failure, surfaced as an opaque 500.
    Internal(crate::Error),
}

impl From<crate::Error> for ApiError {
    fn from(err: crate::Error) -> Self {
        Self::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::UnprocessableEntity(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": errors })),
            )
                .into_response(),
            Self::BadRequest(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": errors }))).into_response()
            },
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": "Movie not found" })),
            )
                .into_response(),
            Self::Internal(err) => {
                tracing::error!(error = %err, "request handler failed");
                (StatusCode::INTERNAL_SERVER_ERROR, FAILURE_BODY).into_response()
            },
        }
    }
}

/// Query parameters accepted by the listing route.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Case-insensitive title substring filter.
    pub title: Option<String>,
    /// Case-insensitive genre filter; `title` wins when both are given.
    pub genre: Option<String>,
}

/// `GET /` - fixed greeting payload.
pub async fn greet() -> Json<Value> {
    Json(json!({ "message": "Hola mundo" }))
}

/// `GET /movies` - full list, or filtered by title or genre.
///
/// An empty query value counts as absent, so `/movies?title=` returns
/// the full list.
pub async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let title = params.title.as_deref().filter(|t| !t.is_empty());
    let genre = params.genre.as_deref().filter(|g| !g.is_empty());

    let movies = if let Some(title) = title {
        state.catalog.find_by_title(title)?
    } else if let Some(genre) = genre {
        state.catalog.find_by_genre(genre)?
    } else {
        state.catalog.list()?
    };

    Ok(Json(movies))
}

/// `GET /movies/{id}` - single record.
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Movie>, ApiError> {
    state
        .catalog
        .get(&MovieId::from(id))?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// `POST /movies` - validate, assign a fresh id, append.
pub async fn create_movie(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = validate_movie(&payload).map_err(ApiError::UnprocessableEntity)?;
    let movie = state.catalog.create(draft)?;
    tracing::info!(id = %movie.id, title = %movie.title, "movie created");
    Ok((StatusCode::CREATED, Json(movie)))
}

/// `PATCH /movies/{id}` - validate the partial body, then shallow-merge.
///
/// The body is validated before the id is looked up, so an invalid body
/// yields 400 even for an unknown id.
pub async fn patch_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<Movie>, ApiError> {
    let patch = validate_partial_movie(&payload).map_err(ApiError::BadRequest)?;
    let id = MovieId::from(id);

    let Some(movie) = state.catalog.patch(&id, patch)? else {
        return Err(ApiError::NotFound);
    };
    tracing::info!(id = %movie.id, "movie updated");
    Ok(Json(movie))
}

/// `DELETE /movies/{id}` - remove, confirming with 204.
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = MovieId::from(id);
    if state.catalog.delete(&id)? {
        tracing::info!(id = %id, "movie deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

/// Fallback for unmatched routes.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY)
}
