//! Request-body validation.
//!
//! Pure functions that check an incoming JSON payload against the movie
//! schema, in a full variant for creates and a partial variant for
//! patches. Each check produces either a typed value or a structured
//! collection of field-level errors; nothing here touches the store or
//! the HTTP layer.
//!
//! Unrecognized fields are rejected rather than stripped, so a payload
//! that tries to smuggle an `id` through a patch fails validation.

use crate::models::{Genre, MovieDraft, MoviePatch};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Earliest accepted release year.
const YEAR_MIN: i64 = 1900;
/// Latest accepted release year.
const YEAR_MAX: i64 = 2100;
/// Lowest accepted rating.
const RATE_MIN: f64 = 0.0;
/// Highest accepted rating.
const RATE_MAX: f64 = 10.0;
/// Rating applied when a create payload omits `rate`.
pub const DEFAULT_RATE: f64 = 5.5;

/// Fields recognized by both schema variants.
const KNOWN_FIELDS: [&str; 7] = [
    "title",
    "year",
    "director",
    "duration",
    "rate",
    "poster",
    "genre",
];

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// Name of the offending field.
    pub field: String,
    /// The constraint that was not met.
    pub message: String,
    /// The value that was received. `null` for a missing field.
    pub received: Value,
}

/// Accumulated validation failures for one payload.
///
/// Serializes as a plain array of [`FieldError`] entries; the HTTP layer
/// wraps it in an `{"error": [...]}` body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Returns the individual field errors.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Returns true when any error references the given field.
    #[must_use]
    pub fn mentions(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    fn push(&mut self, field: &str, message: impl Into<String>, received: &Value) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.into(),
            received: received.clone(),
        });
    }

    fn missing(&mut self, field: &str) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: "required field is missing".to_string(),
            received: Value::Null,
        });
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.0.iter().map(|e| e.field.as_str()).collect();
        write!(f, "validation failed for {}", fields.join(", "))
    }
}

/// Validates a full create payload.
///
/// `title`, `year`, `director`, `duration`, and `genre` must be present
/// and well-typed; `rate` defaults to [`DEFAULT_RATE`] when absent and
/// `poster` may be omitted. Explicit `null` is a type error for every
/// field.
///
/// # Errors
///
/// Returns every field-level failure found, including unrecognized
/// fields, so callers can report them all at once.
pub fn validate_movie(payload: &Value) -> Result<MovieDraft, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let Some(map) = payload.as_object() else {
        errors.push("body", "expected a JSON object", payload);
        return Err(errors);
    };
    reject_unknown_fields(map, &mut errors);

    let title = required(map, "title", &mut errors, coerce_title);
    let year = required(map, "year", &mut errors, coerce_year);
    let director = required(map, "director", &mut errors, coerce_director);
    let duration = required(map, "duration", &mut errors, coerce_duration);
    let genre = required(map, "genre", &mut errors, coerce_genre);
    let rate = optional(map, "rate", &mut errors, coerce_rate);
    let poster = optional(map, "poster", &mut errors, coerce_poster);

    match (title, year, director, duration, genre, rate, poster) {
        (
            Some(title),
            Some(year),
            Some(director),
            Some(duration),
            Some(genre),
            Some(rate),
            Some(poster),
        ) if errors.errors().is_empty() => Ok(MovieDraft {
            title,
            year,
            director,
            duration,
            rate: rate.unwrap_or(DEFAULT_RATE),
            poster,
            genre,
        }),
        _ => Err(errors),
    }
}

/// Validates a partial update payload.
///
/// The same per-field rules as [`validate_movie`] apply, but no field is
/// required: an empty object is valid and yields a patch that changes
/// nothing. The identifier is not a recognized field, so a patch cannot
/// rewrite it.
///
/// # Errors
///
/// Returns every field-level failure found.
pub fn validate_partial_movie(payload: &Value) -> Result<MoviePatch, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let Some(map) = payload.as_object() else {
        errors.push("body", "expected a JSON object", payload);
        return Err(errors);
    };
    reject_unknown_fields(map, &mut errors);

    let patch = MoviePatch {
        title: optional(map, "title", &mut errors, coerce_title).flatten(),
        year: optional(map, "year", &mut errors, coerce_year).flatten(),
        director: optional(map, "director", &mut errors, coerce_director).flatten(),
        duration: optional(map, "duration", &mut errors, coerce_duration).flatten(),
        rate: optional(map, "rate", &mut errors, coerce_rate).flatten(),
        poster: optional(map, "poster", &mut errors, coerce_poster).flatten(),
        genre: optional(map, "genre", &mut errors, coerce_genre).flatten(),
    };

    if errors.errors().is_empty() {
        Ok(patch)
    } else {
        Err(errors)
    }
}

fn reject_unknown_fields(map: &Map<String, Value>, errors: &mut ValidationErrors) {
    for (key, value) in map {
        if !KNOWN_FIELDS.contains(&key.as_str()) {
            errors.push(key, "unrecognized field", value);
        }
    }
}

/// Coerces a required field, recording a failure when it is absent or
/// ill-typed.
fn required<T>(
    map: &Map<String, Value>,
    field: &str,
    errors: &mut ValidationErrors,
    coerce: fn(&Value) -> Result<T, String>,
) -> Option<T> {
    match map.get(field) {
        Some(value) => match coerce(value) {
            Ok(coerced) => Some(coerced),
            Err(message) => {
                errors.push(field, message, value);
                None
            },
        },
        None => {
            errors.missing(field);
            None
        },
    }
}

/// Coerces an optional field.
///
/// `Some(None)` means absent, `Some(Some(_))` present and valid, and
/// `None` present but invalid (with the failure recorded).
fn optional<T>(
    map: &Map<String, Value>,
    field: &str,
    errors: &mut ValidationErrors,
    coerce: fn(&Value) -> Result<T, String>,
) -> Option<Option<T>> {
    match map.get(field) {
        Some(value) => match coerce(value) {
            Ok(coerced) => Some(Some(coerced)),
            Err(message) => {
                errors.push(field, message, value);
                None
            },
        },
        None => Some(None),
    }
}

fn coerce_title(value: &Value) -> Result<String, String> {
    match value.as_str() {
        Some(s) if s.trim().is_empty() => Err("must not be empty".to_string()),
        Some(s) => Ok(s.to_string()),
        None => Err("expected a string".to_string()),
    }
}

fn coerce_year(value: &Value) -> Result<i32, String> {
    value
        .as_i64()
        .filter(|year| (YEAR_MIN..=YEAR_MAX).contains(year))
        .and_then(|year| i32::try_from(year).ok())
        .ok_or_else(|| format!("expected an integer between {YEAR_MIN} and {YEAR_MAX}"))
}

fn coerce_director(value: &Value) -> Result<String, String> {
    value
        .as_str()
        .map(ToString::to_string)
        .ok_or_else(|| "expected a string".to_string())
}

fn coerce_duration(value: &Value) -> Result<u32, String> {
    value
        .as_u64()
        .filter(|minutes| *minutes > 0)
        .and_then(|minutes| u32::try_from(minutes).ok())
        .ok_or_else(|| "expected a positive integer".to_string())
}

fn coerce_rate(value: &Value) -> Result<f64, String> {
    value
        .as_f64()
        .filter(|rate| (RATE_MIN..=RATE_MAX).contains(rate))
        .ok_or_else(|| format!("expected a number between {RATE_MIN} and {RATE_MAX}"))
}

fn coerce_poster(value: &Value) -> Result<String, String> {
    match value.as_str() {
        Some(s) if s.starts_with("http://") || s.starts_with("https://") => Ok(s.to_string()),
        _ => Err("expected an http(s) URL".to_string()),
    }
}

fn coerce_genre(value: &Value) -> Result<Vec<Genre>, String> {
    let Some(items) = value.as_array() else {
        return Err("expected an array of genres".to_string());
    };
    if items.is_empty() {
        return Err("expected at least one genre".to_string());
    }

    let mut genres = Vec::with_capacity(items.len());
    for item in items {
        let genre = item
            .as_str()
            .and_then(Genre::parse)
            .ok_or_else(|| format!("unknown genre {item}; expected one of {}", vocabulary()))?;
        genres.push(genre);
    }
    Ok(genres)
}

fn vocabulary() -> String {
    Genre::ALL
        .iter()
        .map(|genre| genre.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
