//! Seed fixture loading.
//!
//! The catalog starts from a JSON array of movie records read once at
//! startup. Nothing is ever written back.

use crate::models::Movie;
use crate::{Error, Result};
use std::path::Path;

/// Reads and parses a seed fixture.
///
/// # Errors
///
/// Returns [`Error::OperationFailed`] when the file cannot be read or
/// does not parse as an array of movie records.
pub fn load_fixture(path: &Path) -> Result<Vec<Movie>> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
        operation: "read_seed_fixture".to_string(),
        cause: format!("{}: {}", path.display(), e),
    })?;

    serde_json::from_str(&contents).map_err(|e| Error::OperationFailed {
        operation: "parse_seed_fixture".to_string(),
        cause: e.to_string(),
    })
}
