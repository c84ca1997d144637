//! The movie catalog store.
//!
//! The catalog is an ordered sequence of movie records behind the
//! [`CatalogBackend`] trait. All mutation goes through the trait, so the
//! in-memory backend can later be swapped for a persistent one without
//! touching the HTTP layer.

mod memory;
mod seed;

pub use memory::InMemoryCatalog;
pub use seed::load_fixture;

use crate::Result;
use crate::models::{Movie, MovieDraft, MovieId, MoviePatch};

/// Trait for catalog storage backends.
///
/// # Implementor Notes
///
/// - Methods use `&self` to enable sharing via `Arc<dyn CatalogBackend>`
/// - Use interior mutability (e.g., `RwLock<Vec<Movie>>`) for mutable
///   state; the HTTP runtime is multi-threaded, so every mutation must be
///   mutually exclusive
/// - `list` must return records in insertion order, oldest first
pub trait CatalogBackend: Send + Sync {
    /// Returns every movie in insertion order.
    fn list(&self) -> Result<Vec<Movie>>;

    /// Returns movies whose title contains the fragment,
    /// case-insensitively. An empty result is not an error.
    fn find_by_title(&self, fragment: &str) -> Result<Vec<Movie>>;

    /// Returns movies carrying a genre that equals the name,
    /// case-insensitively.
    fn find_by_genre(&self, name: &str) -> Result<Vec<Movie>>;

    /// Looks up a single movie by id.
    fn get(&self, id: &MovieId) -> Result<Option<Movie>>;

    /// Assigns a fresh unique identifier, appends the record, and
    /// returns it.
    fn create(&self, draft: MovieDraft) -> Result<Movie>;

    /// Shallow-merges the patch over the stored record and replaces it
    /// in place, returning the merged record. `None` when the id is
    /// unknown. The merged whole is not re-validated.
    fn patch(&self, id: &MovieId, patch: MoviePatch) -> Result<Option<Movie>>;

    /// Removes the record, preserving the relative order of the rest.
    /// Returns `true` when a record was removed.
    fn delete(&self, id: &MovieId) -> Result<bool>;
}
