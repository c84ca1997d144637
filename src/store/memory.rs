//! In-memory catalog backend.

use super::CatalogBackend;
use crate::models::{Movie, MovieDraft, MovieId, MoviePatch};
use crate::{Error, Result};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// Catalog backend holding all records in process memory.
///
/// Records live in a `Vec` in insertion order; nothing outlives the
/// process. Reads take a shared lock, mutations an exclusive one.
pub struct InMemoryCatalog {
    movies: RwLock<Vec<Movie>>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            movies: RwLock::new(Vec::new()),
        }
    }

    /// Creates a catalog pre-populated with the given records, keeping
    /// their order and identifiers.
    #[must_use]
    pub fn with_movies(movies: Vec<Movie>) -> Self {
        Self {
            movies: RwLock::new(movies),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Movie>>> {
        self.movies.read().map_err(|e| Error::OperationFailed {
            operation: "catalog_read".to_string(),
            cause: e.to_string(),
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Movie>>> {
        self.movies.write().map_err(|e| Error::OperationFailed {
            operation: "catalog_write".to_string(),
            cause: e.to_string(),
        })
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogBackend for InMemoryCatalog {
    fn list(&self) -> Result<Vec<Movie>> {
        Ok(self.read()?.clone())
    }

    fn find_by_title(&self, fragment: &str) -> Result<Vec<Movie>> {
        let fragment = fragment.to_lowercase();
        Ok(self
            .read()?
            .iter()
            .filter(|movie| movie.title.to_lowercase().contains(&fragment))
            .cloned()
            .collect())
    }

    fn find_by_genre(&self, name: &str) -> Result<Vec<Movie>> {
        Ok(self
            .read()?
            .iter()
            .filter(|movie| movie.genre.iter().any(|genre| genre.matches(name)))
            .cloned()
            .collect())
    }

    fn get(&self, id: &MovieId) -> Result<Option<Movie>> {
        Ok(self.read()?.iter().find(|movie| &movie.id == id).cloned())
    }

    fn create(&self, draft: MovieDraft) -> Result<Movie> {
        let id = MovieId::new(Uuid::new_v4().to_string());
        let movie = Movie::new(id, draft);
        self.write()?.push(movie.clone());
        Ok(movie)
    }

    fn patch(&self, id: &MovieId, patch: MoviePatch) -> Result<Option<Movie>> {
        let mut movies = self.write()?;
        let Some(movie) = movies.iter_mut().find(|movie| &movie.id == id) else {
            return Ok(None);
        };
        movie.apply(patch);
        Ok(Some(movie.clone()))
    }

    fn delete(&self, id: &MovieId) -> Result<bool> {
        let mut movies = self.write()?;
        let Some(index) = movies.iter().position(|movie| &movie.id == id) else {
            return Ok(false);
        };
        movies.remove(index);
        Ok(true)
    }
}
