//! Data model types.

mod movie;

pub use movie::{Genre, Movie, MovieDraft, MovieId, MoviePatch};
