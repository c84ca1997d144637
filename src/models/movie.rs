//! Movie records and identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a movie.
///
/// Opaque string, assigned by the store on creation and immutable from
/// then on. Fixture records carry their own pre-assigned identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(String);

impl MovieId {
    /// Creates a new movie ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for MovieId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MovieId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The closed genre vocabulary.
///
/// Wire names match the enum variants, except `Sci-Fi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    /// Action.
    Action,
    /// Comedy.
    Comedy,
    /// Drama.
    Drama,
    /// Fantasy.
    Fantasy,
    /// Horror.
    Horror,
    /// Thriller.
    Thriller,
    /// Science fiction, spelled `Sci-Fi` on the wire.
    #[serde(rename = "Sci-Fi")]
    SciFi,
    /// Crime.
    Crime,
    /// Animation.
    Animation,
    /// Biography.
    Biography,
    /// Adventure.
    Adventure,
}

impl Genre {
    /// Every member of the vocabulary, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Action,
        Self::Comedy,
        Self::Drama,
        Self::Fantasy,
        Self::Horror,
        Self::Thriller,
        Self::SciFi,
        Self::Crime,
        Self::Animation,
        Self::Biography,
        Self::Adventure,
    ];

    /// Returns the wire name of this genre.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Action => "Action",
            Self::Comedy => "Comedy",
            Self::Drama => "Drama",
            Self::Fantasy => "Fantasy",
            Self::Horror => "Horror",
            Self::Thriller => "Thriller",
            Self::SciFi => "Sci-Fi",
            Self::Crime => "Crime",
            Self::Animation => "Animation",
            Self::Biography => "Biography",
            Self::Adventure => "Adventure",
        }
    }

    /// Parses an exact wire name. Validation is case-sensitive.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|genre| genre.as_str() == s)
    }

    /// Case-insensitive comparison used by the genre query filter.
    #[must_use]
    pub fn matches(self, name: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(name)
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A catalog movie record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Unique identifier.
    pub id: MovieId,
    /// Title, never empty.
    pub title: String,
    /// Release year.
    pub year: i32,
    /// Director name.
    pub director: String,
    /// Running time in minutes.
    pub duration: u32,
    /// Rating on a 0-10 scale.
    pub rate: f64,
    /// Poster URL, when one is known.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub poster: Option<String>,
    /// Genres, at least one.
    pub genre: Vec<Genre>,
}

impl Movie {
    /// Builds a record from a validated draft and a freshly assigned id.
    #[must_use]
    pub fn new(id: MovieId, draft: MovieDraft) -> Self {
        Self {
            id,
            title: draft.title,
            year: draft.year,
            director: draft.director,
            duration: draft.duration,
            rate: draft.rate,
            poster: draft.poster,
            genre: draft.genre,
        }
    }

    /// Shallow-merges a validated patch over this record.
    ///
    /// Present fields win; the identifier is untouched. The merged whole
    /// is not re-validated.
    pub fn apply(&mut self, patch: MoviePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(director) = patch.director {
            self.director = director;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(rate) = patch.rate {
            self.rate = rate;
        }
        if let Some(poster) = patch.poster {
            self.poster = Some(poster);
        }
        if let Some(genre) = patch.genre {
            self.genre = genre;
        }
    }
}

/// A fully validated create payload, before an identifier is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDraft {
    /// Title, never empty.
    pub title: String,
    /// Release year.
    pub year: i32,
    /// Director name.
    pub director: String,
    /// Running time in minutes.
    pub duration: u32,
    /// Rating, defaulted when the payload omitted it.
    pub rate: f64,
    /// Poster URL, if provided.
    pub poster: Option<String>,
    /// Genres, at least one.
    pub genre: Vec<Genre>,
}

/// A validated partial update. Absent fields mean "no change".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoviePatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement release year.
    pub year: Option<i32>,
    /// Replacement director.
    pub director: Option<String>,
    /// Replacement duration.
    pub duration: Option<u32>,
    /// Replacement rating.
    pub rate: Option<f64>,
    /// Replacement poster URL.
    pub poster: Option<String>,
    /// Replacement genre list.
    pub genre: Option<Vec<Genre>>,
}
