//! Data types for catalog search.

use std::fmt;

use medialist_core::Route;
use serde::{Deserialize, Serialize};

/// Catalog entry kind.
///
/// The catalog tags series as `"tv"`. Every other tag is treated as a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Feature film, and anything that is not a series
    Movie,
    /// Television series
    Series,
}

impl MediaType {
    /// Maps a catalog `media_type` tag.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("tv") => MediaType::Series,
            _ => MediaType::Movie,
        }
    }

    /// Tag used in catalog URLs (`movie` or `tv`).
    pub fn catalog_tag(self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Series => "tv",
        }
    }

    /// Human label shown on result rows.
    pub fn label(self) -> &'static str {
        match self {
            MediaType::Movie => "Movie",
            MediaType::Series => "Series",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Movie => f.write_str("movie"),
            MediaType::Series => f.write_str("series"),
        }
    }
}

/// One normalized catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Catalog identifier
    pub id: u64,
    /// Display title (movie title or series name)
    pub title: String,
    /// Poster image path relative to the image host
    pub poster_path: Option<String>,
    /// Average score, 0 to 10
    pub vote_average: f32,
    /// Release date for movies
    pub release_date: Option<String>,
    /// First air date for series
    pub first_air_date: Option<String>,
    /// Entry kind
    pub media_type: MediaType,
}

impl SearchResult {
    /// Release date, falling back to first air date.
    pub fn display_date(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .or(self.first_air_date.as_deref())
    }

    /// Whether the entry can be rendered.
    pub fn has_poster(&self) -> bool {
        self.poster_path
            .as_deref()
            .is_some_and(|path| !path.is_empty())
    }

    /// Detail page for this entry.
    pub fn route(&self) -> Route {
        match self.media_type {
            MediaType::Series => Route::Series(self.id),
            MediaType::Movie => Route::Movie(self.id),
        }
    }

    /// Full poster URL at original size, if the entry has a poster.
    pub fn poster_url(&self, image_base_url: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(|path| format!("{image_base_url}/original{path}"))
    }
}
