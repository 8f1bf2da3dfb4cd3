//! Demo provider implementation for development and testing.

use async_trait::async_trait;

use super::CatalogSearchProvider;
use crate::errors::MediaSearchError;
use crate::types::{MediaType, SearchResult};

/// Demo provider for development and testing.
///
/// Serves a small fixed catalog so the search dropdown can be exercised
/// without an API key. Includes an entry without a poster and a person-like
/// entry so hidden rows show up in practice.
#[derive(Debug)]
pub struct DemoProvider {
    catalog: Vec<SearchResult>,
}

impl Default for DemoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoProvider {
    /// Creates a provider over the built-in catalog.
    pub fn new() -> Self {
        Self {
            catalog: demo_catalog(),
        }
    }

    /// Number of entries in the catalog.
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }
}

#[async_trait]
impl CatalogSearchProvider for DemoProvider {
    async fn search_multi(&self, query: &str) -> Result<Vec<SearchResult>, MediaSearchError> {
        let needle = query.trim().to_lowercase();
        Ok(self
            .catalog
            .iter()
            .filter(|entry| entry.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn lookup(
        &self,
        media_type: MediaType,
        id: u64,
    ) -> Result<SearchResult, MediaSearchError> {
        self.catalog
            .iter()
            .find(|entry| entry.id == id && entry.media_type == media_type)
            .cloned()
            .ok_or(MediaSearchError::NotFound { media_type, id })
    }
}

fn entry(
    id: u64,
    title: &str,
    poster_path: Option<&str>,
    vote_average: f32,
    date: &str,
    media_type: MediaType,
) -> SearchResult {
    let (release_date, first_air_date) = match media_type {
        MediaType::Movie => (Some(date.to_string()), None),
        MediaType::Series => (None, Some(date.to_string())),
    };
    SearchResult {
        id,
        title: title.to_string(),
        poster_path: poster_path.map(str::to_string),
        vote_average,
        release_date,
        first_air_date,
        media_type,
    }
}

#[rustfmt::skip]
fn demo_catalog() -> Vec<SearchResult> {
    use MediaType::{Movie, Series};

    vec![
        entry(603, "The Matrix", Some("/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg"), 8.2, "1999-03-30", Movie),
        entry(604, "The Matrix Reloaded", Some("/9TGHDvWrqKBzwDxDodHYXEmOE6J.jpg"), 7.1, "2003-05-15", Movie),
        entry(438631, "Dune", Some("/d5NXSklXo0qyIYkgV94XAgMIckC.jpg"), 7.8, "2021-09-15", Movie),
        entry(693134, "Dune: Part Two", Some("/1pdfLvkbY9ohJlCjQH2CZjjYVvJ.jpg"), 8.2, "2024-02-27", Movie),
        entry(329865, "Arrival", Some("/x2FJsf1ElAgr63Y3PNPtJrcmpoe.jpg"), 7.6, "2016-11-10", Movie),
        entry(1396, "Breaking Bad", Some("/ggFHVNu6YYI5L9pCfOacjizRGt.jpg"), 8.9, "2008-01-20", Series),
        entry(95396, "Severance", Some("/pPHpeI2X1qEd1CS1SeyrdhZ4qnT.jpg"), 8.4, "2022-02-17", Series),
        entry(2316, "The Office", Some("/7DJKHzAi83BmQrWLrYYOqcoKfhR.jpg"), 8.6, "2005-03-24", Series),
        entry(1399, "Game of Thrones", None, 8.5, "2011-04-17", Series),
        // Person entries come back from multi search with no poster and no date.
        SearchResult {
            id: 287,
            title: "Brad Pitt".to_string(),
            poster_path: None,
            vote_average: 0.0,
            release_date: None,
            first_air_date: None,
            media_type: Movie,
        },
    ]
}
