//! Scriptable provider for tests.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::CatalogSearchProvider;
use crate::errors::MediaSearchError;
use crate::types::{MediaType, SearchResult};

#[derive(Debug, Clone)]
struct Script {
    delay: Duration,
    response: Result<Vec<SearchResult>, MediaSearchError>,
}

/// Mock provider returning scripted responses per query.
///
/// Unscripted queries answer with an empty list immediately. Every call is
/// recorded so tests can assert which queries actually reached the provider.
#[derive(Debug, Default)]
pub struct MockProvider {
    scripts: Mutex<HashMap<String, Script>>,
    calls: Mutex<Vec<String>>,
}

impl MockProvider {
    /// Creates a provider with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `query` with `results` after `delay`.
    pub fn respond(&self, query: &str, results: Vec<SearchResult>, delay: Duration) {
        self.scripts.lock().insert(
            query.to_string(),
            Script {
                delay,
                response: Ok(results),
            },
        );
    }

    /// Fails `query` with `error` after `delay`.
    pub fn fail(&self, query: &str, error: MediaSearchError, delay: Duration) {
        self.scripts.lock().insert(
            query.to_string(),
            Script {
                delay,
                response: Err(error),
            },
        );
    }

    /// Queries received so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Builds a movie entry with a poster, for scripting.
    pub fn movie(id: u64, title: &str) -> SearchResult {
        SearchResult {
            id,
            title: title.to_string(),
            poster_path: Some(format!("/{id}.jpg")),
            vote_average: 7.0,
            release_date: Some("2020-01-01".to_string()),
            first_air_date: None,
            media_type: MediaType::Movie,
        }
    }

    /// Builds a series entry with a poster, for scripting.
    pub fn series(id: u64, title: &str) -> SearchResult {
        SearchResult {
            id,
            title: title.to_string(),
            poster_path: Some(format!("/{id}.jpg")),
            vote_average: 8.0,
            release_date: None,
            first_air_date: Some("2019-06-01".to_string()),
            media_type: MediaType::Series,
        }
    }
}

#[async_trait]
impl CatalogSearchProvider for MockProvider {
    async fn search_multi(&self, query: &str) -> Result<Vec<SearchResult>, MediaSearchError> {
        self.calls.lock().push(query.to_string());
        let script = self.scripts.lock().get(query).cloned();

        match script {
            Some(script) => {
                if !script.delay.is_zero() {
                    tokio::time::sleep(script.delay).await;
                }
                script.response
            }
            None => Ok(Vec::new()),
        }
    }

    async fn lookup(
        &self,
        media_type: MediaType,
        id: u64,
    ) -> Result<SearchResult, MediaSearchError> {
        let scripts = self.scripts.lock();
        scripts
            .values()
            .filter_map(|script| script.response.as_ref().ok())
            .flatten()
            .find(|entry| entry.id == id && entry.media_type == media_type)
            .cloned()
            .ok_or(MediaSearchError::NotFound { media_type, id })
    }
}
