//! Catalog search service.

use std::sync::Arc;

use medialist_core::config::SearchConfig;

use crate::errors::MediaSearchError;
use crate::providers::{CatalogSearchProvider, DemoProvider, TmdbProvider};
use crate::types::{MediaType, SearchResult};

/// Catalog search service shared by the controller and the web handlers.
///
/// Cheap to clone; all clones share one provider.
#[derive(Debug, Clone)]
pub struct MediaSearchService {
    provider: Arc<dyn CatalogSearchProvider>,
}

impl MediaSearchService {
    /// Creates a service over an explicit provider.
    pub fn new(provider: Arc<dyn CatalogSearchProvider>) -> Self {
        Self { provider }
    }

    /// Creates a service backed by the built-in demo catalog.
    pub fn new_demo() -> Self {
        Self::new(Arc::new(DemoProvider::new()))
    }

    /// Picks a provider from configuration: demo data when requested,
    /// otherwise the TMDB API.
    ///
    /// # Errors
    /// - `MediaSearchError::ProviderError` - TMDB selected but no API key configured
    pub fn from_config(config: &SearchConfig) -> Result<Self, MediaSearchError> {
        if config.use_demo_data {
            tracing::info!("Using demo catalog");
            return Ok(Self::new_demo());
        }

        let provider = TmdbProvider::new(config)?;
        tracing::info!(base_url = %config.api_base_url, "Using TMDB catalog");
        Ok(Self::new(Arc::new(provider)))
    }

    /// Searches movies and series for `query`.
    ///
    /// The query is trimmed first. A blank query is rejected before the
    /// provider is contacted.
    ///
    /// # Errors
    /// - `MediaSearchError::EmptyQuery` - Query is blank
    /// - `MediaSearchError::SearchFailed` - Provider failed for this query
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, MediaSearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(MediaSearchError::EmptyQuery);
        }

        match self.provider.search_multi(query).await {
            Ok(results) => {
                tracing::debug!(query, count = results.len(), "Catalog search completed");
                Ok(results)
            }
            Err(e) => {
                tracing::warn!(query, error = %e, "Catalog search failed");
                Err(MediaSearchError::SearchFailed {
                    query: query.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Fetches one entry for a detail page.
    ///
    /// # Errors
    /// - `MediaSearchError::NotFound` - No entry with this id
    /// - `MediaSearchError::NetworkError` - Catalog could not be reached
    pub async fn lookup(
        &self,
        media_type: MediaType,
        id: u64,
    ) -> Result<SearchResult, MediaSearchError> {
        self.provider.lookup(media_type, id).await
    }
}
