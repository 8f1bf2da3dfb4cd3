//! Provider implementations for catalog search.

use async_trait::async_trait;

use crate::errors::MediaSearchError;
use crate::types::{MediaType, SearchResult};

pub mod demo;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod tmdb;

pub use demo::DemoProvider;
#[cfg(any(test, feature = "test-utils"))]
pub use mock::MockProvider;
pub use tmdb::{SearchRequest, TmdbProvider};

/// Trait for catalog search providers.
///
/// Implementations provide multi-type search through different backends
/// (the TMDB API, built-in demo data, scripted mocks for testing).
#[async_trait]
pub trait CatalogSearchProvider: Send + Sync + std::fmt::Debug {
    /// Searches movies and series at once. Results keep the provider's order.
    ///
    /// Callers never pass an empty query.
    ///
    /// # Errors
    /// - `MediaSearchError::NetworkError` - Request could not be completed
    /// - `MediaSearchError::ParseError` - Response body did not decode
    /// - `MediaSearchError::ProviderError` - Provider-specific error
    async fn search_multi(&self, query: &str) -> Result<Vec<SearchResult>, MediaSearchError>;

    /// Fetches one entry for a detail page.
    ///
    /// # Errors
    /// - `MediaSearchError::NotFound` - No entry with this id
    /// - `MediaSearchError::NetworkError` - Request could not be completed
    /// - `MediaSearchError::ParseError` - Response body did not decode
    async fn lookup(&self, media_type: MediaType, id: u64)
    -> Result<SearchResult, MediaSearchError>;
}
