//! Error types for catalog search.

use thiserror::Error;

use crate::types::MediaType;

/// Errors that can occur during catalog search operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaSearchError {
    /// Query was empty or whitespace; no request is made for it.
    #[error("Search query is empty")]
    EmptyQuery,

    /// Search operation failed with the specified query and reason.
    #[error("Search failed for query '{query}': {reason}")]
    SearchFailed {
        /// The search query that failed
        query: String,
        /// The reason for the failure
        reason: String,
    },

    /// Network communication error occurred during search.
    #[error("Network error: {reason}")]
    NetworkError {
        /// The reason for the network error
        reason: String,
    },

    /// Failed to parse search results or response data.
    #[error("Parse error: {reason}")]
    ParseError {
        /// The reason for the parse error
        reason: String,
    },

    /// Search provider returned an error or is not configured.
    #[error("Provider error: {reason}")]
    ProviderError {
        /// The reason for the provider error
        reason: String,
    },

    /// Catalog has no entry with this id.
    #[error("No {media_type} with id {id}")]
    NotFound {
        /// Kind that was looked up
        media_type: MediaType,
        /// Catalog id
        id: u64,
    },

    /// The search controller task is no longer running.
    #[error("Search controller has shut down")]
    ControllerShutdown,
}
