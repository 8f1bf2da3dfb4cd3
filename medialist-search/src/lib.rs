//! Medialist Search - Catalog search and the search-as-you-type dropdown

#![warn(missing_docs)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Queries a multi-type (movie and series) catalog, keeps the search input
//! state machine consistent with out-of-order responses, and turns results
//! into rows ready for rendering.

pub mod controller;
pub mod errors;
pub mod presentation;
pub mod providers;
pub mod service;
pub mod types;

// Re-export main types
pub use controller::{
    Applied, ControllerSnapshot, ControllerState, SearchController, SearchControllerHandle,
    SearchTicket, spawn_search_controller,
};
pub use errors::MediaSearchError;
pub use presentation::{ResultPanel, ResultRow, Theme, present, route_for};
pub use providers::{CatalogSearchProvider, DemoProvider, SearchRequest, TmdbProvider};
pub use service::MediaSearchService;
pub use types::{MediaType, SearchResult};

/// Convenience type alias for Results with MediaSearchError.
pub type Result<T> = std::result::Result<T, MediaSearchError>;
