//! HTMX partial update handlers for the search dropdown

use axum::extract::{Query, State};
use axum::response::Html;
use medialist_search::{ResultPanel, present};
use serde::Deserialize;

use crate::components::result_panel;
use crate::server::AppState;

/// Query string of the search endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Text typed into the search box
    #[serde(default)]
    pub query: String,
}

/// Renders the result panel fragment for `?query=`.
///
/// An empty query renders nothing so the panel disappears.
pub async fn htmx_search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Html<String> {
    let panel = search_panel(&state, &params.query).await;
    Html(result_panel(&panel, &params.query))
}

/// Runs a search and decides what the panel shows.
///
/// Failures become [`ResultPanel::Unavailable`] rather than an error response.
pub(crate) async fn search_panel(state: &AppState, query: &str) -> ResultPanel {
    if query.trim().is_empty() {
        return ResultPanel::Hidden;
    }

    let image_base_url = &state.config.search.image_base_url;
    match state.search.search(query).await {
        Ok(results) => present(query, &results, None, image_base_url),
        Err(e) => present(query, &[], Some(&e), image_base_url),
    }
}
