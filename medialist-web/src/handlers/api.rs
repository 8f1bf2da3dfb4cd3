//! JSON API handlers

use axum::extract::{Query, State};
use axum::response::Json;
use medialist_search::ResultPanel;

use super::htmx::{SearchQuery, search_panel};
use crate::server::AppState;

/// Returns the result panel for `?query=` as JSON.
pub async fn api_search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<ResultPanel> {
    Json(search_panel(&state, &params.query).await)
}
