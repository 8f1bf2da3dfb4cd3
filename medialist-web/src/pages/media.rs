//! Movie and series detail pages

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Html;
use medialist_search::MediaType;

use crate::components::{media_detail, render_page};
use crate::errors::WebError;
use crate::server::AppState;

/// Renders `/movie/{id}`.
///
/// # Errors
/// - `WebError::Search` - Catalog has no such movie or is unreachable
pub async fn movie_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Result<Html<String>, WebError> {
    detail_page(&state, &headers, MediaType::Movie, id).await
}

/// Renders `/series/{id}`.
///
/// # Errors
/// - `WebError::Search` - Catalog has no such series or is unreachable
pub async fn series_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Result<Html<String>, WebError> {
    detail_page(&state, &headers, MediaType::Series, id).await
}

async fn detail_page(
    state: &AppState,
    headers: &HeaderMap,
    media_type: MediaType,
    id: u64,
) -> Result<Html<String>, WebError> {
    let result = state.search.lookup(media_type, id).await?;
    let ctx = state.page_context(headers);

    let content = media_detail(
        &result,
        &state.config.search.image_base_url,
        ctx.user.is_some(),
    );

    Ok(render_page(&result.title, "", &content, &ctx))
}
