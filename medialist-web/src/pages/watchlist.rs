//! Watchlist page - the signed-in user's saved titles

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect, Response};
use medialist_core::Route;

use crate::components::{card, layout, render_page, watchlist_entries};
use crate::errors::WebError;
use crate::server::AppState;

/// Renders the watchlist, or redirects to sign-in when nobody is signed in.
///
/// # Errors
/// - `WebError::Core` - Watchlist store unavailable
pub async fn watchlist_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let ctx = state.page_context(&headers);
    let Some(user) = ctx.user.clone() else {
        return Ok(redirect_to_login(Route::Watchlist).into_response());
    };

    let view = state.watchlist.load(&user).await?;
    let content = format!(
        "{}{}",
        layout::page_header("Your watchlist", Some(user.email.as_str())),
        card(None, &watchlist_entries(&view)),
    );

    Ok(render_page("Watchlist", "watchlist", &content, &ctx).into_response())
}

/// Redirect to the sign-in page that returns to `next` afterwards.
pub(crate) fn redirect_to_login(next: Route) -> Redirect {
    Redirect::to(&format!(
        "{}?next={}",
        Route::Login.path(),
        urlencoding::encode(&next.path())
    ))
}
