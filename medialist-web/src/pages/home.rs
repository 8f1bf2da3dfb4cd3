//! Home page - landing view with the search dropdown in the nav bar

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;

use crate::components::{layout, render_page};
use crate::server::AppState;

/// Renders the home page.
pub async fn home_page(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let ctx = state.page_context(&headers);

    let call_to_action = match &ctx.user {
        Some(_) => layout::button(
            "Open your watchlist",
            "primary",
            Some(r#"onclick="window.location.href='/watchlist'""#),
        ),
        None => layout::button(
            "Create an account",
            "primary",
            Some(r#"onclick="window.location.href='/auth/register'""#),
        ),
    };

    let content = format!(
        r#"{}
        <div class="text-center py-16">
            <p class="text-gray-400 mb-8">Hover the search icon in the top bar and start typing a movie or series title.</p>
            {call_to_action}
        </div>"#,
        layout::page_header(
            "Find something to watch",
            Some("Search movies and series, then keep track of them in your watchlist")
        ),
    );

    render_page("Home", "home", &content, &ctx)
}
