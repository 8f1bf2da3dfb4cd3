//! Registration and sign-in pages

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Html;
use medialist_core::{Alert, RegistrationFlow};
use serde::Deserialize;

use crate::components::{PageContext, card, layout, login_form, register_form, render_page};
use crate::server::AppState;

/// Query parameters accepted by the sign-in page.
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    /// Path to return to after signing in
    pub next: Option<String>,
}

/// Renders the registration page.
pub async fn register_page(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    register_view(&state.page_context(&headers), &RegistrationFlow::new())
}

/// Renders the sign-in page.
pub async fn login_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<LoginQuery>,
) -> Html<String> {
    login_view(&state.page_context(&headers), "", None, query.next.as_deref())
}

/// Registration page for a given flow state.
pub(crate) fn register_view(ctx: &PageContext, flow: &RegistrationFlow) -> Html<String> {
    let content = format!(
        r#"<div class="max-w-md mx-auto">
            {}
            {}
        </div>"#,
        layout::page_header("Create account", Some("Keep a watchlist of movies and series")),
        card(None, &register_form(flow)),
    );

    render_page("Register", "register", &content, ctx)
}

/// Sign-in page with the given prefilled email and alert.
pub(crate) fn login_view(
    ctx: &PageContext,
    email: &str,
    alert: Option<&Alert>,
    next: Option<&str>,
) -> Html<String> {
    let content = format!(
        r#"<div class="max-w-md mx-auto">
            {}
            {}
        </div>"#,
        layout::page_header("Sign in", None),
        card(None, &login_form(email, alert, next)),
    );

    render_page("Sign in", "login", &content, ctx)
}
